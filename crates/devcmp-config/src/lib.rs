//! Configuration for the device comparison tools
//!
//! Settings come from an optional YAML file and are then overridden by
//! environment variables:
//!
//! - `DEVCMP_BASE_URL` - console API base URL
//! - `DEVCMP_TOKEN` - bearer token
//! - `DEVCMP_TIMEOUT_SECS` - request timeout in seconds
//! - `DEVCMP_VENDOR` - vendor whose devices can be compared
//!
//! # Example
//!
//! ```ignore
//! use devcmp_config::ConsoleConfig;
//!
//! let config = ConsoleConfig::load("devcmp.yaml")?;
//! println!("{}", config.base_url);
//! ```

mod console;
mod error;

pub use console::ConsoleConfig;
pub use error::{ConfigError, ConfigResult};
