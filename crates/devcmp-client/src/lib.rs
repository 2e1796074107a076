//! Device console client and comparison session
//!
//! [`ConsoleClient`] fetches device lists and object lists from the console's
//! JSON API. [`ComparisonSession`] ties one object category to two device
//! selections, discards responses that arrive after a newer selection, runs
//! the comparison pipeline and reports every outcome through a notifier.

mod client;
mod error;
mod selection;
mod session;

pub use client::ConsoleClient;
pub use error::FetchError;
pub use selection::{SelectionTicket, SelectionTracker};
pub use session::{ComparisonSession, SelectOutcome};
