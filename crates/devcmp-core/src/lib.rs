//! Core types for comparing configuration objects across devices
//!
//! This crate provides the fundamental types shared by the comparison engine,
//! the HTTP client and the CLI: NamedObject, ObjectList, ObjectCategory and
//! Device, plus the anchor-id and name-ordering rules every consumer agrees on.

mod anchor;
mod category;
mod collation;
mod device;
mod error;
mod object;

pub use anchor::{anchor_id, sanitize_anchor_id};
pub use category::{CategoryError, ObjectCategory};
pub use collation::locale_cmp;
pub use device::Device;
pub use error::{ObjectError, ObjectResult};
pub use object::{
    find_duplicate_names, json_kind, validate_names, ListSide, NamedObject, ObjectList,
};

/// Key that identifies a NamedObject within a list
pub const NAME_KEY: &str = "name";
