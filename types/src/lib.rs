//! Result vault domain types.
//!
//! A [`ResultVault`] carries a success flag, an optional status tag, an optional
//! error, an error message and an open bag of named result data. Fields are read
//! and written by name; the whole vault can be sealed so only reads remain.
//!
//! This crate has no IO and no async.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod error;
mod name;
mod snapshot;
mod value;
mod vault;

pub use error::VaultError;
pub use name::{FieldName, ReservedField, SETTER_SUFFIX, SUCCESS_ALIASES, is_identifier};
pub use snapshot::{Iter as SnapshotIter, Snapshot};
pub use value::{FieldValue, SharedError};
pub use vault::ResultVault;
