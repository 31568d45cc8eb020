//! Field names and the reserved-name table.
//!
//! Every key that reaches a vault is an identifier token: an ASCII letter or
//! `_`, followed by ASCII alphanumerics or `_`. Writer names carry a trailing
//! [`SETTER_SUFFIX`] (`user_id=`), mirroring assignment syntax.

use std::borrow::Borrow;
use std::fmt;

use crate::VaultError;

/// Marker appended to a field name to spell its writer.
pub const SETTER_SUFFIX: char = '=';

/// Synonyms that all read and write the single `success` flag.
pub const SUCCESS_ALIASES: [&str; 6] = ["success", "ok", "good", "pass", "passed", "succeeded"];

/// Returns true if `raw` is a valid identifier token.
#[must_use]
pub fn is_identifier(raw: &str) -> bool {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A validated identifier used as a vault key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(raw: impl Into<String>) -> Result<Self, VaultError> {
        let raw = raw.into();
        if is_identifier(&raw) {
            Ok(Self(raw))
        } else {
            Err(VaultError::non_identifier(&raw))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The writer spelling of this name, e.g. `user_id=`.
    #[must_use]
    pub fn setter(&self) -> String {
        format!("{}{SETTER_SUFFIX}", self.0)
    }

    #[must_use]
    pub fn reserved(&self) -> Option<ReservedField> {
        ReservedField::classify(&self.0)
    }
}

impl TryFrom<&str> for FieldName {
    type Error = VaultError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for FieldName {
    type Error = VaultError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldName> for String {
    fn from(value: FieldName) -> Self {
        value.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of names a vault intercepts before the open data bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedField {
    Success,
    Status,
    Exception,
    ErrorMessage,
    /// Readable as the snapshot; never writable.
    Data,
}

impl ReservedField {
    pub const ALL: [ReservedField; 5] = [
        ReservedField::Success,
        ReservedField::Status,
        ReservedField::Exception,
        ReservedField::ErrorMessage,
        ReservedField::Data,
    ];

    #[must_use]
    pub fn classify(name: &str) -> Option<Self> {
        match name {
            "success" | "ok" | "good" | "pass" | "passed" | "succeeded" => {
                Some(ReservedField::Success)
            }
            "status" => Some(ReservedField::Status),
            "exception" => Some(ReservedField::Exception),
            "error_message" => Some(ReservedField::ErrorMessage),
            "data" => Some(ReservedField::Data),
            _ => None,
        }
    }

    /// Every name that resolves to this field.
    #[must_use]
    pub const fn names(self) -> &'static [&'static str] {
        match self {
            ReservedField::Success => &SUCCESS_ALIASES,
            ReservedField::Status => &["status"],
            ReservedField::Exception => &["exception"],
            ReservedField::ErrorMessage => &["error_message"],
            ReservedField::Data => &["data"],
        }
    }

    #[must_use]
    pub const fn is_writable(self) -> bool {
        !matches!(self, ReservedField::Data)
    }
}
