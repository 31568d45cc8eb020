//! Errors raised by the result vault write and read paths.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// A key or value failed validation before anything was stored.
    #[error("{message}")]
    Validation { message: String },
    /// A mutation was attempted after the vault was sealed.
    #[error("this result vault may no longer be modified")]
    State,
    /// A read named a field that is neither reserved nor stored.
    #[error("undefined field '{name}' for result vault")]
    UnknownMember { name: String },
}

impl VaultError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn non_identifier(key: &str) -> Self {
        Self::validation(format!(
            "key '{key}' is not an identifier; field names must match [A-Za-z_][A-Za-z0-9_]*"
        ))
    }

    pub(crate) fn non_identifier_update(key: &str) -> Self {
        Self::validation(format!("update argument key is not an identifier: '{key}'"))
    }

    pub(crate) fn reserved_data() -> Self {
        Self::validation(
            "data is a reserved field and may not be set directly; use update to set or update results",
        )
    }

    pub(crate) fn not_an_error() -> Self {
        Self::validation("exception only accepts an error value, such as an io::Error")
    }

    pub(crate) fn message_not_text() -> Self {
        Self::validation("error_message only accepts a string value")
    }

    pub(crate) fn unknown_member(name: &str) -> Self {
        Self::UnknownMember {
            name: name.to_string(),
        }
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, VaultError::Validation { .. })
    }

    #[must_use]
    pub const fn is_state(&self) -> bool {
        matches!(self, VaultError::State)
    }

    #[must_use]
    pub const fn is_unknown_member(&self) -> bool {
        matches!(self, VaultError::UnknownMember { .. })
    }
}
