//! The result vault: reserved fields, open data and the seal.
//!
//! Every mutation, whether it comes from a typed setter, the generic
//! [`ResultVault::set`], construction or [`ResultVault::update`], is first
//! turned into a [`Write`] by `prepare`. Preparing performs all key, seal and
//! value checks; applying a prepared write cannot fail. This is what lets
//! `update` validate a whole batch before touching any state.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::name::{FieldName, ReservedField, SETTER_SUFFIX, is_identifier};
use crate::value::SharedError;
use crate::{FieldValue, Snapshot, VaultError};

/// A checked mutation, ready to apply.
enum Write {
    Success(bool),
    Status(FieldValue),
    Exception(SharedError),
    ErrorMessage(String),
    Open(FieldName, FieldValue),
}

/// A multi-field result returned from an operation.
///
/// ```
/// use vault_types::{FieldValue, ResultVault};
///
/// let mut result = ResultVault::new([
///     ("error_message", FieldValue::from("missing user")),
///     ("user_id", FieldValue::from(123)),
/// ])?;
/// result.set("user_name", "Test User")?;
///
/// assert!(!result.success());
/// assert_eq!(result.get("user_id")?, FieldValue::from(123));
/// assert_eq!(result.error_message(), "missing user");
/// # Ok::<(), vault_types::VaultError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResultVault {
    success: bool,
    status: Option<FieldValue>,
    exception: Option<SharedError>,
    error_message: String,
    data: BTreeMap<FieldName, FieldValue>,
    sealed: bool,
}

impl ResultVault {
    /// Build a vault, applying each pair in order through the write path.
    pub fn new<I, K, V>(fields: I) -> Result<Self, VaultError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        let mut vault = Self::default();
        for (key, value) in fields {
            vault.set(key.as_ref(), value)?;
        }
        Ok(vault)
    }

    // ------------------------------------------------------------------
    // Reserved readers
    // ------------------------------------------------------------------

    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn ok(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn good(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn pass(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn status(&self) -> Option<&FieldValue> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn exception(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.exception.as_deref()
    }

    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    // ------------------------------------------------------------------
    // Reserved writers
    // ------------------------------------------------------------------

    pub fn set_success(&mut self, value: impl Into<FieldValue>) -> Result<(), VaultError> {
        self.set("success", value)
    }

    pub fn set_ok(&mut self, value: impl Into<FieldValue>) -> Result<(), VaultError> {
        self.set("ok", value)
    }

    pub fn set_good(&mut self, value: impl Into<FieldValue>) -> Result<(), VaultError> {
        self.set("good", value)
    }

    pub fn set_pass(&mut self, value: impl Into<FieldValue>) -> Result<(), VaultError> {
        self.set("pass", value)
    }

    pub fn set_passed(&mut self, value: impl Into<FieldValue>) -> Result<(), VaultError> {
        self.set("passed", value)
    }

    pub fn set_succeeded(&mut self, value: impl Into<FieldValue>) -> Result<(), VaultError> {
        self.set("succeeded", value)
    }

    pub fn set_status(&mut self, value: impl Into<FieldValue>) -> Result<(), VaultError> {
        self.set("status", value)
    }

    /// Store an error. An empty error message is filled with its text.
    pub fn set_exception(&mut self, value: impl Into<FieldValue>) -> Result<(), VaultError> {
        self.set("exception", value)
    }

    pub fn set_error_message(&mut self, message: impl Into<String>) -> Result<(), VaultError> {
        self.set("error_message", message.into())
    }

    // ------------------------------------------------------------------
    // Generic access
    // ------------------------------------------------------------------

    /// Read any field by name.
    ///
    /// Reserved names resolve to their reserved value (`data` yields the
    /// snapshot as a JSON object). Open keys yield a copy of the stored value.
    pub fn get(&self, name: &str) -> Result<FieldValue, VaultError> {
        match ReservedField::classify(name) {
            Some(ReservedField::Success) => Ok(FieldValue::from(self.success)),
            Some(ReservedField::Status) => Ok(self.status.clone().unwrap_or(FieldValue::NULL)),
            Some(ReservedField::Exception) => Ok(self
                .exception
                .clone()
                .map_or(FieldValue::NULL, FieldValue::Error)),
            Some(ReservedField::ErrorMessage) => Ok(FieldValue::from(self.error_message.as_str())),
            Some(ReservedField::Data) => Ok(FieldValue::Value(self.snapshot().to_json())),
            None => self
                .data
                .get(name)
                .cloned()
                .ok_or_else(|| VaultError::unknown_member(name)),
        }
    }

    /// Borrow an open-data value without copying.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.data.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FieldName, &FieldValue)> {
        self.data.iter()
    }

    /// Write any field by name; unknown names declare a new open field.
    pub fn set(&mut self, key: &str, value: impl Into<FieldValue>) -> Result<(), VaultError> {
        let write = self.prepare(key, value.into()).inspect_err(|err| {
            debug!(key, reason = %err, "rejected result vault write");
        })?;
        self.apply(write);
        Ok(())
    }

    /// Apply several writes, lower-casing every key.
    ///
    /// Keys are checked against the identifier grammar before folding, and
    /// before the seal, matching [`ResultVault::set`]. All keys and values
    /// are checked before anything is stored: on error the vault is left
    /// exactly as it was.
    pub fn update<I, K, V>(&mut self, fields: I) -> Result<&mut Self, VaultError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        let mut folded = Vec::new();
        for (key, value) in fields {
            let raw = key.as_ref();
            if !is_identifier(raw) {
                debug!(key = raw, "rejected result vault update");
                return Err(VaultError::non_identifier_update(raw));
            }
            folded.push((raw.to_ascii_lowercase(), value.into()));
        }

        self.ensure_unsealed()?;
        let writes = folded
            .into_iter()
            .map(|(key, value)| self.prepare(&key, value))
            .collect::<Result<Vec<_>, _>>()?;

        if !writes.is_empty() {
            debug!(count = writes.len(), "applying result vault update");
        }
        for write in writes {
            self.apply(write);
        }
        Ok(self)
    }

    fn prepare(&self, key: &str, value: FieldValue) -> Result<Write, VaultError> {
        let name = FieldName::new(key)?;
        self.ensure_unsealed()?;

        let write = match name.reserved() {
            Some(ReservedField::Data) => return Err(VaultError::reserved_data()),
            Some(ReservedField::Success) => Write::Success(value.is_truthy()),
            Some(ReservedField::Status) => Write::Status(value),
            Some(ReservedField::Exception) => match value {
                FieldValue::Error(err) => Write::Exception(err),
                FieldValue::Value(_) => return Err(VaultError::not_an_error()),
            },
            Some(ReservedField::ErrorMessage) => match value {
                FieldValue::Value(Value::String(message)) => Write::ErrorMessage(message),
                _ => return Err(VaultError::message_not_text()),
            },
            None => Write::Open(name, value),
        };
        Ok(write)
    }

    fn apply(&mut self, write: Write) {
        match write {
            Write::Success(flag) => self.success = flag,
            Write::Status(value) => {
                self.status = (!value.is_null()).then_some(value);
            }
            Write::Exception(err) => {
                if self.error_message.is_empty() {
                    self.error_message = err.to_string();
                }
                self.exception = Some(err);
            }
            Write::ErrorMessage(message) => self.error_message = message,
            Write::Open(name, value) => {
                self.data.insert(name, value);
            }
        }
    }

    fn ensure_unsealed(&self) -> Result<(), VaultError> {
        if self.sealed {
            Err(VaultError::State)
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Export and seal
    // ------------------------------------------------------------------

    /// Independent copy of every field except `exception`.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let mut entries: BTreeMap<String, FieldValue> = self
            .data
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        entries.insert("success".to_string(), FieldValue::from(self.success));
        entries.insert(
            "status".to_string(),
            self.status.clone().unwrap_or(FieldValue::NULL),
        );
        entries.insert(
            "error_message".to_string(),
            FieldValue::from(self.error_message.as_str()),
        );
        Snapshot::new(entries)
    }

    /// Permanently disable mutation. Sealing twice is a no-op.
    pub fn seal(&mut self) {
        if self.sealed {
            return;
        }
        self.sealed = true;
        debug!(fields = self.data.len(), "result vault sealed");
    }

    /// Seal and return the vault, for handing it off by value.
    #[must_use]
    pub fn into_sealed(mut self) -> Self {
        self.seal();
        self
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Names currently readable or writable.
    ///
    /// With `include_builtin` the reserved readers lead the list, followed by
    /// their writers while unsealed. Open keys follow, each trailed by its
    /// writer while unsealed. `data=` is never listed.
    #[must_use]
    pub fn list_fields(&self, include_builtin: bool) -> Vec<String> {
        let mut names = Vec::new();

        if include_builtin {
            for field in ReservedField::ALL {
                names.extend(field.names().iter().map(ToString::to_string));
            }
            if !self.sealed {
                for field in ReservedField::ALL.into_iter().filter(|f| f.is_writable()) {
                    names.extend(
                        field
                            .names()
                            .iter()
                            .map(|name| format!("{name}{SETTER_SUFFIX}")),
                    );
                }
            }
        }

        for name in self.data.keys() {
            names.push(name.to_string());
            if !self.sealed {
                names.push(name.setter());
            }
        }
        names
    }

    /// Whether `name` (a reader, or a writer ending in `=`) is usable now.
    #[must_use]
    pub fn supports(&self, name: &str) -> bool {
        if let Some(key) = name.strip_suffix(SETTER_SUFFIX) {
            if self.sealed || !is_identifier(key) {
                return false;
            }
            return ReservedField::classify(key).is_none_or(ReservedField::is_writable);
        }
        ReservedField::classify(name).is_some() || self.data.contains_key(name)
    }
}

impl fmt::Display for ResultVault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status.as_ref().unwrap_or(&FieldValue::NULL);
        write!(
            f,
            "ResultVault(success={}, status={status}, error_message={:?}, fields=[",
            self.success, self.error_message
        )?;
        for (idx, name) in self.data.keys().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name.as_str())?;
        }
        f.write_str("])")
    }
}
