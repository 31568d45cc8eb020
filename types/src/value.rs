//! Values stored in vault fields.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Shared handle to an error stored in a vault.
pub type SharedError = Arc<dyn Error + Send + Sync>;

/// A dynamic field value: either plain data or an error.
///
/// Only [`FieldValue::Error`] satisfies the error-value capability required by
/// the `exception` field. Non-finite floats have no JSON form and convert to
/// `null`.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Value(Value),
    Error(SharedError),
}

impl FieldValue {
    pub const NULL: FieldValue = FieldValue::Value(Value::Null);

    #[must_use]
    pub fn error<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Error(Arc::new(err))
    }

    #[must_use]
    pub fn from_arc_error(err: SharedError) -> Self {
        Self::Error(err)
    }

    /// Only `null` and `false` are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, FieldValue::Value(Value::Null | Value::Bool(false)))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, FieldValue::Error(_))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Value(Value::Null))
    }

    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldValue::Value(value) => Some(value),
            FieldValue::Error(_) => None,
        }
    }

    #[must_use]
    pub fn as_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            FieldValue::Error(err) => Some(err.as_ref()),
            FieldValue::Value(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// JSON rendering; errors become their display text.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Value(value) => value.clone(),
            FieldValue::Error(err) => Value::String(err.to_string()),
        }
    }
}

/// Plain values compare by value, errors by identity.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Value(a), FieldValue::Value(b)) => a == b,
            (FieldValue::Error(a), FieldValue::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq<Value> for FieldValue {
    fn eq(&self, other: &Value) -> bool {
        self.as_value() == Some(other)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Value(Value::String(text)) => f.write_str(text),
            FieldValue::Value(value) => write!(f, "{value}"),
            FieldValue::Error(err) => write!(f, "{err}"),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<SharedError> for FieldValue {
    fn from(err: SharedError) -> Self {
        Self::Error(err)
    }
}

macro_rules! plain_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

plain_from!(bool, i32, i64, u32, u64, &str, String);

/// JSON has no NaN or infinity: non-finite floats are stored as `null`.
impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Value(Value::from(value))
    }
}
