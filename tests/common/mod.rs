//! Shared test fixtures

#![allow(dead_code)]

use std::error::Error;
use std::fmt;

use vault_types::{FieldValue, ResultVault};

/// Minimal error type for exercising the `exception` field.
#[derive(Debug)]
pub struct TestError(pub &'static str);

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Error for TestError {}

pub fn test_error(message: &'static str) -> FieldValue {
    FieldValue::error(TestError(message))
}

/// A vault holding `test_1 = "One"` and `test_2 = "Two"`.
pub fn sample_vault() -> ResultVault {
    ResultVault::new([("test_1", "One"), ("test_2", "Two")]).expect("sample keys are identifiers")
}
