//! Build a vault from config and arguments, and render it for stdout.

use serde_json::Value;
use thiserror::Error;

use vault_config::VaultConfig;
use vault_types::{FieldValue, ResultVault, VaultError};

use crate::args::Args;

/// Error stored as the vault's exception when `--exception` is given.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ReportedError(pub String);

/// JSON when the text parses as JSON, otherwise the text itself.
#[must_use]
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn build_vault(config: Option<&VaultConfig>, args: &Args) -> Result<ResultVault, VaultError> {
    let mut fields = config.map(VaultConfig::default_fields).unwrap_or_default();
    fields.extend(
        args.fields
            .iter()
            .map(|(key, raw)| (key.clone(), FieldValue::from(parse_value(raw)))),
    );

    let mut vault = ResultVault::new(fields)?;
    if let Some(message) = &args.exception {
        vault.set_exception(FieldValue::error(ReportedError(message.clone())))?;
    }
    if args.seal || config.is_some_and(VaultConfig::seal_after_build) {
        vault.seal();
    }

    tracing::debug!(sealed = vault.is_sealed(), "Built {vault}");
    Ok(vault)
}

pub fn render(vault: &ResultVault, args: &Args) -> Result<String, VaultError> {
    if let Some(name) = &args.get {
        return Ok(format!("{:#}", vault.get(name)?.to_json()));
    }
    if args.list {
        return Ok(vault.list_fields(true).join("\n"));
    }
    Ok(format!("{:#}", vault.snapshot().to_json()))
}
