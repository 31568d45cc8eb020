//! Configuration for the `vault` CLI.
//!
//! Read from `~/.vault/config.toml`, or from the path in `VAULT_CONFIG`.
//!
//! ```toml
//! [vault]
//! seal = true
//!
//! [defaults]
//! status = "pending"
//! owner = "${USER}"
//!
//! [logging]
//! filter = "vault_types=debug"
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use vault_types::FieldValue;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "VAULT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct VaultConfig {
    pub vault: Option<VaultSection>,
    /// Initial fields applied to every vault the CLI builds.
    pub defaults: Option<toml::Table>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VaultSection {
    pub seal: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

/// Expand `${VAR}` references; unset variables expand to nothing.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut i = 0;

    while i < value.len() {
        if value[i..].starts_with("${") {
            let start = i + 2;
            if let Some(end_rel) = value[start..].find('}') {
                let end = start + end_rel;
                let var = &value[start..end];
                if !var.is_empty() {
                    let replacement = env::var(var).unwrap_or_default();
                    out.push_str(&replacement);
                }
                i = end + 1;
                continue;
            }
        }

        let Some(ch) = value[i..].chars().next() else {
            break;
        };
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

impl VaultConfig {
    /// Load from the default location. A missing file is `Ok(None)`.
    pub fn try_load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = Self::path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded vault config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        match env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => config_path(),
        }
    }

    #[must_use]
    pub fn seal_after_build(&self) -> bool {
        self.vault
            .as_ref()
            .and_then(|section| section.seal)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.logging
            .as_ref()
            .and_then(|logging| logging.filter.as_deref())
            .map(str::trim)
            .filter(|filter| !filter.is_empty())
    }

    /// The `[defaults]` table as vault fields, with `${VAR}` expanded in strings.
    ///
    /// Keys are passed through untouched; the vault validates them.
    #[must_use]
    pub fn default_fields(&self) -> Vec<(String, FieldValue)> {
        self.defaults
            .iter()
            .flatten()
            .map(|(key, value)| (key.clone(), FieldValue::from(toml_to_json(value))))
            .collect()
    }
}

fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(text) => Value::String(expand_env_vars(text)),
        toml::Value::Integer(number) => Value::from(*number),
        toml::Value::Float(number) => Value::from(*number),
        toml::Value::Boolean(flag) => Value::Bool(*flag),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            let object: Map<String, Value> = table
                .iter()
                .map(|(key, value)| (key.clone(), toml_to_json(value)))
                .collect();
            Value::Object(object)
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vault").join("config.toml"))
}
