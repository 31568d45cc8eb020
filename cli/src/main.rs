//! Vault CLI - build a result vault from config defaults and arguments.
//!
//! ```text
//! main() -> Args::parse() -> load config -> init_tracing()
//!        -> build_vault(defaults ++ KEY=VALUE) -> [seal] -> render() -> stdout
//! ```
//!
//! Logs go to stderr so stdout carries only the rendered vault.

mod args;
mod run;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vault_config::VaultConfig;

use crate::args::Args;

const DEFAULT_LOG_FILTER: &str = "warn";

fn init_tracing(config: Option<&VaultConfig>) {
    let configured = config
        .and_then(VaultConfig::log_filter)
        .unwrap_or(DEFAULT_LOG_FILTER);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

/// Explicit `--config` paths must load; the default location may be absent
/// or broken, which only costs a warning.
fn load_config(args: &Args) -> Result<(Option<VaultConfig>, Option<String>)> {
    if let Some(path) = &args.config {
        let config = VaultConfig::load_from(path)
            .with_context(|| format!("loading --config {}", path.display()))?;
        return Ok((Some(config), None));
    }
    match VaultConfig::try_load() {
        Ok(config) => Ok((config, None)),
        Err(err) => Ok((None, Some(err.to_string()))),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (config, warning) = load_config(&args)?;

    init_tracing(config.as_ref());
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }

    let vault = run::build_vault(config.as_ref(), &args).context("building result vault")?;
    let rendered = run::render(&vault, &args)?;

    let mut out = io::stdout().lock();
    writeln!(out, "{rendered}")?;
    Ok(())
}
