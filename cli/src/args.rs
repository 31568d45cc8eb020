//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Default, Parser)]
#[command(name = "vault", version, about = "Build a result vault and print its snapshot")]
pub struct Args {
    /// Config file to read instead of ~/.vault/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seal the vault after building it.
    #[arg(long)]
    pub seal: bool,

    /// Store an error with this message as the vault's exception.
    #[arg(long, value_name = "MESSAGE")]
    pub exception: Option<String>,

    /// Print a single field instead of the snapshot.
    #[arg(long, value_name = "NAME", conflicts_with = "list")]
    pub get: Option<String>,

    /// Print every readable and writable field name.
    #[arg(long)]
    pub list: bool,

    /// Fields to set, applied after config defaults. Values are JSON when
    /// they parse as JSON and plain strings otherwise.
    #[arg(value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub fields: Vec<(String, String)>,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    Ok((key.to_string(), value.to_string()))
}
