//! `erase-proxy init` — generate a starter configuration file.
//!
//! Supports two modes:
//! - **Minimal** (default): the built-in defaults serialized in the chosen format.
//! - **Full** (`--full`): a commented template documenting every field.

mod serialize;
mod template;

use std::path::PathBuf;

use crate::cli::InitArgs;
use crate::config::model::Config;
use crate::error::EraseProxyError;

pub fn execute(args: &InitArgs) -> Result<(), EraseProxyError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("erase-proxy.{}", args.format.extension())));

    if output.exists() {
        return Err(EraseProxyError::FileExists { path: output });
    }

    let content = if args.full {
        template::full(&args.format).to_string()
    } else {
        serialize::serialize_config(&Config::default(), &args.format)?
    };

    std::fs::write(&output, content)?;
    println!("Created {}", output.display());
    Ok(())
}
