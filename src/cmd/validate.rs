//! `erase-proxy validate` — check a configuration file without serving.
//!
//! Loads the file through the same [`FileSource`] the server uses, so a
//! file that passes here is one `run` will accept. Results are printed as
//! text or as a single JSON object.

use serde_json::json;

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::sources::file_source::FileSource;
use crate::config::validation;
use crate::error::EraseProxyError;

pub async fn execute(args: &ValidateArgs) -> Result<(), EraseProxyError> {
    let source = FileSource::new(&args.config)?;
    let name = source.path().display().to_string();

    let (config, version) = match source.load().await {
        Ok(loaded) => loaded,
        Err(EraseProxyError::ConfigValidation { errors }) => {
            match args.format {
                ValidateFormat::Text => {
                    eprintln!("\u{2717} {name} has {} errors\n", errors.len());
                    for error in &errors {
                        eprintln!("{error}");
                    }
                }
                ValidateFormat::Json => {
                    let errors: Vec<_> = errors
                        .iter()
                        .map(|e| {
                            json!({
                                "field": e.field,
                                "message": e.message,
                                "suggestion": e.suggestion,
                            })
                        })
                        .collect();
                    println!("{}", json!({ "valid": false, "errors": errors }));
                }
            }
            return Err(EraseProxyError::ConfigValidation { errors });
        }
        Err(e) => return Err(e),
    };

    match args.format {
        ValidateFormat::Text => {
            println!(
                "\u{2713} {}\n    version:  {}",
                validation::format_validation_report(&name, &config),
                version.short()
            );
        }
        ValidateFormat::Json => {
            println!(
                "{}",
                json!({
                    "valid": true,
                    "version": version.short(),
                    "path": config.server.path,
                    "downstream": config.downstream.url,
                    "timeout_ms": (config.downstream.timeout > 0).then_some(config.downstream.timeout),
                    "max_body": config.server.max_body,
                })
            );
        }
    }

    Ok(())
}
