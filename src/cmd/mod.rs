//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`init`], [`validate`], or [`health`].
//! Each handler lives in its own submodule.

pub mod health;
pub mod init;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::EraseProxyError;

pub async fn dispatch(cli: Cli) -> Result<(), EraseProxyError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  erase-proxy v{version} \u{2014} HTTP relay for a background-erasing image service\n\n  \
         No command provided. To get started:\n\n    \
         erase-proxy run                   Relay POST /api/erase to http://localhost:5555/upload\n    \
         erase-proxy init                  Generate a starter config\n    \
         erase-proxy --help                See all commands and options\n"
    );
}
