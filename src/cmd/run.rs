//! `erase-proxy run` — start the relay server.
//!
//! Loads configuration from a file (or the built-in defaults), applies
//! CLI/env overrides, validates the result, and serves the erase route
//! and `/health` with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::RunArgs;
use crate::config::model::Config;
use crate::config::validation;
use crate::config::{self, LoadedConfig};
use crate::error::EraseProxyError;
use crate::logging;
use crate::proxy::backend::HttpBackend;
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), EraseProxyError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let mut loaded = config::resolve(args.config.as_deref()).await?;
    if apply_overrides(&mut loaded.config, &args) {
        validation::validate(&loaded.config)
            .map_err(|errors| EraseProxyError::ConfigValidation { errors })?;
    }

    let state = Arc::new(build_state(loaded)?);
    let path = state.loaded.config.server.path.clone();
    let downstream = state.backend.endpoint().to_string();

    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        path = %path,
        downstream = %downstream,
        "erase-proxy started"
    );

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(server::shutdown_signal())
    .await?;

    tracing::info!("erase-proxy stopped");
    Ok(())
}

/// Build the shared state with an HTTP backend for the configured downstream.
pub fn build_state(loaded: LoadedConfig) -> Result<AppState, EraseProxyError> {
    let backend = HttpBackend::from_config(server::build_http_client(), &loaded.config.downstream)?;
    Ok(AppState::new(loaded, Box::new(backend)))
}

/// Apply CLI/env overrides on top of the loaded config.
///
/// Returns `true` if anything changed and the config needs re-validating.
fn apply_overrides(config: &mut Config, args: &RunArgs) -> bool {
    let mut changed = false;

    if let Some(url) = &args.downstream_url {
        config.downstream.url.clone_from(url);
        changed = true;
    }
    if let Some(path) = &args.path {
        config.server.path.clone_from(path);
        changed = true;
    }
    if let Some(timeout) = args.timeout {
        config.downstream.timeout = timeout;
        changed = true;
    }
    if let Some(max_body) = args.max_body {
        config.server.max_body = max_body;
        changed = true;
    }

    changed
}
