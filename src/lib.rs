//! erase-proxy relays image erase requests to a downstream image service.
//!
//! It accepts `POST /api/erase` with an opaque JSON image, forwards
//! `{"image": <body>}` to the configured upload endpoint, and answers
//! with `{"croppedImage", "errorCode"}` taken from the downstream reply.
//! When the downstream exchange fails the caller still gets a 200 with
//! `errorCode: 90`.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, init, validate, health).
//! - [`config`] -- Configuration model, file loading, and validation.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`proxy`] -- The erase handler, wire payloads, and the downstream
//!   [`EraseBackend`](proxy::backend::EraseBackend) seam.
//! - [`server`] -- Axum server setup, shared application state, HTTP client, and
//!   graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `file-backends` | All file formats |
//! | `full` | All features |

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod proxy;
pub mod server;
