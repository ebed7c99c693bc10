//! Haulbook server: configuration, router assembly, and logo storage.
//!
//! The JSON API itself lives in `haulbook-api`; this crate supplies the
//! pieces that need more than a store handle — configuration, the upload
//! directory, and the assembled router the binary serves.

pub mod error;
pub mod logo;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use haulbook_core::store::LedgerStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Where uploaded logos are kept; created at startup if absent.
  pub upload_dir: PathBuf,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the server's own handlers.
#[derive(Clone)]
pub struct AppState<S: LedgerStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: the JSON API under `/api`, plus logo
/// upload and serving.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: LedgerStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let api = haulbook_api::api_router(state.store.clone()).merge(
    Router::new()
      .route("/organization/logo", post(logo::upload::<S>))
      .with_state(state.clone()),
  );

  Router::new()
    .route("/uploads/{filename}", get(logo::serve::<S>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
