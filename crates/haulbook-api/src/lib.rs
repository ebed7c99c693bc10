//! JSON REST API for Haulbook.
//!
//! Exposes an axum [`Router`] backed by any
//! [`haulbook_core::store::LedgerStore`]. Transport concerns (TLS, upload
//! storage, static file serving) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", haulbook_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod export;
pub mod loads;
pub mod organization;
pub mod report;

use std::sync::Arc;

use axum::{Router, routing::get};
use haulbook_core::store::LedgerStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: LedgerStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Loads
    .route("/loads", get(loads::list::<S>).post(loads::create::<S>))
    .route("/loads/{id}", get(loads::get_one::<S>))
    // Report + export
    .route("/report", get(report::handler::<S>))
    .route("/export/csv", get(export::handler::<S>))
    // Organization profile
    .route(
      "/organization",
      get(organization::get_current::<S>).put(organization::save::<S>),
    )
    .with_state(store)
}
