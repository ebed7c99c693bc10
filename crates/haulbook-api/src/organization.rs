//! Handlers for `/organization` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/organization` | 404 until a profile has been created |
//! | `PUT`  | `/organization` | Upsert; body: `{"name":"...","description":"..."}` |

use std::sync::Arc;

use axum::{Json, extract::State};
use haulbook_core::{
  organization::{Organization, OrganizationUpdate},
  store::LedgerStore,
};

use crate::error::ApiError;

/// `GET /organization`
pub async fn get_current<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Organization>, ApiError>
where
  S: LedgerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let organization = store
    .organization()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound("no organization profile exists yet".into())
    })?;
  Ok(Json(organization))
}

/// `PUT /organization` — creates the profile or updates it in place; there
/// is never more than one.
pub async fn save<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<OrganizationUpdate>,
) -> Result<Json<Organization>, ApiError>
where
  S: LedgerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  body.validate()?;

  let stored = store
    .save_organization(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(name = %stored.name, "organization profile saved");

  Ok(Json(stored))
}
