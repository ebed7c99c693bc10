//! Handlers for `/loads` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/loads` | Optional [`FilterParams`] query params |
//! | `POST` | `/loads` | Body: external `WasteLoad` shape minus `id`/`created_at` |
//! | `GET`  | `/loads/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{NaiveDate, NaiveDateTime};
use haulbook_core::{
  load::{NewWasteLoad, WasteLoad, minute_format},
  store::{LedgerStore, LoadFilter},
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── Lenient filter parsing ──────────────────────────────────────────────────

/// Raw, untyped filter criteria as they arrive on the query string.
///
/// This is the permissive boundary the report engine relies on: each
/// criterion is parsed independently and a malformed value is silently
/// dropped, never failing the whole request. [`LoadFilter`] itself only ever
/// sees well-typed values.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
  pub vehicle_number:    Option<String>,
  pub date_from:         Option<String>,
  pub date_to:           Option<String>,
  pub weight_min:        Option<String>,
  pub weight_max:        Option<String>,
  pub waste_type:        Option<String>,
  pub material_category: Option<String>,
  pub destination:       Option<String>,
  pub panchayath:        Option<String>,
}

impl FilterParams {
  pub fn into_filter(self) -> LoadFilter {
    LoadFilter {
      vehicle_number:    non_blank(self.vehicle_number),
      recorded_from:     self.date_from.as_deref().and_then(parse_datetime),
      recorded_until:    self.date_to.as_deref().and_then(parse_datetime),
      weight_min:        self.weight_min.as_deref().and_then(parse_weight),
      weight_max:        self.weight_max.as_deref().and_then(parse_weight),
      waste_type:        non_blank(self.waste_type),
      material_category: non_blank(self.material_category),
      destination:       non_blank(self.destination),
      panchayath:        non_blank(self.panchayath),
    }
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|s| !s.trim().is_empty())
}

/// Accepts `YYYY-MM-DDTHH:MM` or a bare `YYYY-MM-DD` (taken as midnight).
fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, minute_format::FORMAT)
    .ok()
    .or_else(|| {
      NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

fn parse_weight(s: &str) -> Option<f64> {
  s.trim().parse::<f64>().ok().filter(|w| w.is_finite())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /loads[?vehicle_number=...][&date_from=...][&weight_min=...]...`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<FilterParams>,
) -> Result<Json<Vec<WasteLoad>>, ApiError>
where
  S: LedgerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let filter = params.into_filter();
  let loads = store
    .filter_loads(&filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(loads))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /loads` — returns 201 + the stored record.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewWasteLoad>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  body.validate()?;

  let stored = store
    .record_load(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(
    id = stored.id,
    vehicle = %stored.vehicle_number,
    weight_kg = stored.weight_kg,
    "waste load recorded"
  );

  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /loads/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<WasteLoad>, ApiError>
where
  S: LedgerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let load = store
    .get_load(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("load {id} not found")))?;
  Ok(Json(load))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
