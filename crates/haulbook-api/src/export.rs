//! Handler for `GET /export/csv`.
//!
//! The ledger is small enough that the export is built as one in-memory
//! document and returned as an attachment. The header row is always present,
//! even for an empty ledger.

use std::sync::Arc;

use axum::{
  body::Body,
  extract::{Query, State},
  http::{StatusCode, header},
  response::Response,
};
use chrono::Utc;
use haulbook_core::store::LedgerStore;

use crate::{error::ApiError, loads::FilterParams};

const HEADER: [&str; 8] = [
  "Vehicle Number",
  "Date & Time",
  "Waste Weight (kg)",
  "Waste Type",
  "Material Category",
  "Destination",
  "Panchayath",
  "Created At",
];

/// `GET /export/csv[?<filter params>]` — the same lenient filter criteria as
/// the report apply, so a filtered view exports exactly what it shows.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<FilterParams>,
) -> Result<Response, ApiError>
where
  S: LedgerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let filter = params.into_filter();
  let loads = store
    .filter_loads(&filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let mut writer = csv::Writer::from_writer(Vec::new());
  writer.write_record(HEADER)?;
  for load in &loads {
    let recorded = load.recorded_for.format("%Y-%m-%d %H:%M").to_string();
    let weight = load.weight_kg.to_string();
    let created = load.created_at.format("%Y-%m-%d %H:%M").to_string();
    writer.write_record([
      load.vehicle_number.as_str(),
      recorded.as_str(),
      weight.as_str(),
      load.waste_type.as_str(),
      load.material_category.as_str(),
      load.destination.as_str(),
      load.panchayath.as_deref().unwrap_or(""),
      created.as_str(),
    ])?;
  }
  let bytes = writer
    .into_inner()
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let filename =
    format!("waste_loads_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));

  Ok(
    Response::builder()
      .status(StatusCode::OK)
      .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
      .header(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename={filename}"),
      )
      .header(header::CONTENT_LENGTH, bytes.len())
      .body(Body::from(bytes))
      .unwrap(),
  )
}
