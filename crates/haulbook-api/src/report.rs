//! Handler for `GET /report`.
//!
//! Returns the filtered record set together with everything the report view
//! needs: summary statistics, chart groupings, and the drop-down options for
//! the filter form.

use std::{collections::BTreeSet, sync::Arc};

use axum::{
  Json,
  extract::{Query, State},
};
use haulbook_core::{
  load::WasteLoad,
  report::{ChartData, LoadSummary},
  store::LedgerStore,
};
use serde::Serialize;

use crate::{error::ApiError, loads::FilterParams};

// ─── Filter options ──────────────────────────────────────────────────────────

/// Distinct categorical values offered by the report's filter drop-downs.
///
/// Always derived from the *unfiltered* ledger — the drop-downs must show
/// every known category even while a filter is active. This derivation is
/// presentation concern, deliberately kept out of the aggregation engine.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
  pub waste_types:         Vec<String>,
  pub material_categories: Vec<String>,
  pub destinations:        Vec<String>,
  pub panchayaths:         Vec<String>,
}

impl FilterOptions {
  fn collect(all: &[WasteLoad]) -> Self {
    let mut waste_types = BTreeSet::new();
    let mut material_categories = BTreeSet::new();
    let mut destinations = BTreeSet::new();
    let mut panchayaths = BTreeSet::new();

    for load in all {
      waste_types.insert(load.waste_type.clone());
      material_categories.insert(load.material_category.clone());
      destinations.insert(load.destination.clone());
      if let Some(p) = &load.panchayath
        && !p.is_empty()
      {
        panchayaths.insert(p.clone());
      }
    }

    Self {
      waste_types:         waste_types.into_iter().collect(),
      material_categories: material_categories.into_iter().collect(),
      destinations:        destinations.into_iter().collect(),
      panchayaths:         panchayaths.into_iter().collect(),
    }
  }
}

// ─── Response ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ReportResponse {
  pub loads:          Vec<WasteLoad>,
  pub summary:        LoadSummary,
  pub charts:         ChartData,
  pub filter_options: FilterOptions,
}

// ─── Handler ─────────────────────────────────────────────────────────────────

/// `GET /report[?<filter params>]`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<FilterParams>,
) -> Result<Json<ReportResponse>, ApiError>
where
  S: LedgerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let filter = params.into_filter();

  let loads = store
    .filter_loads(&filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  // Summary and charts describe the filtered set; the drop-down options
  // come from the full ledger.
  let summary = LoadSummary::compute(&loads);
  let charts = ChartData::compute(&loads);

  let all = store
    .list_loads()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let filter_options = FilterOptions::collect(&all);

  Ok(Json(ReportResponse { loads, summary, charts, filter_options }))
}
