//! The aggregation engine: summary statistics and chart groupings.
//!
//! Everything here is a pure function of the record set it is given. When a
//! caller passes a filtered subset, the results describe that subset and
//! nothing else — there is no hidden dependence on the full ledger.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::load::WasteLoad;

// ─── Summary statistics ──────────────────────────────────────────────────────

/// Headline numbers for a record set, shown above the report table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
  pub total_loads:        usize,
  /// Sum of `weight_kg` over the set; `0.0` when the set is empty.
  pub total_weight_kg:    f64,
  pub unique_vehicles:    usize,
  pub unique_waste_types: usize,
}

impl LoadSummary {
  pub fn compute(loads: &[WasteLoad]) -> Self {
    let mut vehicles: HashSet<&str> = HashSet::new();
    let mut waste_types: HashSet<&str> = HashSet::new();
    let mut total_weight_kg = 0.0_f64;

    for load in loads {
      vehicles.insert(&load.vehicle_number);
      waste_types.insert(&load.waste_type);
      total_weight_kg += load.weight_kg;
    }

    Self {
      total_loads: loads.len(),
      total_weight_kg,
      unique_vehicles: vehicles.len(),
      unique_waste_types: waste_types.len(),
    }
  }
}

// ─── Chart groupings ─────────────────────────────────────────────────────────

/// Grouped counts and weight sums for chart rendering.
///
/// Maps hold only the category values actually present in the input — absent
/// categories are absent keys, never zero-filled entries. `BTreeMap` keeps
/// iteration order deterministic for rendering and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
  pub count_by_waste_type:        BTreeMap<String, u64>,
  pub count_by_material_category: BTreeMap<String, u64>,
  pub count_by_destination:       BTreeMap<String, u64>,
  pub weight_by_waste_type:       BTreeMap<String, f64>,
  pub weight_by_destination:      BTreeMap<String, f64>,
}

impl ChartData {
  pub fn compute(loads: &[WasteLoad]) -> Self {
    let mut charts = Self::default();

    for load in loads {
      *charts
        .count_by_waste_type
        .entry(load.waste_type.clone())
        .or_insert(0) += 1;
      *charts
        .count_by_material_category
        .entry(load.material_category.clone())
        .or_insert(0) += 1;
      *charts
        .count_by_destination
        .entry(load.destination.clone())
        .or_insert(0) += 1;
      *charts
        .weight_by_waste_type
        .entry(load.waste_type.clone())
        .or_insert(0.0) += load.weight_kg;
      *charts
        .weight_by_destination
        .entry(load.destination.clone())
        .or_insert(0.0) += load.weight_kg;
    }

    charts
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
