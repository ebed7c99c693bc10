//! Waste-load records — the fundamental unit of the ledger.
//!
//! A load is an immutable record of one disposal event. Loads are never
//! updated or deleted; the ledger only grows.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Minute-precision timestamps ─────────────────────────────────────────────

/// Serde adapter for the `YYYY-MM-DDTHH:MM` wire format used by the
/// `datetime` field. The event time of a load carries minute precision only.
pub mod minute_format {
  use chrono::NaiveDateTime;
  use serde::{Deserialize as _, Deserializer, Serializer, de};

  pub const FORMAT: &str = "%Y-%m-%dT%H:%M";

  pub fn serialize<S>(
    dt: &NaiveDateTime,
    serializer: S,
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&dt.format(FORMAT).to_string())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&s, FORMAT).map_err(de::Error::custom)
  }
}

// ─── WasteLoad ───────────────────────────────────────────────────────────────

/// One disposal event. Once written, no field is ever updated.
///
/// The serialised shape uses the ledger's external keys: `datetime` for the
/// event time (minute precision) and `waste_weight` for the weight in
/// kilograms. `id` and `created_at` are store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteLoad {
  pub id:                i64,
  pub vehicle_number:    String,
  /// When the load happened — distinct from when the record was created.
  #[serde(rename = "datetime", with = "minute_format")]
  pub recorded_for:      NaiveDateTime,
  #[serde(rename = "waste_weight")]
  pub weight_kg:         f64,
  pub waste_type:        String,
  pub material_category: String,
  pub destination:       String,
  pub panchayath:        Option<String>,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:        DateTime<Utc>,
}

// ─── NewWasteLoad ────────────────────────────────────────────────────────────

/// Input to [`crate::store::LedgerStore::record_load`].
/// `id` and `created_at` are always set by the store; they are not accepted
/// from callers.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWasteLoad {
  pub vehicle_number:    String,
  #[serde(rename = "datetime", with = "minute_format")]
  pub recorded_for:      NaiveDateTime,
  #[serde(rename = "waste_weight")]
  pub weight_kg:         f64,
  pub waste_type:        String,
  pub material_category: String,
  pub destination:       String,
  #[serde(default)]
  pub panchayath:        Option<String>,
}

impl NewWasteLoad {
  /// Reject input that must never reach the store: blank required fields and
  /// non-positive or non-finite weights.
  ///
  /// The categorical fields are open string sets — any non-blank value is
  /// accepted, so new waste types, categories, and destinations entered
  /// through the UI never need a code change.
  pub fn validate(&self) -> Result<()> {
    if self.vehicle_number.trim().is_empty() {
      return Err(Error::EmptyField("vehicle_number"));
    }
    if self.waste_type.trim().is_empty() {
      return Err(Error::EmptyField("waste_type"));
    }
    if self.material_category.trim().is_empty() {
      return Err(Error::EmptyField("material_category"));
    }
    if self.destination.trim().is_empty() {
      return Err(Error::EmptyField("destination"));
    }
    if !self.weight_kg.is_finite() {
      return Err(Error::NonFiniteWeight);
    }
    if self.weight_kg <= 0.0 {
      return Err(Error::NonPositiveWeight(self.weight_kg));
    }
    Ok(())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
