//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Event times are stored in the minute-precision `YYYY-MM-DDTHH:MM` form;
//! record timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, NaiveDateTime, Utc};
use haulbook_core::{
  load::{WasteLoad, minute_format},
  organization::Organization,
};

use crate::{Error, Result};

// ─── Event time (minute precision) ───────────────────────────────────────────

pub fn encode_minute(dt: NaiveDateTime) -> String {
  dt.format(minute_format::FORMAT).to_string()
}

pub fn decode_minute(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, minute_format::FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `waste_loads` row.
pub struct RawWasteLoad {
  pub id:                i64,
  pub vehicle_number:    String,
  pub recorded_for:      String,
  pub weight_kg:         f64,
  pub waste_type:        String,
  pub material_category: String,
  pub destination:       String,
  pub panchayath:        Option<String>,
  pub created_at:        String,
}

impl RawWasteLoad {
  pub fn into_load(self) -> Result<WasteLoad> {
    Ok(WasteLoad {
      id:                self.id,
      vehicle_number:    self.vehicle_number,
      recorded_for:      decode_minute(&self.recorded_for)?,
      weight_kg:         self.weight_kg,
      waste_type:        self.waste_type,
      material_category: self.material_category,
      destination:       self.destination,
      panchayath:        self.panchayath,
      created_at:        decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from the `organization` row.
pub struct RawOrganization {
  pub id:            i64,
  pub name:          String,
  pub description:   Option<String>,
  pub logo_filename: Option<String>,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawOrganization {
  pub fn into_organization(self) -> Result<Organization> {
    Ok(Organization {
      id:            self.id,
      name:          self.name,
      description:   self.description,
      logo_filename: self.logo_filename,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}
