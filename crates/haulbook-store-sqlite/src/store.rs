//! [`SqliteStore`] — the SQLite implementation of [`LedgerStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};

use haulbook_core::{
  load::{NewWasteLoad, WasteLoad},
  organization::{Organization, OrganizationUpdate},
  store::{LedgerStore, LoadFilter},
};

use crate::{
  Error, Result,
  encode::{RawOrganization, RawWasteLoad, encode_dt, encode_minute},
  schema::SCHEMA,
};

const LOAD_COLUMNS: &str = "id, vehicle_number, recorded_for, weight_kg, \
   waste_type, material_category, destination, panchayath, created_at";

const ORGANIZATION_COLUMNS: &str =
  "id, name, description, logo_filename, created_at, updated_at";

// ─── Row readers ─────────────────────────────────────────────────────────────

fn read_load(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawWasteLoad> {
  Ok(RawWasteLoad {
    id:                row.get(0)?,
    vehicle_number:    row.get(1)?,
    recorded_for:      row.get(2)?,
    weight_kg:         row.get(3)?,
    waste_type:        row.get(4)?,
    material_category: row.get(5)?,
    destination:       row.get(6)?,
    panchayath:        row.get(7)?,
    created_at:        row.get(8)?,
  })
}

fn read_organization(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawOrganization> {
  Ok(RawOrganization {
    id:            row.get(0)?,
    name:          row.get(1)?,
    description:   row.get(2)?,
    logo_filename: row.get(3)?,
    created_at:    row.get(4)?,
    updated_at:    row.get(5)?,
  })
}

// ─── Filter translation ──────────────────────────────────────────────────────

/// Translate a [`LoadFilter`] into SQL conditions and bind values, one pair
/// per supplied criterion. Substring criteria compare lowercased on both
/// sides; range criteria are inclusive. The minute-precision text encoding
/// of `recorded_for` sorts chronologically, so the bounds compare on the raw
/// column.
fn filter_conditions(filter: &LoadFilter) -> (Vec<&'static str>, Vec<Value>) {
  let mut conds: Vec<&'static str> = Vec::new();
  let mut params: Vec<Value> = Vec::new();

  if let Some(v) = &filter.vehicle_number {
    conds.push("LOWER(vehicle_number) LIKE ?");
    params.push(Value::Text(format!("%{}%", v.to_lowercase())));
  }
  if let Some(from) = filter.recorded_from {
    conds.push("recorded_for >= ?");
    params.push(Value::Text(encode_minute(from)));
  }
  if let Some(until) = filter.recorded_until {
    conds.push("recorded_for <= ?");
    params.push(Value::Text(encode_minute(until)));
  }
  if let Some(min) = filter.weight_min {
    conds.push("weight_kg >= ?");
    params.push(Value::Real(min));
  }
  if let Some(max) = filter.weight_max {
    conds.push("weight_kg <= ?");
    params.push(Value::Real(max));
  }
  if let Some(t) = &filter.waste_type {
    conds.push("waste_type = ?");
    params.push(Value::Text(t.clone()));
  }
  if let Some(c) = &filter.material_category {
    conds.push("material_category = ?");
    params.push(Value::Text(c.clone()));
  }
  if let Some(d) = &filter.destination {
    conds.push("destination = ?");
    params.push(Value::Text(d.clone()));
  }
  if let Some(p) = &filter.panchayath {
    conds.push("LOWER(panchayath) LIKE ?");
    params.push(Value::Text(format!("%{}%", p.to_lowercase())));
  }

  (conds, params)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Haulbook ledger backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── LedgerStore impl ────────────────────────────────────────────────────────

impl LedgerStore for SqliteStore {
  type Error = Error;

  // ── Loads — append-only writes ────────────────────────────────────────────

  async fn record_load(&self, input: NewWasteLoad) -> Result<WasteLoad> {
    input.validate()?;

    let created_at = Utc::now();

    let vehicle_number    = input.vehicle_number.clone();
    let recorded_for_str  = encode_minute(input.recorded_for);
    let weight_kg         = input.weight_kg;
    let waste_type        = input.waste_type.clone();
    let material_category = input.material_category.clone();
    let destination       = input.destination.clone();
    let panchayath        = input.panchayath.clone();
    let created_at_str    = encode_dt(created_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO waste_loads (
             vehicle_number, recorded_for, weight_kg,
             waste_type, material_category, destination,
             panchayath, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            vehicle_number,
            recorded_for_str,
            weight_kg,
            waste_type,
            material_category,
            destination,
            panchayath,
            created_at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(WasteLoad {
      id,
      vehicle_number:    input.vehicle_number,
      recorded_for:      input.recorded_for,
      weight_kg:         input.weight_kg,
      waste_type:        input.waste_type,
      material_category: input.material_category,
      destination:       input.destination,
      panchayath:        input.panchayath,
      created_at,
    })
  }

  // ── Loads — reads ─────────────────────────────────────────────────────────

  async fn list_loads(&self) -> Result<Vec<WasteLoad>> {
    self.filter_loads(&LoadFilter::default()).await
  }

  async fn get_load(&self, id: i64) -> Result<Option<WasteLoad>> {
    let raw: Option<RawWasteLoad> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {LOAD_COLUMNS} FROM waste_loads WHERE id = ?1"),
              rusqlite::params![id],
              read_load,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawWasteLoad::into_load).transpose()
  }

  async fn filter_loads(&self, filter: &LoadFilter) -> Result<Vec<WasteLoad>> {
    let (conds, params) = filter_conditions(filter);

    let raws: Vec<RawWasteLoad> = self
      .conn
      .call(move |conn| {
        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        // Ties on the event time break by insertion order so iteration is
        // deterministic.
        let sql = format!(
          "SELECT {LOAD_COLUMNS} FROM waste_loads
           {where_clause}
           ORDER BY recorded_for DESC, id ASC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), read_load)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawWasteLoad::into_load).collect()
  }

  // ── Organization profile ──────────────────────────────────────────────────

  async fn organization(&self) -> Result<Option<Organization>> {
    let raw: Option<RawOrganization> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ORGANIZATION_COLUMNS} FROM organization
                 ORDER BY id ASC LIMIT 1"
              ),
              [],
              read_organization,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawOrganization::into_organization).transpose()
  }

  async fn save_organization(
    &self,
    input: OrganizationUpdate,
  ) -> Result<Organization> {
    input.validate()?;

    let name        = input.name;
    let description = input.description;
    let now_str     = encode_dt(Utc::now());

    // Read-then-update-or-insert runs as one closure on the store's single
    // connection, so two racing saves cannot both take the insert path.
    let raw: RawOrganization = self
      .conn
      .call(move |conn| {
        let existing: Option<i64> = conn
          .query_row(
            "SELECT id FROM organization ORDER BY id ASC LIMIT 1",
            [],
            |row| row.get(0),
          )
          .optional()?;

        let id = match existing {
          Some(id) => {
            conn.execute(
              "UPDATE organization
               SET name = ?1, description = ?2, updated_at = ?3
               WHERE id = ?4",
              rusqlite::params![name, description, now_str, id],
            )?;
            id
          }
          None => {
            conn.execute(
              "INSERT INTO organization
                 (name, description, logo_filename, created_at, updated_at)
               VALUES (?1, ?2, NULL, ?3, ?3)",
              rusqlite::params![name, description, now_str],
            )?;
            conn.last_insert_rowid()
          }
        };

        conn
          .query_row(
            &format!(
              "SELECT {ORGANIZATION_COLUMNS} FROM organization WHERE id = ?1"
            ),
            rusqlite::params![id],
            read_organization,
          )
          .map_err(Into::into)
      })
      .await?;

    raw.into_organization()
  }

  async fn set_organization_logo(
    &self,
    filename: String,
  ) -> Result<Organization> {
    let current = self
      .organization()
      .await?
      .ok_or(Error::OrganizationMissing)?;

    let id      = current.id;
    let now_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE organization SET logo_filename = ?1, updated_at = ?2
           WHERE id = ?3",
          rusqlite::params![filename, now_str, id],
        )?;
        Ok(())
      })
      .await?;

    self
      .organization()
      .await?
      .ok_or(Error::OrganizationMissing)
  }
}
