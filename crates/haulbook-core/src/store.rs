//! The `LedgerStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `haulbook-store-sqlite`). Higher layers (`haulbook-api`,
//! `haulbook-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use chrono::NaiveDateTime;

use crate::{
  load::{NewWasteLoad, WasteLoad},
  organization::{Organization, OrganizationUpdate},
};

// ─── Filter type ─────────────────────────────────────────────────────────────

/// Parameters for [`LedgerStore::filter_loads`].
///
/// Supplied criteria are combined as a conjunction; absent criteria impose no
/// constraint, so the default value selects the entire ledger. Every field
/// is already well-typed — lenient parsing of raw request input (dropping
/// malformed values) is the HTTP boundary's job, never this type's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadFilter {
  /// Case-insensitive, unanchored substring over `vehicle_number`.
  pub vehicle_number:    Option<String>,
  /// Inclusive lower bound on the event time.
  pub recorded_from:     Option<NaiveDateTime>,
  /// Inclusive upper bound on the event time.
  pub recorded_until:    Option<NaiveDateTime>,
  /// Inclusive lower bound on the weight in kilograms.
  pub weight_min:        Option<f64>,
  /// Inclusive upper bound on the weight in kilograms.
  pub weight_max:        Option<f64>,
  /// Exact match.
  pub waste_type:        Option<String>,
  /// Exact match.
  pub material_category: Option<String>,
  /// Exact match.
  pub destination:       Option<String>,
  /// Case-insensitive, unanchored substring over `panchayath`.
  pub panchayath:        Option<String>,
}

impl LoadFilter {
  /// `true` when no criterion is set, i.e. the filter selects everything.
  pub fn is_empty(&self) -> bool {
    self == &Self::default()
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Haulbook ledger backend.
///
/// Waste-load writes are append-only inserts; records are never updated or
/// deleted. The organization profile is a single row maintained by upsert.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LedgerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Loads — append-only writes ────────────────────────────────────────

  /// Persist a new load and return the stored record. The `id` and
  /// `created_at` fields are assigned by the store; the insert is
  /// all-or-nothing.
  fn record_load(
    &self,
    input: NewWasteLoad,
  ) -> impl Future<Output = Result<WasteLoad, Self::Error>> + Send + '_;

  // ── Loads — reads ─────────────────────────────────────────────────────

  /// The full ledger, most recent event first (ties broken by insertion
  /// order, `id` ascending).
  fn list_loads(
    &self,
  ) -> impl Future<Output = Result<Vec<WasteLoad>, Self::Error>> + Send + '_;

  /// Retrieve a single load by id. Returns `None` if not found.
  fn get_load(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<WasteLoad>, Self::Error>> + Send + '_;

  /// The subset of the ledger satisfying every criterion in `filter`, in
  /// the same order as [`LedgerStore::list_loads`].
  fn filter_loads<'a>(
    &'a self,
    filter: &'a LoadFilter,
  ) -> impl Future<Output = Result<Vec<WasteLoad>, Self::Error>> + Send + 'a;

  // ── Organization profile ──────────────────────────────────────────────

  /// The current profile, if one has been created.
  fn organization(
    &self,
  ) -> impl Future<Output = Result<Option<Organization>, Self::Error>> + Send + '_;

  /// Create the profile, or update the existing one in place. At most one
  /// profile row ever exists; `updated_at` refreshes on every call while
  /// `created_at` is preserved.
  fn save_organization(
    &self,
    input: OrganizationUpdate,
  ) -> impl Future<Output = Result<Organization, Self::Error>> + Send + '_;

  /// Attach a stored logo file to the profile. Errors if no profile exists.
  fn set_organization_logo(
    &self,
    filename: String,
  ) -> impl Future<Output = Result<Organization, Self::Error>> + Send + '_;
}
