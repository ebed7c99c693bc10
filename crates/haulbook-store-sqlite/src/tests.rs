//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use haulbook_core::{
  load::{NewWasteLoad, minute_format},
  organization::OrganizationUpdate,
  report::{ChartData, LoadSummary},
  store::{LedgerStore, LoadFilter},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn minute(s: &str) -> NaiveDateTime {
  NaiveDateTime::parse_from_str(s, minute_format::FORMAT).expect("minute timestamp")
}

fn load_input(
  vehicle: &str,
  at: &str,
  weight_kg: f64,
  waste_type: &str,
) -> NewWasteLoad {
  NewWasteLoad {
    vehicle_number:    vehicle.into(),
    recorded_for:      minute(at),
    weight_kg,
    waste_type:        waste_type.into(),
    material_category: "mixed".into(),
    destination:       "landfill".into(),
    panchayath:        None,
  }
}

/// A small fixed ledger: an organic load on V1 and a plastic load on V2 the
/// next day.
async fn seed_scenario_ledger(s: &SqliteStore) -> (i64, i64) {
  let organic = s
    .record_load(NewWasteLoad {
      vehicle_number:    "V1".into(),
      recorded_for:      minute("2024-01-01T08:00"),
      weight_kg:         100.0,
      waste_type:        "organic".into(),
      material_category: "biodegradable".into(),
      destination:       "composting plant".into(),
      panchayath:        Some("Kakkodi".into()),
    })
    .await
    .unwrap();

  let plastic = s
    .record_load(NewWasteLoad {
      vehicle_number:    "V2".into(),
      recorded_for:      minute("2024-01-02T09:00"),
      weight_kg:         50.0,
      waste_type:        "plastic".into(),
      material_category: "recyclable".into(),
      destination:       "recycler".into(),
      panchayath:        None,
    })
    .await
    .unwrap();

  (organic.id, plastic.id)
}

// ─── Recording ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_load_and_retrieve() {
  let s = store().await;

  let stored = s
    .record_load(NewWasteLoad {
      vehicle_number:    "KL-07-1234".into(),
      recorded_for:      minute("2024-03-15T14:45"),
      weight_kg:         321.5,
      waste_type:        "e-waste".into(),
      material_category: "hazardous".into(),
      destination:       "treatment facility".into(),
      panchayath:        Some("Olavanna".into()),
    })
    .await
    .unwrap();

  let fetched = s.get_load(stored.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, stored.id);
  assert_eq!(fetched.vehicle_number, "KL-07-1234");
  assert_eq!(fetched.recorded_for, minute("2024-03-15T14:45"));
  assert_eq!(fetched.weight_kg, 321.5);
  assert_eq!(fetched.waste_type, "e-waste");
  assert_eq!(fetched.material_category, "hazardous");
  assert_eq!(fetched.destination, "treatment facility");
  assert_eq!(fetched.panchayath.as_deref(), Some("Olavanna"));
  assert_eq!(fetched.created_at, stored.created_at);
}

#[tokio::test]
async fn get_load_missing_returns_none() {
  let s = store().await;
  assert!(s.get_load(999).await.unwrap().is_none());
}

#[tokio::test]
async fn record_load_rejects_invalid_input() {
  let s = store().await;

  let mut input = load_input("V1", "2024-01-01T08:00", 10.0, "organic");
  input.vehicle_number = "  ".into();
  let err = s.record_load(input).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(haulbook_core::Error::EmptyField("vehicle_number"))
  ));

  let input = load_input("V1", "2024-01-01T08:00", -5.0, "organic");
  let err = s.record_load(input).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(haulbook_core::Error::NonPositiveWeight(_))
  ));

  // Nothing was persisted by the rejected submissions.
  assert!(s.list_loads().await.unwrap().is_empty());
}

// ─── Ordering ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_loads_orders_by_event_time_descending() {
  let s = store().await;

  s.record_load(load_input("V1", "2024-01-02T08:00", 10.0, "organic"))
    .await
    .unwrap();
  s.record_load(load_input("V2", "2024-01-03T08:00", 10.0, "organic"))
    .await
    .unwrap();
  s.record_load(load_input("V3", "2024-01-01T08:00", 10.0, "organic"))
    .await
    .unwrap();

  let all = s.list_loads().await.unwrap();
  let vehicles: Vec<&str> =
    all.iter().map(|l| l.vehicle_number.as_str()).collect();
  assert_eq!(vehicles, ["V2", "V1", "V3"]);
}

#[tokio::test]
async fn equal_event_times_order_by_insertion() {
  let s = store().await;

  let first = s
    .record_load(load_input("V1", "2024-01-01T08:00", 10.0, "organic"))
    .await
    .unwrap();
  let second = s
    .record_load(load_input("V2", "2024-01-01T08:00", 10.0, "organic"))
    .await
    .unwrap();

  let all = s.list_loads().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].id, first.id);
  assert_eq!(all[1].id, second.id);
}

// ─── Filtering ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_filter_returns_entire_ledger() {
  let s = store().await;
  seed_scenario_ledger(&s).await;

  let all = s.list_loads().await.unwrap();
  let filtered = s.filter_loads(&LoadFilter::default()).await.unwrap();

  assert_eq!(all.len(), 2);
  let ids =
    |loads: &[haulbook_core::load::WasteLoad]| -> Vec<i64> {
      loads.iter().map(|l| l.id).collect()
    };
  assert_eq!(ids(&all), ids(&filtered));
}

#[tokio::test]
async fn filter_by_waste_type_exact_match() {
  // Only the organic record matches, and aggregating the filtered set sums
  // exactly its weight.
  let s = store().await;
  let (organic_id, _) = seed_scenario_ledger(&s).await;

  let filtered = s
    .filter_loads(&LoadFilter {
      waste_type: Some("organic".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(filtered.len(), 1);
  assert_eq!(filtered[0].id, organic_id);

  let summary = LoadSummary::compute(&filtered);
  assert_eq!(summary.total_weight_kg, 100.0);

  let charts = ChartData::compute(&filtered);
  assert_eq!(charts.weight_by_waste_type["organic"], 100.0);
  assert!(!charts.count_by_waste_type.contains_key("plastic"));
}

#[tokio::test]
async fn filter_by_weight_range_is_inclusive() {
  // weight_min=60, weight_max=200 keeps only the 100 kg record.
  let s = store().await;
  let (organic_id, _) = seed_scenario_ledger(&s).await;

  let filtered = s
    .filter_loads(&LoadFilter {
      weight_min: Some(60.0),
      weight_max: Some(200.0),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(filtered.len(), 1);
  assert_eq!(filtered[0].id, organic_id);

  // Bounds are inclusive at both ends.
  let exact = s
    .filter_loads(&LoadFilter {
      weight_min: Some(100.0),
      weight_max: Some(100.0),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(exact.len(), 1);
  assert_eq!(exact[0].id, organic_id);
}

#[tokio::test]
async fn filter_by_vehicle_substring_is_case_insensitive() {
  // "v1" matches "V1" anywhere in the field.
  let s = store().await;
  let (organic_id, _) = seed_scenario_ledger(&s).await;

  let filtered = s
    .filter_loads(&LoadFilter {
      vehicle_number: Some("v1".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(filtered.len(), 1);
  assert_eq!(filtered[0].id, organic_id);
}

#[tokio::test]
async fn filter_by_panchayath_substring_is_case_insensitive() {
  let s = store().await;
  let (organic_id, _) = seed_scenario_ledger(&s).await;

  let filtered = s
    .filter_loads(&LoadFilter {
      panchayath: Some("kakk".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(filtered.len(), 1);
  assert_eq!(filtered[0].id, organic_id);
}

#[tokio::test]
async fn filter_by_event_time_range_is_inclusive() {
  let s = store().await;
  let (organic_id, plastic_id) = seed_scenario_ledger(&s).await;

  // Bounds landing exactly on the record's event time still match it.
  let filtered = s
    .filter_loads(&LoadFilter {
      recorded_from:  Some(minute("2024-01-01T08:00")),
      recorded_until: Some(minute("2024-01-01T08:00")),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(filtered.len(), 1);
  assert_eq!(filtered[0].id, organic_id);

  let both = s
    .filter_loads(&LoadFilter {
      recorded_from: Some(minute("2024-01-01T00:00")),
      ..Default::default()
    })
    .await
    .unwrap();
  let ids: Vec<i64> = both.iter().map(|l| l.id).collect();
  assert_eq!(ids, [plastic_id, organic_id]);
}

#[tokio::test]
async fn combined_criteria_are_a_conjunction() {
  let s = store().await;
  seed_scenario_ledger(&s).await;
  s.record_load(load_input("V1-spare", "2024-01-05T10:00", 40.0, "organic"))
    .await
    .unwrap();

  let by_vehicle = LoadFilter {
    vehicle_number: Some("v1".into()),
    ..Default::default()
  };
  let by_type = LoadFilter {
    waste_type: Some("organic".into()),
    ..Default::default()
  };
  let by_weight = LoadFilter {
    weight_min: Some(60.0),
    ..Default::default()
  };
  let combined = LoadFilter {
    vehicle_number: Some("v1".into()),
    waste_type: Some("organic".into()),
    weight_min: Some(60.0),
    ..Default::default()
  };

  let id_set = |loads: Vec<haulbook_core::load::WasteLoad>| -> HashSet<i64> {
    loads.into_iter().map(|l| l.id).collect()
  };

  let intersection: HashSet<i64> =
    id_set(s.filter_loads(&by_vehicle).await.unwrap())
      .intersection(&id_set(s.filter_loads(&by_type).await.unwrap()))
      .copied()
      .collect::<HashSet<i64>>()
      .intersection(&id_set(s.filter_loads(&by_weight).await.unwrap()))
      .copied()
      .collect();

  let together = id_set(s.filter_loads(&combined).await.unwrap());
  assert_eq!(together, intersection);
  assert_eq!(together.len(), 1);
}

#[tokio::test]
async fn filter_with_no_matches_returns_empty_not_error() {
  let s = store().await;
  seed_scenario_ledger(&s).await;

  let filtered = s
    .filter_loads(&LoadFilter {
      destination: Some("nowhere".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(filtered.is_empty());

  // Aggregating the empty result is not an error either.
  let summary = LoadSummary::compute(&filtered);
  assert_eq!(summary.total_loads, 0);
  assert_eq!(summary.total_weight_kg, 0.0);
}

// ─── Organization profile ────────────────────────────────────────────────────

#[tokio::test]
async fn organization_is_absent_until_first_save() {
  let s = store().await;
  assert!(s.organization().await.unwrap().is_none());
}

#[tokio::test]
async fn save_organization_creates_then_updates_single_row() {
  // Two saves with different names leave exactly one profile, holding the
  // second name.
  let s = store().await;

  let first = s
    .save_organization(OrganizationUpdate {
      name:        "Green Works".into(),
      description: Some("municipal waste operator".into()),
    })
    .await
    .unwrap();

  let second = s
    .save_organization(OrganizationUpdate {
      name:        "Green Works Cooperative".into(),
      description: None,
    })
    .await
    .unwrap();

  assert_eq!(second.id, first.id);
  assert_eq!(second.name, "Green Works Cooperative");
  assert_eq!(second.description, None);
  assert_eq!(second.created_at, first.created_at);
  assert!(second.updated_at >= first.updated_at);

  let current = s.organization().await.unwrap().unwrap();
  assert_eq!(current.id, first.id);
  assert_eq!(current.name, "Green Works Cooperative");
}

#[tokio::test]
async fn save_organization_rejects_blank_name() {
  let s = store().await;
  let err = s
    .save_organization(OrganizationUpdate {
      name:        "   ".into(),
      description: None,
    })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(haulbook_core::Error::EmptyField("name"))
  ));
  assert!(s.organization().await.unwrap().is_none());
}

#[tokio::test]
async fn set_logo_requires_existing_profile() {
  let s = store().await;
  let err = s
    .set_organization_logo("logo.png".into())
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::OrganizationMissing));
}

#[tokio::test]
async fn set_logo_updates_profile() {
  let s = store().await;
  s.save_organization(OrganizationUpdate {
    name:        "Green Works".into(),
    description: None,
  })
  .await
  .unwrap();

  let updated = s
    .set_organization_logo("8f14e45f.png".into())
    .await
    .unwrap();
  assert_eq!(updated.logo_filename.as_deref(), Some("8f14e45f.png"));

  let current = s.organization().await.unwrap().unwrap();
  assert_eq!(current.logo_filename.as_deref(), Some("8f14e45f.png"));
}
