mod common;

use common::{attrs, seeded_repo};
use pretty_assertions::assert_eq;
use recall_model::{RecordType, RelationshipOptions};
use recall_store::{Queryable, Repository, StoreError};
use recall_types::{Dataset, Identity};
use serde_json::json;
use std::sync::Arc;

fn names(records: &[recall_model::SharedRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.get_str("name").unwrap_or_default().to_owned())
        .collect()
}

// ── has-many ─────────────────────────────────────────────────────

#[test]
fn has_many_scans_by_foreign_key_and_sorts() {
    let repo = seeded_repo();
    let car = repo.find("Car", &Identity::from("1")).unwrap();

    let passengers = repo.related_all(&car, "passengers").unwrap();
    assert_eq!(names(&passengers), vec!["Bertrand", "Gavin", "Helen"]);
}

#[test]
fn has_many_reflects_later_merges() {
    let mut repo = seeded_repo();
    let car = repo.find("Car", &Identity::from("1")).unwrap();
    assert_eq!(repo.related_all(&car, "passengers").unwrap().len(), 3);

    repo.merge(Dataset::new().with(
        "Passenger",
        "60",
        attrs(json!({ "car_id": 1, "name": "Alice" })),
    ))
    .unwrap();

    let passengers = repo.related_all(&car, "passengers").unwrap();
    assert_eq!(names(&passengers), vec!["Alice", "Bertrand", "Gavin", "Helen"]);
}

#[test]
fn has_many_is_empty_when_nothing_points_back() {
    let repo = seeded_repo();
    let car = repo.find("Car", &Identity::from("99")).unwrap();
    assert!(repo.related_all(&car, "passengers").unwrap().is_empty());
}

// ── belongs-to ───────────────────────────────────────────────────

#[test]
fn belongs_to_returns_the_identity_mapped_instance() {
    let repo = seeded_repo();
    let passenger = repo.find("Passenger", &Identity::from("2")).unwrap();

    let car = repo.related_one(&passenger, "car").unwrap().unwrap();
    let direct = repo.find("Car", &Identity::from("1")).unwrap();
    assert!(Arc::ptr_eq(&car, &direct));
}

#[test]
fn belongs_to_with_a_missing_foreign_key_is_absent() {
    let mut repo = seeded_repo();
    repo.merge(Dataset::new().with("Passenger", "70", attrs(json!({ "name": "Walker" }))))
        .unwrap();
    let walker = repo.find("Passenger", &Identity::from("70")).unwrap();
    assert!(repo.related_one(&walker, "car").unwrap().is_none());
}

#[test]
fn belongs_to_honors_explicit_type_and_foreign_key() {
    let repo = seeded_repo();
    let passenger = repo.find("Passenger", &Identity::from("33")).unwrap();

    let thought = repo.related_one(&passenger, "thought").unwrap().unwrap();
    let opinion = repo.related_one(&passenger, "opinion").unwrap().unwrap();
    assert!(Arc::ptr_eq(&thought, &opinion));
    assert_eq!(thought.get_str("body"), Some("We should turn right"));
}

// ── has-one ──────────────────────────────────────────────────────

#[test]
fn has_one_finds_the_record_pointing_back() {
    let repo = seeded_repo();
    let car = repo.find("Car", &Identity::from("1")).unwrap();

    let driver = repo.related_one(&car, "driver").unwrap().unwrap();
    assert_eq!(driver.get_str("name"), Some("Nathan"));
}

#[test]
fn has_one_is_absent_when_nothing_points_back() {
    let mut repo = seeded_repo();
    repo.merge(Dataset::new().with("Car", "500", attrs(json!({ "maker": "Fiat" }))))
        .unwrap();
    let car = repo.find("Car", &Identity::from("500")).unwrap();
    assert!(repo.related_one(&car, "driver").unwrap().is_none());
}

// ── has-many-through ─────────────────────────────────────────────

#[test]
fn through_maps_each_intermediate_in_order() {
    let repo = seeded_repo();
    let car = repo.find("Car", &Identity::from("1")).unwrap();

    // Passengers sort Bertrand, Gavin, Helen → opinions 2, 1, 3.
    let opinions = repo.related_all(&car, "opinions").unwrap();
    let ids: Vec<String> = opinions.iter().map(|o| o.id.to_string()).collect();
    assert_eq!(ids, vec!["2", "1", "3"]);
}

#[test]
fn through_with_an_explicit_source_matches_the_implicit_one() {
    let repo = seeded_repo();
    let car = repo.find("Car", &Identity::from("1")).unwrap();

    let opinions = repo.related_all(&car, "opinions").unwrap();
    let thoughts = repo.related_all(&car, "thoughts").unwrap();
    assert_eq!(opinions.len(), thoughts.len());
    for (a, b) in opinions.iter().zip(thoughts.iter()) {
        assert!(Arc::ptr_eq(a, b));
    }
}

#[test]
fn through_skips_intermediates_with_an_absent_source() {
    let mut repo = seeded_repo();
    repo.merge(Dataset::new().with(
        "Passenger",
        "80",
        attrs(json!({ "car_id": 1, "name": "Aaron" })),
    ))
    .unwrap();
    let car = repo.find("Car", &Identity::from("1")).unwrap();

    // Aaron sorts first but has no opinion_id; the result stays 3 long.
    let opinions = repo.related_all(&car, "opinions").unwrap();
    assert_eq!(opinions.len(), 3);
}

// ── Lazy validation ──────────────────────────────────────────────

#[test]
fn unknown_association_names_fail_with_unresolved() {
    let repo = seeded_repo();
    let car = repo.find("Car", &Identity::from("1")).unwrap();
    let err = repo.relation(&car, "wheels").unwrap_err();
    assert!(matches!(err, StoreError::UnresolvedAssociation { ref name, .. } if name == "wheels"));
}

#[test]
fn forward_references_are_legal_until_traversed() {
    let mut repo = Repository::new();
    repo.register(
        RecordType::new("Garage", "/garages").has_many("cycles", RelationshipOptions::none()),
    )
    .unwrap();
    repo.merge(Dataset::new().with("Garage", "1", attrs(json!({}))))
        .unwrap();
    let garage = repo.find("Garage", &Identity::from("1")).unwrap();

    // Declared fine, but the target type is not registered yet.
    let err = repo.relation(&garage, "cycles").unwrap_err();
    assert!(
        matches!(err, StoreError::UnresolvedAssociation { ref name, ref reason }
            if name == "cycles" && reason.contains("Cycle"))
    );

    // Registering the target afterwards makes the same traversal work.
    repo.register(RecordType::new("Cycle", "/cycles")).unwrap();
    assert!(repo.related_all(&garage, "cycles").unwrap().is_empty());
}

#[test]
fn traversal_never_caches_resolution_failures() {
    let mut repo = Repository::new();
    repo.register(
        RecordType::new("Garage", "/garages").has_one("owner", RelationshipOptions::none()),
    )
    .unwrap();
    repo.merge(Dataset::new().with("Garage", "1", attrs(json!({}))))
        .unwrap();
    let garage = repo.find("Garage", &Identity::from("1")).unwrap();

    assert!(repo.relation(&garage, "owner").is_err());

    repo.register(RecordType::new("Owner", "/owners")).unwrap();
    repo.merge(Dataset::new().with("Owner", "5", attrs(json!({ "garage_id": 1, "name": "Sam" }))))
        .unwrap();

    let owner = repo.related_one(&garage, "owner").unwrap().unwrap();
    assert_eq!(owner.get_str("name"), Some("Sam"));
}
