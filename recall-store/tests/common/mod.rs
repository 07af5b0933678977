//! Shared fixtures: a small fleet domain exercising all four
//! relationship kinds.

#![allow(dead_code)]

use recall_model::{RecordType, RelationshipOptions};
use recall_store::Repository;
use recall_types::{AttrMap, Dataset};
use serde_json::json;

pub fn attrs(value: serde_json::Value) -> AttrMap {
    value.as_object().cloned().unwrap()
}

/// Registers Car, Driver, Passenger, and Opinion with their associations.
pub fn fleet_repo() -> Repository {
    let mut repo = Repository::new();
    repo.register(
        RecordType::new("Car", "/cars")
            .has_one("driver", RelationshipOptions::none())
            .has_many("passengers", RelationshipOptions::none().ordered_by("name"))
            .has_many_through("opinions", "passengers", RelationshipOptions::none())
            .has_many_through(
                "thoughts",
                "passengers",
                RelationshipOptions::none().with_source("opinion"),
            ),
    )
    .unwrap();
    repo.register(
        RecordType::new("Driver", "/drivers").belongs_to("car", RelationshipOptions::none()),
    )
    .unwrap();
    repo.register(
        RecordType::new("Passenger", "/passengers")
            .belongs_to("car", RelationshipOptions::none())
            .belongs_to("opinion", RelationshipOptions::none())
            .belongs_to(
                "thought",
                RelationshipOptions::none()
                    .with_type("Opinion")
                    .with_foreign_key("opinion_id"),
            ),
    )
    .unwrap();
    repo.register(RecordType::new("Opinion", "/opinions"))
        .unwrap();
    repo
}

/// The seed dataset merged by [`seeded_repo`]. Passenger rows are
/// deliberately out of name order so sorting is observable.
pub fn seed_dataset() -> Dataset {
    Dataset::new()
        .with("Car", "1", attrs(json!({ "maker": "Chrysler", "color": "chartreuse" })))
        .with("Car", "99", attrs(json!({ "maker": "Renault", "color": "aqua" })))
        .with("Driver", "1", attrs(json!({ "car_id": 1, "name": "Nathan" })))
        .with("Driver", "2", attrs(json!({ "car_id": 99, "name": "Barbara" })))
        .with(
            "Passenger",
            "2",
            attrs(json!({ "car_id": 1, "opinion_id": 1, "age": 25, "gender": "male", "name": "Gavin" })),
        )
        .with(
            "Passenger",
            "33",
            attrs(json!({ "car_id": 1, "opinion_id": 2, "age": 25, "gender": "male", "name": "Bertrand" })),
        )
        .with(
            "Passenger",
            "44",
            attrs(json!({ "car_id": 1, "opinion_id": 3, "age": 18, "gender": "female", "name": "Helen" })),
        )
        .with("Opinion", "1", attrs(json!({ "body": "We should turn left" })))
        .with("Opinion", "2", attrs(json!({ "body": "We should turn right" })))
        .with("Opinion", "3", attrs(json!({ "body": "You're driving too fast" })))
}

/// A fleet repository with the seed dataset already merged.
pub fn seeded_repo() -> Repository {
    let mut repo = fleet_repo();
    repo.merge(seed_dataset()).unwrap();
    repo
}
