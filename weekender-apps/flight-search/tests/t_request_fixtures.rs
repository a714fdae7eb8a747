//!  Weekender Flight Search
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Fixture-based request document tests.
//!
//! Compares built documents with known-good JSON bodies and validates them
//! against the request JSON Schema.
//!
//! Run with:
//!     cargo test --test t_request_fixtures

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use weekender_flight_search::{
    Cabin, Money, SearchRequestDocument, TimeOfDayRange, TripQuery, upcoming_weekends,
};

fn load_json(relative: &str) -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(relative);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("failed to parse JSON: {}", e))
}

fn validate_json_schema(instance: &Value, schema: &Value) -> Result<(), String> {
    let validator = jsonschema::Validator::new(schema)
        .map_err(|e| format!("Failed to create validator: {}", e))?;

    let errors: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("\n"))
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn hh_mm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn weekend_query() -> TripQuery {
    TripQuery::builder("SFO".to_string(), "LAS".to_string(), date(2017, 1, 27))
        .return_date(date(2017, 1, 29))
        .departure_time_window(TimeOfDayRange::after(hh_mm(17, 0)))
        .return_time_window(TimeOfDayRange::before(hh_mm(21, 0)))
        .build()
        .expect("weekend query should build")
}

/// Friday evening out, Sunday evening back: the exact body sent to the service.
#[test]
fn test_weekend_request_matches_fixture() {
    let expected = load_json("tests/fixtures-requests/weekend_sfo_las.json");

    let doc = weekend_query().to_search_request().expect("should build");
    let actual = doc.to_value().expect("should serialize");

    assert_eq!(
        actual,
        expected,
        "built document:\n{}",
        doc.to_json_pretty().unwrap()
    );
    println!("Weekend SFO/LAS request matches fixture - OK");
}

/// The same query from the weekend planner yields the same body.
#[test]
fn test_planner_query_matches_fixture() {
    let expected = load_json("tests/fixtures-requests/weekend_sfo_las.json");

    let weekend = upcoming_weekends(date(2017, 1, 25), 1)[0];
    let query = weekend
        .trip_query("SFO".to_string(), "LAS".to_string())
        .departure_time_window(TimeOfDayRange::after(hh_mm(17, 0)))
        .return_time_window(TimeOfDayRange::before(hh_mm(21, 0)))
        .build()
        .expect("planner query should build");

    assert_eq!(query.to_search_request().unwrap().to_value().unwrap(), expected);
    println!("Planner query matches fixture - OK");
}

/// The fixture deserializes back into the typed document.
#[test]
fn test_fixture_deserializes() {
    let expected = load_json("tests/fixtures-requests/weekend_sfo_las.json");
    let doc: SearchRequestDocument =
        serde_json::from_value(expected).expect("fixture should deserialize");

    assert_eq!(doc, weekend_query().to_search_request().unwrap());
    assert_eq!(doc.request.max_price, Money::default());
}

/// Every shape of query produces a schema-valid document.
#[test]
fn test_documents_validate_against_schema() {
    let schema = load_json("tests/fixtures-requests/search_request.schema.json");
    let base = TripQuery::builder("LAX".to_string(), "JFK".to_string(), date(2026, 11, 6));

    let queries = vec![
        ("one-way defaults", base.clone().build().unwrap()),
        (
            "round trip business",
            base.clone()
                .return_date(date(2026, 11, 8))
                .preferred_cabin(Cabin::Business)
                .build()
                .unwrap(),
        ),
        (
            "family premium coach",
            base.clone()
                .adult_count(4)
                .preferred_cabin(Cabin::PremiumCoach)
                .max_stops(2)
                .max_price("EUR2500".parse().unwrap())
                .sale_country("FR".to_string())
                .ticketing_country("FR".to_string())
                .refundable(true)
                .max_solutions(20)
                .build()
                .unwrap(),
        ),
        ("weekend windows", weekend_query()),
    ];

    for (name, query) in queries {
        let value = query.to_search_request().unwrap().to_value().unwrap();
        if let Err(errors) = validate_json_schema(&value, &schema) {
            panic!("{}: schema validation failed:\n{}", name, errors);
        }
        println!("{} validates - OK", name);
    }
}

/// A document missing required fields is rejected by the schema itself.
#[test]
fn test_schema_rejects_incomplete_document() {
    let schema = load_json("tests/fixtures-requests/search_request.schema.json");
    let mut value = weekend_query().to_search_request().unwrap().to_value().unwrap();
    value["request"]
        .as_object_mut()
        .unwrap()
        .remove("saleCountry");

    assert!(validate_json_schema(&value, &schema).is_err());
}
