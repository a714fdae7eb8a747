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

//! # QPX Results Parser
//!
//! Side-effect free parsing of QPX Express `trips.search` responses.
//! Reduces the verbose response to one [`TripOption`] per `trips.tripOption` entry.

use serde_json::Value;

use crate::error::{QpxError, Result};
use crate::qpx_vocabulary::split_currency_prefixed;

/// A simplified trip option.
#[derive(Debug, Clone, PartialEq)]
pub struct TripOption {
    /// Total price with the currency code stripped.
    pub sale_total: f64,
    pub currency: String,
}

/// A parsed `trips.search` response.
///
/// Owns the raw document it was built from and never modifies it.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    raw: Value,
    trip_options: Vec<TripOption>,
}

impl SearchResponse {
    pub fn from_value(raw: Value) -> Result<Self> {
        let options = trip_option_list(&raw)?;
        let trip_options = options
            .iter()
            .enumerate()
            .map(|(index, option)| parse_trip_option(index, option))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!("Parsed {} trip options", trip_options.len());
        Ok(Self { raw, trip_options })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Trip options in response order.
    pub fn trip_options(&self) -> &[TripOption] {
        &self.trip_options
    }

    pub fn count_of_trip_options(&self) -> usize {
        self.trip_options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trip_options.is_empty()
    }

    /// The lowest-priced option. Ties go to the earliest one.
    pub fn cheapest(&self) -> Option<&TripOption> {
        self.trip_options
            .iter()
            .reduce(|best, t| if t.sale_total < best.sale_total { t } else { best })
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

fn trip_option_list(raw: &Value) -> Result<&Vec<Value>> {
    let root = match raw {
        Value::Object(map) if !map.is_empty() => map,
        Value::Null => {
            return Err(QpxError::Structural("response is null".to_string()));
        }
        Value::Object(_) => {
            return Err(QpxError::Structural("response is empty".to_string()));
        }
        other => {
            return Err(QpxError::Structural(format!(
                "response must be an object, got {}",
                json_type_name(other)
            )));
        }
    };

    let trips = root
        .get("trips")
        .ok_or_else(|| QpxError::Structural("missing `trips`".to_string()))?;
    let options = trips
        .get("tripOption")
        .ok_or_else(|| QpxError::Structural("missing `trips.tripOption`".to_string()))?;

    options.as_array().ok_or_else(|| {
        QpxError::Structural(format!(
            "`trips.tripOption` must be an array, got {}",
            json_type_name(options)
        ))
    })
}

fn parse_trip_option(index: usize, option: &Value) -> Result<TripOption> {
    let Some(sale_total) = option.get("saleTotal").and_then(Value::as_str) else {
        return Err(QpxError::Parse {
            index,
            value: option
                .get("saleTotal")
                .map(Value::to_string)
                .unwrap_or_else(|| "<missing saleTotal>".to_string()),
        });
    };

    let (currency, amount) =
        split_currency_prefixed(sale_total).ok_or_else(|| QpxError::Parse {
            index,
            value: sale_total.to_string(),
        })?;

    Ok(TripOption {
        sale_total: amount,
        currency: currency.to_string(),
    })
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_sale_totals() {
        let raw = json!({
            "kind": "qpxExpress#tripsSearch",
            "trips": {
                "tripOption": [
                    {"saleTotal": "USD432.10"},
                    {"saleTotal": "USD99.99"}
                ]
            }
        });
        let response = SearchResponse::from_value(raw.clone()).unwrap();

        assert_eq!(response.count_of_trip_options(), 2);
        let totals: Vec<f64> = response.trip_options().iter().map(|t| t.sale_total).collect();
        assert_eq!(totals, vec![432.10, 99.99]);
        assert_eq!(response.trip_options()[0].currency, "USD");
        assert_eq!(response.raw(), &raw);
    }

    #[test]
    fn test_cheapest() {
        let response = SearchResponse::from_value(json!({
            "trips": {"tripOption": [
                {"saleTotal": "USD120.00"},
                {"saleTotal": "USD89.50"},
                {"saleTotal": "USD89.50"},
                {"saleTotal": "USD300.00"}
            ]}
        }))
        .unwrap();
        let cheapest = response.cheapest().unwrap();
        assert_eq!(cheapest.sale_total, 89.50);
        assert!(std::ptr::eq(cheapest, &response.trip_options()[1]));
    }

    #[test]
    fn test_malformed_price() {
        let err = SearchResponse::from_value(json!({
            "trips": {"tripOption": [{"saleTotal": "USD10.00"}, {"saleTotal": "USDabc"}]}
        }))
        .unwrap_err();
        match err {
            QpxError::Parse { index, value } => {
                assert_eq!(index, 1);
                assert_eq!(value, "USDabc");
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_or_non_string_sale_total() {
        let missing = SearchResponse::from_value(json!({"trips": {"tripOption": [{"id": "x"}]}}));
        assert!(matches!(missing, Err(QpxError::Parse { index: 0, .. })));

        let number = SearchResponse::from_value(json!({"trips": {"tripOption": [{"saleTotal": 12.5}]}}));
        assert!(matches!(number, Err(QpxError::Parse { index: 0, .. })));
    }

    #[test]
    fn test_structural_errors() {
        for raw in [
            Value::Null,
            json!({}),
            json!([]),
            json!({"kind": "qpxExpress#tripsSearch"}),
            json!({"trips": {"requestId": "abc"}}),
            json!({"trips": {"tripOption": {"saleTotal": "USD1.00"}}}),
        ] {
            let result = SearchResponse::from_value(raw.clone());
            assert!(
                matches!(result, Err(QpxError::Structural(_))),
                "{} should be a structural error",
                raw
            );
        }
    }

    #[test]
    fn test_empty_trip_option_list() {
        let response = SearchResponse::from_value(json!({"trips": {"tripOption": []}})).unwrap();
        assert_eq!(response.count_of_trip_options(), 0);
        assert!(response.is_empty());
        assert!(response.cheapest().is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            SearchResponse::from_json("<html>"),
            Err(QpxError::Json(_))
        ));
    }
}
