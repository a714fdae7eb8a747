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

//! # QPX Query Builder
//!
//! Side-effect free request building for QPX Express `trips.search`.
//! This module turns a validated [`TripQuery`] into the nested JSON document
//! the service expects.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{QpxError, Result};
use crate::qpx_vocabulary::{
    is_plain_decimal, CURRENCY_CODE_LEN, KIND_PASSENGER_COUNTS, KIND_SLICE_INPUT,
    KIND_TIME_OF_DAY_RANGE, TIME_OF_DAY_FORMAT,
};

// =============================================================================
// Trip parameters
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cabin {
    #[default]
    Coach,
    PremiumCoach,
    Business,
    First,
}

impl Cabin {
    pub fn from_str_name(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "coach" | "economy" | "e" => Some(Cabin::Coach),
            "premium_coach" | "premium coach" | "premium_economy" | "premium" | "pe" => {
                Some(Cabin::PremiumCoach)
            }
            "business" | "b" => Some(Cabin::Business),
            "first" | "f" => Some(Cabin::First),
            _ => None,
        }
    }

    pub fn as_str_name(&self) -> &'static str {
        match self {
            Cabin::Coach => "COACH",
            Cabin::PremiumCoach => "PREMIUM_COACH",
            Cabin::Business => "BUSINESS",
            Cabin::First => "FIRST",
        }
    }
}

/// A price ceiling such as `USD1000.00`.
///
/// Kept as a (currency, amount) pair. The amount keeps the decimal text it
/// was given so the ceiling goes back on the wire exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    currency: String,
    amount: String,
}

impl Money {
    pub fn new(currency: &str, amount: &str) -> Result<Self> {
        if currency.len() != CURRENCY_CODE_LEN || !currency.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(QpxError::Validation(format!(
                "currency must be a 3-letter code, got {:?}",
                currency
            )));
        }
        if !is_plain_decimal(amount) {
            return Err(QpxError::Validation(format!(
                "amount must be a plain non-negative decimal like 1000.00, got {:?}",
                amount
            )));
        }
        Ok(Self {
            currency: currency.to_ascii_uppercase(),
            amount: amount.to_string(),
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The amount as written, e.g. `1000.00`.
    pub fn amount(&self) -> &str {
        &self.amount
    }
}

impl Default for Money {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            amount: "1000.00".to_string(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency, self.amount)
    }
}

impl FromStr for Money {
    type Err = QpxError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match (s.get(..CURRENCY_CODE_LEN), s.get(CURRENCY_CODE_LEN..)) {
            (Some(currency), Some(amount)) => Money::new(currency, amount),
            _ => Err(QpxError::Validation(format!(
                "expected a price like USD1000.00, got {:?}",
                s
            ))),
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Allowed departure times for one slice, serialized as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayRange {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time_of_day")]
    pub earliest_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time_of_day")]
    pub latest_time: Option<NaiveTime>,
}

impl TimeOfDayRange {
    pub fn between(earliest: Option<NaiveTime>, latest: Option<NaiveTime>) -> Self {
        Self {
            kind: KIND_TIME_OF_DAY_RANGE.to_string(),
            earliest_time: earliest,
            latest_time: latest,
        }
    }

    pub fn after(earliest: NaiveTime) -> Self {
        Self::between(Some(earliest), None)
    }

    pub fn before(latest: NaiveTime) -> Self {
        Self::between(None, Some(latest))
    }

    fn validate(&self, label: &str) -> Result<()> {
        match (self.earliest_time, self.latest_time) {
            (None, None) => Err(QpxError::Validation(format!(
                "{} time window needs an earliest or latest time",
                label
            ))),
            (Some(earliest), Some(latest)) if earliest > latest => {
                Err(QpxError::Validation(format!(
                    "{} time window is inverted ({} > {})",
                    label,
                    earliest.format(TIME_OF_DAY_FORMAT),
                    latest.format(TIME_OF_DAY_FORMAT)
                )))
            }
            _ => Ok(()),
        }
    }
}

mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::qpx_vocabulary::TIME_OF_DAY_FORMAT;

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.collect_str(&t.format(TIME_OF_DAY_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| NaiveTime::parse_from_str(&s, TIME_OF_DAY_FORMAT))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

/// Parameters of one `trips.search` call.
///
/// Obtain one through [`TripQuery::builder`]; origin, destination and
/// departure date are required, everything else has a default.
#[derive(Debug, Clone, PartialEq)]
pub struct TripQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    /// `None` means one-way.
    pub return_date: Option<NaiveDate>,
    pub adult_count: u32,
    pub preferred_cabin: Cabin,
    pub max_stops: u32,
    pub sale_country: String,
    pub max_price: Money,
    pub ticketing_country: String,
    pub refundable: bool,
    pub max_solutions: u32,
    pub departure_time_window: Option<TimeOfDayRange>,
    pub return_time_window: Option<TimeOfDayRange>,
}

impl TripQuery {
    pub fn validate(&self) -> Result<()> {
        ensure(!self.origin.trim().is_empty(), "origin airport is required")?;
        ensure(
            !self.destination.trim().is_empty(),
            "destination airport is required",
        )?;
        ensure(self.adult_count > 0, "at least one adult is required")?;
        ensure(self.max_solutions > 0, "at least one solution must be requested")?;
        ensure(
            !self.sale_country.trim().is_empty(),
            "sale country is required",
        )?;
        ensure(
            !self.ticketing_country.trim().is_empty(),
            "ticketing country is required",
        )?;

        if let Some(return_date) = self.return_date {
            if return_date < self.departure_date {
                return Err(QpxError::Validation(format!(
                    "return date {} is before departure date {}",
                    return_date, self.departure_date
                )));
            }
        }

        if let Some(window) = &self.departure_time_window {
            window.validate("departure")?;
        }
        if let Some(window) = &self.return_time_window {
            ensure(
                self.return_date.is_some(),
                "return time window requires a return date",
            )?;
            window.validate("return")?;
        }

        Ok(())
    }

    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }

    /// Build the request document for this query.
    pub fn to_search_request(&self) -> Result<SearchRequestDocument> {
        self.validate()?;

        let outbound = SliceInput {
            kind: KIND_SLICE_INPUT.to_string(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            date: self.departure_date,
            preferred_cabin: self.preferred_cabin,
            max_stops: self.max_stops,
            permitted_departure_time: self.departure_time_window.clone(),
        };

        let slice = match self.return_date {
            Some(return_date) => {
                let inbound = SliceInput {
                    kind: KIND_SLICE_INPUT.to_string(),
                    origin: self.destination.clone(),
                    destination: self.origin.clone(),
                    date: return_date,
                    preferred_cabin: self.preferred_cabin,
                    max_stops: self.max_stops,
                    permitted_departure_time: self.return_time_window.clone(),
                };
                vec![outbound, inbound]
            }
            None => vec![outbound],
        };

        Ok(SearchRequestDocument {
            request: SearchRequest {
                passengers: PassengerCounts {
                    kind: KIND_PASSENGER_COUNTS.to_string(),
                    adult_count: self.adult_count,
                },
                slice,
                sale_country: self.sale_country.clone(),
                max_price: self.max_price.clone(),
                ticketing_country: self.ticketing_country.clone(),
                refundable: self.refundable,
                solutions: self.max_solutions,
            },
        })
    }

    pub fn builder(
        origin: String,
        destination: String,
        departure_date: NaiveDate,
    ) -> TripQueryBuilder {
        TripQueryBuilder {
            origin,
            destination,
            departure_date,
            return_date: None,
            adult_count: 1,
            preferred_cabin: Cabin::Coach,
            max_stops: 0,
            sale_country: "US".to_string(),
            max_price: Money::default(),
            ticketing_country: "US".to_string(),
            refundable: false,
            max_solutions: 500,
            departure_time_window: None,
            return_time_window: None,
        }
    }
}

fn ensure(cond: bool, msg: &str) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(QpxError::Validation(msg.to_string()))
    }
}

/// Build the request document for `query`.
pub fn build_search_request(query: &TripQuery) -> Result<SearchRequestDocument> {
    query.to_search_request()
}

#[derive(Debug, Clone)]
pub struct TripQueryBuilder {
    origin: String,
    destination: String,
    departure_date: NaiveDate,
    return_date: Option<NaiveDate>,
    adult_count: u32,
    preferred_cabin: Cabin,
    max_stops: u32,
    sale_country: String,
    max_price: Money,
    ticketing_country: String,
    refundable: bool,
    max_solutions: u32,
    departure_time_window: Option<TimeOfDayRange>,
    return_time_window: Option<TimeOfDayRange>,
}

impl TripQueryBuilder {
    pub fn return_date(mut self, return_date: NaiveDate) -> Self {
        self.return_date = Some(return_date);
        self
    }

    pub fn adult_count(mut self, adult_count: u32) -> Self {
        self.adult_count = adult_count;
        self
    }

    pub fn preferred_cabin(mut self, preferred_cabin: Cabin) -> Self {
        self.preferred_cabin = preferred_cabin;
        self
    }

    pub fn max_stops(mut self, max_stops: u32) -> Self {
        self.max_stops = max_stops;
        self
    }

    pub fn sale_country(mut self, sale_country: String) -> Self {
        self.sale_country = sale_country;
        self
    }

    pub fn max_price(mut self, max_price: Money) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn ticketing_country(mut self, ticketing_country: String) -> Self {
        self.ticketing_country = ticketing_country;
        self
    }

    pub fn refundable(mut self, refundable: bool) -> Self {
        self.refundable = refundable;
        self
    }

    pub fn max_solutions(mut self, max_solutions: u32) -> Self {
        self.max_solutions = max_solutions;
        self
    }

    pub fn departure_time_window(mut self, window: TimeOfDayRange) -> Self {
        self.departure_time_window = Some(window);
        self
    }

    pub fn return_time_window(mut self, window: TimeOfDayRange) -> Self {
        self.return_time_window = Some(window);
        self
    }

    pub fn build(self) -> Result<TripQuery> {
        let query = TripQuery {
            origin: self.origin,
            destination: self.destination,
            departure_date: self.departure_date,
            return_date: self.return_date,
            adult_count: self.adult_count,
            preferred_cabin: self.preferred_cabin,
            max_stops: self.max_stops,
            sale_country: self.sale_country,
            max_price: self.max_price,
            ticketing_country: self.ticketing_country,
            refundable: self.refundable,
            max_solutions: self.max_solutions,
            departure_time_window: self.departure_time_window,
            return_time_window: self.return_time_window,
        };
        query.validate()?;
        Ok(query)
    }
}

// =============================================================================
// Wire document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerCounts {
    pub kind: String,
    pub adult_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceInput {
    pub kind: String,
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub preferred_cabin: Cabin,
    pub max_stops: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permitted_departure_time: Option<TimeOfDayRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub passengers: PassengerCounts,
    /// Outbound first, then inbound for round trips.
    pub slice: Vec<SliceInput>,
    pub sale_country: String,
    pub max_price: Money,
    pub ticketing_country: String,
    pub refundable: bool,
    pub solutions: u32,
}

/// The `{"request": {...}}` body posted to `trips.search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequestDocument {
    pub request: SearchRequest,
}

impl SearchRequestDocument {
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
