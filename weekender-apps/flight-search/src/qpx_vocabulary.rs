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

//! # QPX Express Vocabulary
//!
//! Provider-fixed strings shared by the request builder and the response parser.
//! These must be reproduced verbatim on the wire.

// =============================================================================
// Service
// =============================================================================

/// Service name, used to address the API.
pub const SERVICE_NAME: &str = "qpxExpress";

/// Service version.
pub const SERVICE_VERSION: &str = "v1";

/// Default API root. The full endpoint is
/// `{API_ROOT}/{SERVICE_NAME}/{SERVICE_VERSION}/trips/search`.
pub const API_ROOT: &str = "https://www.googleapis.com";

// =============================================================================
// `kind` discriminators
// =============================================================================

pub const KIND_PASSENGER_COUNTS: &str = "qpxexpress#passengerCounts";
pub const KIND_SLICE_INPUT: &str = "qpxexpress#sliceInput";
pub const KIND_TIME_OF_DAY_RANGE: &str = "qpxexpress#timeOfDayRange";

// =============================================================================
// Wire formats
// =============================================================================

/// Calendar dates, e.g. `2017-01-27`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Times of day in `TimeOfDayRange`, e.g. `17:00`.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Length of the currency code that prefixes every price string.
pub const CURRENCY_CODE_LEN: usize = 3;

/// Split a price string such as `USD432.10` into its currency code and amount.
///
/// Returns `None` unless the first three characters are ASCII letters and the
/// remainder parses as a finite decimal number.
pub fn split_currency_prefixed(s: &str) -> Option<(&str, f64)> {
    let currency = s.get(..CURRENCY_CODE_LEN)?;
    let amount = s.get(CURRENCY_CODE_LEN..)?;
    if !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    // f64::from_str accepts "inf" and "NaN", which are never prices.
    let amount: f64 = amount.parse().ok().filter(|v: &f64| v.is_finite())?;
    Some((currency, amount))
}

/// True for a plain non-negative decimal such as `1000`, `999.99` or `100.125`.
///
/// No sign, exponent, whitespace or bare leading/trailing point.
pub fn is_plain_decimal(s: &str) -> bool {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.is_none_or(all_digits)
}

/// Build the `trips.search` endpoint under `api_root`.
pub fn trips_search_url(api_root: &str) -> String {
    format!(
        "{}/{}/{}/trips/search",
        api_root.trim_end_matches('/'),
        SERVICE_NAME,
        SERVICE_VERSION
    )
}
