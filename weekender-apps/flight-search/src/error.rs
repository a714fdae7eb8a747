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

use thiserror::Error;

/// Errors raised while building search requests or reading search responses.
#[derive(Debug, Error)]
pub enum QpxError {
    /// A trip parameter is missing or malformed.
    #[error("invalid trip query: {0}")]
    Validation(String),
    /// The response does not have the `trips.tripOption` shape.
    #[error("malformed search response: {0}")]
    Structural(String),
    /// A trip option price is not `<CUR><amount>`.
    #[error("trip option {index}: cannot parse price {value:?}")]
    Parse { index: usize, value: String },
    #[error("search response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = QpxError> = std::result::Result<T, E>;
