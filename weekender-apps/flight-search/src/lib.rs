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

// Library for weekender-flight-search
// Request building and response parsing for QPX Express trips.search

mod error;
pub mod qpx_vocabulary;
mod qpx_query_builder;
mod qpx_results_parser;
mod qpx_search;
mod weekend_planner;

pub use error::QpxError;

// Re-export qpx_query_builder
pub use qpx_query_builder::{
    build_search_request, Cabin, Money, PassengerCounts, SearchRequest, SearchRequestDocument,
    SliceInput, TimeOfDayRange, TripQuery, TripQueryBuilder,
};

// Re-export qpx_results_parser
pub use qpx_results_parser::{SearchResponse, TripOption};

// Re-export qpx_search
pub use qpx_search::QpxExpressClient;

// Re-export weekend_planner
pub use weekend_planner::{upcoming_weekends, Weekend};
