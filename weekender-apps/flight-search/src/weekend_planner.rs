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

//! # Weekend Planner
//!
//! Enumerates Friday to Sunday trips, e.g. "leave Friday evening, be back by
//! Sunday evening, any weekend in the next two months".

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::qpx_query_builder::{TripQuery, TripQueryBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weekend {
    pub friday: NaiveDate,
    pub sunday: NaiveDate,
}

impl Weekend {
    /// A round-trip query builder leaving on Friday and returning on Sunday.
    pub fn trip_query(&self, origin: String, destination: String) -> TripQueryBuilder {
        TripQuery::builder(origin, destination, self.friday).return_date(self.sunday)
    }
}

/// The next `count` weekends whose Friday is on or after `from`.
pub fn upcoming_weekends(from: NaiveDate, count: usize) -> Vec<Weekend> {
    let days_to_friday = (Weekday::Fri.num_days_from_monday() + 7
        - from.weekday().num_days_from_monday())
        % 7;
    let Some(first_friday) = from.checked_add_days(Days::new(days_to_friday as u64)) else {
        return Vec::new();
    };

    first_friday
        .iter_weeks()
        .map_while(|friday| {
            friday
                .checked_add_days(Days::new(2))
                .map(|sunday| Weekend { friday, sunday })
        })
        .take(count)
        .collect()
}
