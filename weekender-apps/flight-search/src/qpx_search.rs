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

//! # QPX Express Search Client
//!
//! Effectful (network) operations for QPX Express `trips.search`.
//! One request in, one response out: no retries, no caching.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::qpx_query_builder::{SearchRequestDocument, TripQuery};
use crate::qpx_results_parser::SearchResponse;
use crate::qpx_vocabulary::{trips_search_url, API_ROOT};

#[derive(Clone)]
pub struct QpxExpressClient {
    client: Arc<wreq::Client>,
    api_key: String,
    endpoint: String,
}

impl QpxExpressClient {
    pub fn new(api_key: String, timeout_secs: u64) -> Result<Self> {
        let client = wreq::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client: Arc::new(client),
            api_key,
            endpoint: trips_search_url(API_ROOT),
        })
    }

    /// Point the client at another API root, e.g. a local stub server.
    pub fn with_base_url(mut self, api_root: &str) -> Self {
        self.endpoint = trips_search_url(api_root);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_url(&self) -> String {
        format!("{}?key={}", self.endpoint, urlencoding::encode(&self.api_key))
    }

    /// POST one request document and return the raw JSON response.
    pub async fn execute(&self, document: &SearchRequestDocument) -> Result<Value> {
        let http_start = Instant::now();
        tracing::trace!("[execute] POST {}", self.endpoint);

        let response = self
            .client
            .post(self.request_url())
            .json(document)
            .send()
            .await
            .context("Request failed")?;

        let status = response.status();
        tracing::debug!(
            "[execute] HTTP Status: {} {} after {:?}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
            http_start.elapsed()
        );

        let body = response.text().await.context("Read body")?;
        tracing::debug!("[execute] Response body: {} KB", body.len() / 1024);

        if !status.is_success() {
            let body_preview = body.chars().take(500).collect::<String>();
            bail!("HTTP error {}: {}", status, body_preview);
        }

        serde_json::from_str(&body).context("Response body is not JSON")
    }

    pub async fn search_trips(&self, query: &TripQuery) -> Result<SearchResponse> {
        let overall_start = Instant::now();

        let document = query
            .to_search_request()
            .context("Invalid search parameters")?;
        tracing::info!(
            "Searching {} -> {} on {}{}",
            query.origin,
            query.destination,
            query.departure_date,
            query
                .return_date
                .map(|d| format!(", back {}", d))
                .unwrap_or_default()
        );

        let raw = self.execute(&document).await?;

        let parse_start = Instant::now();
        match SearchResponse::from_value(raw) {
            Ok(response) => {
                tracing::debug!(
                    "Parsed {} trip options in {:?}",
                    response.count_of_trip_options(),
                    parse_start.elapsed()
                );
                tracing::info!("Total search_trips time: {:?}", overall_start.elapsed());
                Ok(response)
            }
            Err(e) => {
                tracing::error!("Parse failed after {:?}: {}", parse_start.elapsed(), e);
                Err(e).context("Parse failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url() {
        let client = QpxExpressClient::new("k3y/with+chars".to_string(), 5)
            .unwrap()
            .with_base_url("http://127.0.0.1:9999");
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:9999/qpxExpress/v1/trips/search"
        );
        assert_eq!(
            client.request_url(),
            "http://127.0.0.1:9999/qpxExpress/v1/trips/search?key=k3y%2Fwith%2Bchars"
        );
    }
}
