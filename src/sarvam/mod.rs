//! Paginated fetcher for the Sarvam attempts analytics endpoint.
//!
//! Offset/limit pagination over a fixed 1000-day window. A short page or
//! an empty page signals the end; any HTTP or transport failure stops the
//! loop and keeps whatever was already accumulated. There are no retries.

use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::session::ApiSession;

pub const DEFAULT_BASE_URL: &str = "https://apps.sarvam.ai";

/// Maximum records allowed per request by the API.
const PAGE_LIMIT: usize = 1000;

/// Fixed lookback window. A business constant, not configurable per call.
const WINDOW_DAYS: i64 = 1000;

#[derive(Deserialize)]
struct AttemptsPage {
    #[serde(default)]
    items: Vec<Value>,
}

pub struct AttemptsClient {
    base_url: String,
    api_key: String,
    org_id: String,
    workspace_id: String,
    app_id: String,
    session: Box<dyn ApiSession>,
}

impl AttemptsClient {
    pub fn new(
        base_url: String,
        api_key: String,
        org_id: String,
        workspace_id: String,
        app_id: String,
        session: Box<dyn ApiSession>,
    ) -> Self {
        Self {
            base_url,
            api_key,
            org_id,
            workspace_id,
            app_id,
            session,
        }
    }

    fn attempts_url(&self) -> String {
        format!(
            "{}/api/analytics/v1/{}/{}/{}/attempts",
            self.base_url, self.org_id, self.workspace_id, self.app_id
        )
    }

    /// Fetch every attempt record in the window, page by page.
    ///
    /// Failures terminate the loop without discarding prior pages, so the
    /// caller always gets the records collected so far.
    pub async fn fetch_all(&self) -> Vec<Map<String, Value>> {
        let url = self.attempts_url();
        let now = Utc::now();
        let end_dt = now.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let start_dt = (now - Duration::days(WINDOW_DAYS))
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();

        let headers: &[(&str, &str)] = &[
            ("X-API-Key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ];

        tracing::info!("Starting fetch for range: {} to {}", start_dt, end_dt);

        let mut all_items: Vec<Map<String, Value>> = Vec::new();
        let mut offset: usize = 0;

        loop {
            let query = [
                ("start_datetime", start_dt.clone()),
                ("end_datetime", end_dt.clone()),
                ("limit", PAGE_LIMIT.to_string()),
                ("offset", offset.to_string()),
            ];

            let reply = match self.session.get(&url, headers, &query).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::error!("A connection error occurred: {}", e);
                    break;
                }
            };

            if !reply.is_ok() {
                tracing::error!("Error {}: {}", reply.status, reply.body);
                break;
            }

            let page: AttemptsPage = match serde_json::from_str(&reply.body) {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("Failed to parse attempts page at offset {}: {}", offset, e);
                    break;
                }
            };

            if page.items.is_empty() {
                tracing::info!("No more records found.");
                break;
            }

            let batch_len = page.items.len();
            for item in page.items {
                match item {
                    Value::Object(map) => all_items.push(map),
                    other => {
                        tracing::warn!("Skipping non-object item in response: {}", other);
                    }
                }
            }

            tracing::info!(
                "Downloaded {} records so far (offset: {})...",
                all_items.len(),
                offset
            );

            // A short page means the window is exhausted.
            if batch_len < PAGE_LIMIT {
                break;
            }

            offset += PAGE_LIMIT;
        }

        all_items
    }
}
