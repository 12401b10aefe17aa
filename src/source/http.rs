//! Events from the NVR HTTP API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;

use super::{EventQuery, EventSource, SourceError};
use crate::event::RawEvent;

/// Connection timeout for events requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Lists events from `GET {host}/api/events?...`.
#[derive(Debug, Clone)]
pub struct HttpEventSource {
    client: Client,
    host: String,
}

impl HttpEventSource {
    pub fn new(host: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            host: host.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/events", self.host)
    }

    /// Full URL for a query, for logs and error messages.
    pub fn url(&self, query: &EventQuery) -> String {
        let endpoint = self.endpoint();
        let pairs = query.pairs();
        if pairs.is_empty() {
            return endpoint;
        }
        match Url::parse_with_params(&endpoint, &pairs) {
            Ok(url) => url.to_string(),
            Err(_) => endpoint,
        }
    }
}

impl EventSource for HttpEventSource {
    fn describe(&self) -> String {
        self.host.clone()
    }

    fn fetch(&self, query: &EventQuery) -> Result<Vec<RawEvent>, SourceError> {
        let url = self.url(query);
        tracing::debug!(%url, "fetching events");

        let response = self
            .client
            .get(self.endpoint())
            .query(&query.pairs())
            .send()
            .map_err(|source| SourceError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<RawEvent>>()
            .map_err(|source| SourceError::Http { url, source })
    }
}
