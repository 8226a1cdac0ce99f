//! Sink delivering events to a remote log collector over HTTP.

use std::time::Duration;

use super::service::{LogSink, LogSinkError, LogSinkResult};
use crate::domain::log_event::LogEvent;
use async_trait::async_trait;
use reqwest::Client;

/// POSTs each event as a JSON body to the collector endpoint.
///
/// A non-2xx response counts as a delivery failure.
pub struct HttpSink {
    client: Client,
    endpoint: String,
}

impl HttpSink {
    /// Builds a sink with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LogSinkError::Delivery`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> LogSinkResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LogSinkError::Delivery(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LogSink for HttpSink {
    async fn write(&self, event: &LogEvent) -> LogSinkResult<()> {
        self.client
            .post(&self.endpoint)
            .json(event)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| LogSinkError::Delivery(e.to_string()))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
