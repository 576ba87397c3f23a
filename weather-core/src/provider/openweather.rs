use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{error::LookupError, model::UNITS};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Build a provider against a custom endpoint, with an optional
    /// client-side timeout.
    pub fn with_options(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn current_url(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current_weather(&self, location: &str) -> Result<Value, LookupError> {
        let res = self
            .http
            .get(self.current_url())
            .query(&[
                ("q", location),
                ("units", UNITS),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| LookupError::transport(format!("failed to reach OpenWeather: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LookupError::transport(format!("failed to read OpenWeather body: {e}")))?;

        if !status.is_success() {
            return Err(LookupError::status(status.as_u16(), truncate_body(&body)));
        }

        debug!(%status, bytes = body.len(), "OpenWeather responded");

        serde_json::from_str(&body).map_err(|e| {
            LookupError::status(status.as_u16(), format!("response is not JSON: {e}"))
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
