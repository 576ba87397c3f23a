use crate::{Config, error::LookupError, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Source of raw current-weather payloads.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the current weather for a free-text location. Exactly one
    /// upstream request per call, no retries.
    async fn current_weather(&self, location: &str) -> Result<Value, LookupError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: set {} or run `weather-widget configure`.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = OpenWeatherProvider::with_options(api_key, config.base_url(), config.timeout())?;

    Ok(Arc::new(provider))
}
