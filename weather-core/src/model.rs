//! Wire shapes of the OpenWeather "current weather" payload.
//!
//! Only the fields the widget displays are modelled; everything else in the
//! upstream document is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unit system sent with every request. The widget only displays metric.
pub const UNITS: &str = "metric";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwCondition {
    /// Condition category, e.g. "Clouds" or "Rain".
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwWind {
    pub speed: f64,
}

/// The subset of a successful response the widget reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherPayload {
    pub weather: Vec<OwCondition>,
    pub main: OwMain,
    pub wind: OwWind,
    pub name: String,
}

impl CurrentWeatherPayload {
    /// Read a raw payload, returning `None` when any displayed field is
    /// missing, mistyped, or the condition list is empty.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let parsed = Self::deserialize(raw).ok()?;
        if parsed.weather.is_empty() {
            return None;
        }
        Some(parsed)
    }

    /// First entry of the condition list; upstream orders it by relevance.
    pub fn primary_condition(&self) -> Option<&OwCondition> {
        self.weather.first()
    }
}
