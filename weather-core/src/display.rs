//! Mapping from an upstream result to what the widget shows.
//!
//! Everything here is pure: the same [`Outcome`] always yields the same
//! [`DisplayState`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::LookupError, model::CurrentWeatherPayload};

/// City line shown when the lookup failed.
pub const LOCATION_NOT_FOUND: &str = "Oop! Ivalid location :/";

/// Icon selector for the condition artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherIcon {
    Clouds,
    Clear,
    Rain,
    Snow,
    Mist,
    #[default]
    NotFound,
}

impl WeatherIcon {
    /// Asset path used by the web build of the widget.
    pub fn asset_path(&self) -> &'static str {
        match self {
            WeatherIcon::Clouds => "/images/cloud.png",
            WeatherIcon::Clear => "/images/clear.png",
            WeatherIcon::Rain => "/images/rain.png",
            WeatherIcon::Snow => "/images/snow.png",
            WeatherIcon::Mist => "/images/mist.png",
            WeatherIcon::NotFound => "/images/404.png",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Clouds => "☁",
            WeatherIcon::Clear => "☀",
            WeatherIcon::Rain => "🌧",
            WeatherIcon::Snow => "❄",
            WeatherIcon::Mist => "🌫",
            WeatherIcon::NotFound => "?",
        }
    }
}

/// Upstream condition category → icon. Matching is exact and case-sensitive.
pub const CONDITION_ICONS: &[(&str, WeatherIcon)] = &[
    ("Clouds", WeatherIcon::Clouds),
    ("Clear", WeatherIcon::Clear),
    ("Rain", WeatherIcon::Rain),
    ("Snow", WeatherIcon::Snow),
    ("Haze", WeatherIcon::Mist),
];

/// Look up the icon for a condition category, falling back to
/// [`WeatherIcon::NotFound`].
pub fn icon_for_condition(category: Option<&str>) -> WeatherIcon {
    category
        .and_then(|c| CONDITION_ICONS.iter().find(|(name, _)| *name == c))
        .map(|(_, icon)| *icon)
        .unwrap_or_default()
}

/// Last raw result received from upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Loaded(Value),
    Failed(LookupError),
}

impl From<Result<Value, LookupError>> for Outcome {
    fn from(result: Result<Value, LookupError>) -> Self {
        match result {
            Ok(payload) => Outcome::Loaded(payload),
            Err(err) => Outcome::Failed(err),
        }
    }
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayState {
    pub image: WeatherIcon,
    /// Degrees Celsius.
    pub temperature: f64,
    pub description: String,
    /// Percent.
    pub humidity: f64,
    pub wind: f64,
    pub city: String,
}

impl DisplayState {
    /// Sentinel state for a failed lookup.
    pub fn not_found() -> Self {
        Self {
            city: LOCATION_NOT_FOUND.to_string(),
            ..Self::default()
        }
    }

    pub fn is_not_found(&self) -> bool {
        *self == Self::not_found()
    }

    fn from_payload(payload: &CurrentWeatherPayload) -> Self {
        let condition = payload.primary_condition();

        Self {
            image: icon_for_condition(condition.map(|c| c.main.as_str())),
            temperature: payload.main.temp,
            description: condition.map(|c| c.description.clone()).unwrap_or_default(),
            humidity: payload.main.humidity,
            wind: payload.wind.speed,
            city: payload.name.clone(),
        }
    }
}

/// Derive the display state for the current outcome.
///
/// `None` (nothing received yet) and unreadable success payloads both give
/// [`DisplayState::default`]; a failure gives [`DisplayState::not_found`].
pub fn map_outcome(outcome: Option<&Outcome>) -> DisplayState {
    match outcome {
        Some(Outcome::Loaded(raw)) => match CurrentWeatherPayload::from_value(raw) {
            Some(payload) => DisplayState::from_payload(&payload),
            None => {
                tracing::debug!("success payload missing displayed fields");
                DisplayState::default()
            }
        },
        Some(Outcome::Failed(_)) => DisplayState::not_found(),
        None => DisplayState::default(),
    }
}
