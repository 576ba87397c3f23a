//! Core library for the weather lookup widget.
//!
//! This crate defines:
//! - The OpenWeather provider and the seam it plugs into
//! - The pure mapping from an upstream result to a display state
//! - The session object that owns display state and the reveal flag
//! - Configuration & credentials handling
//!
//! It is used by `weather-widget-cli`, but any front end can drive a
//! [`Session`] and render its [`DisplayState`].

pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use display::{DisplayState, LOCATION_NOT_FOUND, Outcome, WeatherIcon, map_outcome};
pub use error::{LookupError, SubmitError};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use session::{Session, Submitted, Ticket};
