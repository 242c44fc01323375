//! Core library for the `weather-dash` card dashboard.
//!
//! This crate defines:
//! - The normalized weather record and icon glyph mapping
//! - Abstraction over the weather provider, with an OpenWeather client
//! - Dashboard state: ordered, deduplicated cards and the submit/remove flow
//! - Configuration & credentials handling
//!
//! It is used by `weather-dash-cli`, but any other front end can drive a
//! [`Dashboard`] the same way.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;

pub use config::Config;
pub use dashboard::{CityList, Dashboard, LoadingFlag, LoadingGuard, SubmitOutcome};
pub use error::{FetchError, Notice};
pub use icon::{Daypart, IconCode, icon_glyph};
pub use model::WeatherRecord;
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
