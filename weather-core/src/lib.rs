//! Core library for the `weather` app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider seam and its OpenWeather implementation
//! - Shared domain models (query, summary) and the user-facing error taxonomy
//! - [`WeatherLookup`], the single entry point a front-end calls
//!
//! Nothing here depends on a UI; `weather-app` is one front-end among possible others.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{ErrorCategory, ErrorKind, LookupError};
pub use lookup::{WeatherLookup, WeatherReport};
pub use model::{TempRange, WeatherQuery, WeatherSummary};
pub use provider::{OpenWeatherProvider, WeatherProvider};
