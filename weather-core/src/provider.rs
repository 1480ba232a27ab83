use async_trait::async_trait;
use std::fmt::Debug;

use crate::{LookupError, WeatherQuery, WeatherSummary};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// A source of current conditions and condition icons.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherSummary, LookupError>;

    /// Raw image bytes for an icon code. Failures are swallowed: `None` means
    /// "show no icon".
    async fn icon(&self, icon_code: &str) -> Option<Vec<u8>>;
}
