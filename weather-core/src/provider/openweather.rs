use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    config::{Config, DEFAULT_ICON_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_WEATHER_BASE_URL},
    error::LookupError,
    model::{
        TempRange, WeatherQuery, WeatherSummary, kelvin_to_celsius, kelvin_to_fahrenheit,
        location_label, title_case,
    },
};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    weather_base_url: String,
    icon_base_url: String,
    timeout: Duration,
    icon_timeout: Duration,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            icon_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            http: Client::new(),
        }
    }

    pub fn from_config(api_key: String, config: &Config) -> Self {
        Self::new(api_key)
            .with_base_urls(&config.weather_base_url, &config.icon_base_url)
            .with_timeouts(config.timeout(), config.icon_timeout())
    }

    pub fn with_base_urls(mut self, weather_base_url: &str, icon_base_url: &str) -> Self {
        self.weather_base_url = weather_base_url.trim_end_matches('/').to_string();
        self.icon_base_url = icon_base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeouts(mut self, timeout: Duration, icon_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.icon_timeout = icon_timeout;
        self
    }

    pub fn icon_url(&self, icon_code: &str) -> String {
        format!("{}/img/wn/{icon_code}@4x.png", self.icon_base_url)
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherSummary, LookupError> {
        let url = format!("{}{CURRENT_WEATHER_PATH}", self.weather_base_url);
        debug!(city, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            debug!(city, status = status.as_u16(), "current weather request rejected");
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = res.text().await?;
        parse_current(&body).map_err(|e| {
            LookupError::Unexpected(format!("Failed to parse OpenWeather current JSON: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
    feels_like: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    name: Option<String>,
    sys: Option<OwSys>,
    weather: Option<Vec<OwWeather>>,
}

/// Maps a current-weather body onto a summary. Only `main.temp` is required;
/// a missing or empty `weather` array leaves condition and icon unset.
pub(crate) fn parse_current(body: &str) -> Result<WeatherSummary, serde_json::Error> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    let first = parsed.weather.as_deref().and_then(<[OwWeather]>::first);
    let condition = first
        .and_then(|w| w.description.as_deref())
        .filter(|d| !d.is_empty())
        .map(title_case);
    let icon_code = first
        .and_then(|w| w.icon.clone())
        .filter(|i| !i.is_empty());

    let country = parsed.sys.as_ref().and_then(|s| s.country.as_deref());

    let min_max_c = match (parsed.main.temp_min, parsed.main.temp_max) {
        (Some(min), Some(max)) => Some(TempRange {
            min_c: kelvin_to_celsius(min),
            max_c: kelvin_to_celsius(max),
        }),
        _ => None,
    };

    Ok(WeatherSummary {
        location: location_label(parsed.name.as_deref(), country),
        temperature_c: kelvin_to_celsius(parsed.main.temp),
        temperature_f: kelvin_to_fahrenheit(parsed.main.temp),
        min_max_c,
        feels_like_c: parsed.main.feels_like.map(kelvin_to_celsius),
        pressure_hpa: parsed.main.pressure,
        condition,
        icon_code,
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherSummary, LookupError> {
        self.fetch_current(&query.city).await
    }

    async fn icon(&self, icon_code: &str) -> Option<Vec<u8>> {
        let url = self.icon_url(icon_code);

        let res = match self.http.get(&url).timeout(self.icon_timeout).send().await {
            Ok(res) => res,
            Err(e) => {
                warn!(icon_code, error = %e, "icon request failed");
                return None;
            }
        };

        if !res.status().is_success() {
            warn!(icon_code, status = res.status().as_u16(), "icon request rejected");
            return None;
        }

        match res.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                warn!(icon_code, error = %e, "failed to read icon body");
                None
            }
        }
    }
}
