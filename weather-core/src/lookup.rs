use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::{
    Config, LookupError, WeatherQuery, WeatherSummary,
    provider::{OpenWeatherProvider, WeatherProvider},
};

/// Everything one search produces: the summary plus the icon, if one could be fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub summary: WeatherSummary,
    pub icon: Option<Vec<u8>>,
}

/// UI-agnostic entry point: city name in, summary or user-facing error out.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherLookup {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Build the OpenWeather-backed lookup. Fails only if no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let provider = OpenWeatherProvider::from_config(api_key.to_owned(), config);
        Ok(Self::new(Arc::new(provider)))
    }

    pub async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherSummary, LookupError> {
        self.provider.current_weather(query).await
    }

    pub async fn fetch_icon(&self, icon_code: &str) -> Option<Vec<u8>> {
        self.provider.icon(icon_code).await
    }

    /// Weather first, then the icon when the summary names one. An icon
    /// failure never fails the lookup.
    pub async fn lookup(&self, query: &WeatherQuery) -> Result<WeatherReport, LookupError> {
        let summary = match self.fetch_weather(query).await {
            Ok(summary) => summary,
            Err(e) => {
                debug!(city = %query.city, error = %e, "weather lookup failed");
                return Err(e);
            }
        };

        let icon = match summary.icon_code.as_deref() {
            Some(code) => self.fetch_icon(code).await,
            None => {
                debug!(city = %query.city, "no icon code in response");
                None
            }
        };

        Ok(WeatherReport { summary, icon })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct StubProvider {
        weather: Result<WeatherSummary, LookupError>,
        icon: Option<Vec<u8>>,
        icon_requests: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(weather: Result<WeatherSummary, LookupError>, icon: Option<Vec<u8>>) -> Self {
            Self {
                weather,
                icon,
                icon_requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current_weather(&self, _query: &WeatherQuery) -> Result<WeatherSummary, LookupError> {
            self.weather.clone()
        }

        async fn icon(&self, icon_code: &str) -> Option<Vec<u8>> {
            self.icon_requests.lock().unwrap().push(icon_code.to_string());
            self.icon.clone()
        }
    }

    fn summary(icon_code: Option<&str>) -> WeatherSummary {
        WeatherSummary {
            location: Some("London, GB".into()),
            temperature_c: 22,
            temperature_f: 72,
            min_max_c: None,
            feels_like_c: None,
            pressure_hpa: None,
            condition: Some("Clear Sky".into()),
            icon_code: icon_code.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn lookup_fetches_icon_when_code_present() {
        let stub = Arc::new(StubProvider::new(Ok(summary(Some("01d"))), Some(vec![1, 2, 3])));
        let lookup = WeatherLookup::new(stub.clone());

        let report = lookup.lookup(&WeatherQuery::new("London")).await.unwrap();

        assert_eq!(report.icon, Some(vec![1, 2, 3]));
        assert_eq!(*stub.icon_requests.lock().unwrap(), vec!["01d".to_string()]);
    }

    #[tokio::test]
    async fn lookup_skips_icon_without_code() {
        let stub = Arc::new(StubProvider::new(Ok(summary(None)), Some(vec![1])));
        let lookup = WeatherLookup::new(stub.clone());

        let report = lookup.lookup(&WeatherQuery::new("London")).await.unwrap();

        assert!(report.icon.is_none());
        assert!(stub.icon_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn icon_failure_keeps_summary() {
        let stub = Arc::new(StubProvider::new(Ok(summary(Some("01d"))), None));
        let lookup = WeatherLookup::new(stub);

        let report = lookup.lookup(&WeatherQuery::new("London")).await.unwrap();

        assert!(report.icon.is_none());
        assert_eq!(report.summary.temperature_text(), "22°C");
    }

    #[tokio::test]
    async fn weather_error_is_returned_without_icon_fetch() {
        let stub = Arc::new(StubProvider::new(Err(LookupError::Status(404)), Some(vec![1])));
        let lookup = WeatherLookup::new(stub.clone());

        let err = lookup.lookup(&WeatherQuery::new("Atlantis")).await.unwrap_err();

        assert_eq!(err.to_string(), "City not found");
        assert!(stub.icon_requests.lock().unwrap().is_empty());
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = WeatherLookup::from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));

        let cfg = Config::default().with_env_override(Some("KEY".into()));
        assert!(WeatherLookup::from_config(&cfg).is_ok());
    }
}
