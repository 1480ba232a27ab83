use serde::{Deserialize, Serialize};

const KELVIN_OFFSET: f64 = 273.15;

/// A single lookup request. The city is taken verbatim from user input;
/// the remote API is the only validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempRange {
    pub min_c: i64,
    pub max_c: i64,
}

/// Current conditions for one city, already converted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    /// "City, CC", or just "City" when the country is unknown.
    pub location: Option<String>,
    pub temperature_c: i64,
    pub temperature_f: i64,
    pub min_max_c: Option<TempRange>,
    pub feels_like_c: Option<i64>,
    pub pressure_hpa: Option<f64>,
    /// Title-cased condition text, e.g. "Clear Sky".
    pub condition: Option<String>,
    pub icon_code: Option<String>,
}

impl WeatherSummary {
    pub fn temperature_text(&self) -> String {
        format!("{}°C", self.temperature_c)
    }

    pub fn min_max_text(&self) -> Option<String> {
        self.min_max_c
            .map(|r| format!("Max: {}°C  |  Min: {}°C", r.max_c, r.min_c))
    }

    pub fn feels_like_text(&self) -> Option<String> {
        self.feels_like_c.map(|c| format!("Feels Like: {c}°C"))
    }

    pub fn pressure_text(&self) -> Option<String> {
        self.pressure_hpa.map(|p| format!("Pressure: {p} hPa"))
    }
}

/// Kelvin to whole-degree Celsius, ties rounded to even.
pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - KELVIN_OFFSET).round_ties_even() as i64
}

pub fn kelvin_to_fahrenheit(kelvin: f64) -> i64 {
    (kelvin * 9.0 / 5.0 - 459.67).round_ties_even() as i64
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Builds the location label. No name means no label at all.
pub fn location_label(name: Option<&str>, country: Option<&str>) -> Option<String> {
    let name = name.filter(|n| !n.is_empty())?;
    match country.filter(|c| !c.is_empty()) {
        Some(country) => Some(format!("{name}, {country}")),
        None => Some(name.to_string()),
    }
}
