//! Window state - single source of truth for rendering

use chrono::{DateTime, Local};
use weather_core::{WeatherReport, WeatherSummary};

use crate::icon::IconImage;

/// A finished lookup, ready to draw.
#[derive(Clone, Debug)]
pub struct WeatherView {
    pub summary: WeatherSummary,
    /// `None` when the icon could not be fetched or decoded
    pub icon: Option<IconImage>,
    pub fetched_at: DateTime<Local>,
}

impl WeatherView {
    /// Decodes the icon bytes; call this off the UI thread.
    pub fn from_report(report: WeatherReport, fetched_at: DateTime<Local>) -> Self {
        let icon = report.icon.as_deref().and_then(IconImage::decode);
        Self {
            summary: report.summary,
            icon,
            fetched_at,
        }
    }
}

/// What the display region shows. Each search replaces it wholesale.
#[derive(Clone, Debug, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading {
        city: String,
    },
    Loaded(WeatherView),
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// City text as typed
    pub input: String,
    pub display: DisplayState,
    /// Sequence number of the lookup whose result we are waiting for
    pub pending: Option<u64>,
    pub next_seq: u64,
    pub should_quit: bool,
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        matches!(self.display, DisplayState::Loading { .. })
    }
}
