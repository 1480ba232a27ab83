use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use weather_core::{Config, WeatherLookup, WeatherQuery, WeatherSummary, config::API_KEY_ENV};

use crate::tui;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for any city")]
pub struct Cli {
    /// Log at debug level.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open the interactive weather window (default).
    Ui,

    /// Look up one city and print the result.
    Show {
        /// City name, sent to the weather service as typed.
        city: String,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    /// Whether this invocation takes over the terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Command::Ui))
    }

    pub async fn run(self) -> Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command.unwrap_or(Command::Ui) {
            Command::Configure => configure(&config_path),
            Command::Show { city, json } => {
                let lookup = load_lookup(&config_path)?;
                show(&lookup, &city, json).await
            }
            Command::Ui => {
                let lookup = load_lookup(&config_path)?;
                tui::run(lookup).await
            }
        }
    }
}

/// Configuration is read once here and handed to the lookup.
fn load_lookup(config_path: &Path) -> Result<WeatherLookup> {
    let config = Config::load_from(config_path)?.with_env_override(std::env::var(API_KEY_ENV).ok());
    info!(path = %config_path.display(), base_url = %config.weather_base_url, "configuration loaded");
    WeatherLookup::from_config(&config)
}

fn configure(config_path: &Path) -> Result<()> {
    let mut config = Config::load_from(config_path)?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.require_api_key()?;
    config.save_to(config_path)?;

    println!("Saved API key to {}", config_path.display());
    Ok(())
}

async fn show(lookup: &WeatherLookup, city: &str, json: bool) -> Result<()> {
    let summary = lookup.fetch_weather(&WeatherQuery::new(city)).await?;

    if json {
        let out = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{out}");
    } else {
        for line in summary_lines(&summary) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Human-readable lines in display order; absent fields are skipped.
pub fn summary_lines(summary: &WeatherSummary) -> Vec<String> {
    [
        Some(summary.temperature_text()),
        summary.location.clone(),
        summary.condition.clone(),
        summary.min_max_text(),
        summary.feels_like_text(),
        summary.pressure_text(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
