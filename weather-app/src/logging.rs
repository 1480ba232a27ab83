use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// The interactive window owns the terminal, so it logs to a file instead of stderr.
pub fn init(verbose: bool, interactive: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weather={level},weather_core={level}")));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if interactive {
        let path = log_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }

    Ok(())
}

pub fn log_file_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "weather-task", "weather-app")
        .ok_or_else(|| anyhow!("Could not determine platform cache directory"))?;

    Ok(dirs.cache_dir().join("weather.log"))
}
