use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use crate::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Directory holding the `topics_<subject>.json` tables
    pub topics_dir: PathBuf,
    pub log_format: LogFormat,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub log_filter: String,
    pub default_daily_hours: u32,
    /// Horizon used when an exam date cannot be parsed
    pub fallback_exam_days: i64,
    /// Month/day of the default exam season target
    pub season_month: u32,
    pub season_day: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            topics_dir: PathBuf::from("topics"),
            log_format: LogFormat::Pretty,
            log_filter: "info".to_string(),
            default_daily_hours: 6,
            fallback_exam_days: 150,
            season_month: 6,
            season_day: 15,
        }
    }
}

fn get_config_path() -> PathBuf {
    if let Some(explicit) = std::env::var_os("STRICTO_CONFIG") {
        return PathBuf::from(explicit);
    }

    // Use platform-specific app data directory
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support/stricto");
            dir.push("stricto.toml");
            if dir.exists() {
                return dir;
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push("stricto");
            dir.push("stricto.toml");
            if dir.exists() {
                return dir;
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share/stricto");
            dir.push("stricto.toml");
            if dir.exists() {
                return dir;
            }
        }
    }

    // Fallback
    PathBuf::from("stricto.toml")
}

/// Load and parse a config file, failing loudly.
pub fn load_config_from(path: &Path) -> Result<PlannerConfig, PlannerError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PlannerError::new(format!("Failed to read config: {}", e), "config_read")
            .with_context(format!("path: {:?}", path))
    })?;
    let config = toml::from_str::<PlannerConfig>(&content)
        .map_err(|e| PlannerError::from(e).with_context(format!("path: {:?}", path)))?;
    Ok(config)
}

fn load_planner_config_internal() -> PlannerConfig {
    let config_path = get_config_path();

    match load_config_from(&config_path) {
        Ok(config) => {
            tracing::debug!(path = ?config_path, "Loaded planner config");
            config
        }
        Err(e) => {
            // The subscriber may not be installed yet, so this can be silent.
            tracing::debug!(path = ?config_path, error = %e, "Using default planner configuration");
            PlannerConfig::default()
        }
    }
}

lazy_static! {
    static ref PLANNER_CONFIG: PlannerConfig = load_planner_config_internal();
}

/// Get the cached planner configuration (loaded once per process)
pub fn get_planner_config() -> &'static PlannerConfig {
    &PLANNER_CONFIG
}
