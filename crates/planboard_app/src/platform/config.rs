//! Configuration file (`planboard.ron`) plus command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use board_logging::board_info;
use clap::Parser;
use log::LevelFilter;
use planboard_engine::{FetchSettings, RetryPolicy};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

#[derive(Debug, Clone, Parser)]
#[command(name = "planboard", about = "Planboard session driver")]
pub struct Cli {
    /// RON configuration file; missing files mean defaults.
    #[arg(long, default_value = "planboard.ron")]
    pub config: PathBuf,
    /// Application server base URL.
    #[arg(long)]
    pub server: Option<String>,
    /// Page path the session is opened on.
    #[arg(long, default_value = "/")]
    pub path: String,
    /// Push messages, one JSON document per line; `-` reads stdin.
    #[arg(long)]
    pub events: Option<PathBuf>,
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cache_dir: PathBuf,
    pub log: LogConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub catalog_path: String,
    pub projects_path: String,
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogDestination,
    /// Overrides `PLANBOARD_LOG` when set.
    pub level: Option<String>,
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub attempts: u32,
    pub base_delay_ms: u64,
    pub factor: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cache_dir: PathBuf::from(".planboard"),
            log: LogConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            url: fetch.server,
            catalog_path: fetch.catalog_path,
            projects_path: fetch.projects_path,
            connect_timeout_ms: None,
            request_timeout_ms: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::Terminal,
            level: None,
            file: PathBuf::from("planboard.log"),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            attempts: policy.max_attempts,
            base_delay_ms: policy.base_delay.as_millis() as u64,
            factor: policy.factor,
        }
    }
}

impl AppConfig {
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(server) = &cli.server {
            self.server.url = server.clone();
        }
        if let Some(cache_dir) = &cli.cache_dir {
            self.cache_dir = cache_dir.clone();
        }
        if let Some(destination) = cli.log {
            self.log.destination = destination;
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            server: self.server.url.clone(),
            catalog_path: self.server.catalog_path.clone(),
            projects_path: self.server.projects_path.clone(),
            connect_timeout: self.server.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: self.server.request_timeout_ms.map(Duration::from_millis),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.attempts,
            base_delay: Duration::from_millis(self.retry.base_delay_ms),
            factor: self.retry.factor,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log
            .level
            .as_deref()
            .and_then(board_logging::parse_level)
            .unwrap_or_else(board_logging::level_from_env)
    }
}

/// Reads the config file, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading config {}", path.display()));
        }
    };
    let config = ron::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    board_info!("Loaded config from {:?}", path);
    Ok(config)
}
