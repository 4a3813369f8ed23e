//! Configuration
//!
//! Layers, lowest to highest precedence: built-in defaults, TOML file,
//! `QUEUE_TOGGLE_*` environment variables, command-line flags.

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use directories::ProjectDirs;
use queue_toggle_core::domain::MediaTypeWhitelist;
use queue_toggle_infra_platform::{DEFAULT_CLIENT_ID, DEFAULT_ENVIRONMENT};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: i64 = 30;
pub const DEFAULT_DEBOUNCE_MS: i64 = 100;
const ENV_PREFIX: &str = "QUEUE_TOGGLE";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Platform region host, e.g. `mypurecloud.de`
    pub environment: String,
    pub client_id: String,
    pub redirect_uri: String,
    /// Pre-obtained token; skips the interactive login
    pub access_token: Option<String>,
    /// Overrides for the derived base URLs (testing, proxies)
    pub api_base_url: Option<String>,
    pub login_base_url: Option<String>,
    pub request_timeout_secs: u64,
    pub debounce_ms: u64,
    /// Keep the login between runs (ignored with `access_token`)
    pub persist_login: bool,
    /// Additional media types: key -> label
    #[serde(default)]
    pub media_types: BTreeMap<String, String>,
}

impl AppConfig {
    /// Load configuration from `path` (must exist) or the default location
    /// (optional).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = defaults()?;
        match path {
            Some(path) => builder = builder.add_source(File::from(path).required(true)),
            None => {
                if let Some(path) = default_config_path() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }
        finish(builder.add_source(Environment::with_prefix(ENV_PREFIX)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Built-in media types plus the configured extras
    pub fn whitelist(&self) -> Result<MediaTypeWhitelist> {
        MediaTypeWhitelist::default()
            .with_entries(self.media_types.iter().map(|(k, v)| (k.as_str(), v.clone())))
            .context("Invalid media_types configuration")
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("environment", DEFAULT_ENVIRONMENT)?
        .set_default("client_id", DEFAULT_CLIENT_ID)?
        .set_default("redirect_uri", DEFAULT_REDIRECT_URI)?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
        .set_default("debounce_ms", DEFAULT_DEBOUNCE_MS)?
        .set_default("persist_login", true)?)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig> {
    builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "QueueToggle", "queue-toggle")
}

/// `<config dir>/queue-toggle/config.toml`, when the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// `<local data dir>/queue-toggle/login.json`
pub fn default_login_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("login.json"))
}
