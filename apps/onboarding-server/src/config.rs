//! Server configuration
//!
//! Layered with figment: built-in defaults, then an optional YAML file, then
//! `ONBOARDING__`-prefixed environment variables (`__` separates nesting,
//! e.g. `ONBOARDING__SERVER__BIND_ADDR`).

use anyhow::{bail, Result};
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub onboarding: restaurant_onboarding::Config,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Route that serves files of the filesystem store
    #[serde(default = "default_uploads_route")]
    pub uploads_route: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Run migrations before serving
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            uploads_route: default_uploads_route(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            auto_migrate: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_uploads_route() -> String {
    "/uploads".to_string()
}

fn default_database_url() -> String {
    "sqlite://onboarding.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info,restaurant_onboarding=debug".to_string()
}

impl AppConfig {
    /// Load the layered configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.is_file() {
                bail!("configuration file {} does not exist", path.display());
            }
        }
        Self::figment(path)
            .merge(Env::prefixed("ONBOARDING__").split("__"))
            .extract()
            .map_err(Into::into)
    }

    fn figment(path: Option<&Path>) -> Figment {
        let figment = Figment::new();
        match path {
            Some(path) => figment.merge(Yaml::file(path)),
            None => figment,
        }
    }
}
