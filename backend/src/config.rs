use serde::Deserialize;

use crate::domain::DEFAULT_RELATION_SCAN_LIMIT;

/// Application configuration.
///
/// Every field has a default; override with `SCHOOL_TRACKER_<FIELD>`
/// environment variables, e.g. `SCHOOL_TRACKER_DATABASE_URL`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db")]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Page size of the relation scan performed when redeeming an invite code
    #[serde(default = "default_relation_scan_limit")]
    pub relation_scan_limit: u32,
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_port() -> u16 { 3000 }
fn default_db() -> String { "sqlite:school_tracker.db".into() }
fn default_max_connections() -> u32 { 5 }
fn default_relation_scan_limit() -> u32 { DEFAULT_RELATION_SCAN_LIMIT }
fn default_cors_origin() -> String { "http://localhost:8080".into() }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_url: default_db(),
            max_connections: default_max_connections(),
            relation_scan_limit: default_relation_scan_limit(),
            cors_origin: default_cors_origin(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let source = config::Environment::with_prefix("SCHOOL_TRACKER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        let config = config::Config::builder().add_source(source).build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: config::Config) -> anyhow::Result<Self> {
        Ok(config.try_deserialize()?)
    }
}
