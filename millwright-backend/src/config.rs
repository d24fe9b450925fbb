use crate::error::{AppError, Result};
use std::env;
use std::path::PathBuf;

/// Defaults file shipped alongside the backend crate.
pub const BUNDLED_DEFAULTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/default.json");

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_address: String,
    pub default_settings_path: PathBuf,
    pub seed_on_startup: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://millwright.db?mode=rwc".to_string()),

            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string()),

            default_settings_path: env::var("DEFAULT_SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(BUNDLED_DEFAULTS)),

            seed_on_startup: parse_bool(
                "SEED_ON_STARTUP",
                &env::var("SEED_ON_STARTUP").unwrap_or_else(|_| "true".to_string()),
            )?,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::ConfigError(format!("Invalid {}", name))),
    }
}
