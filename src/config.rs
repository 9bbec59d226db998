use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env, fs, path::Path};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const DEFAULT_DATABASE_PATH: &str = "shopfront.db";
const DEFAULT_MAX_PASSWORD_ATTEMPTS: u32 = 5;

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default)]
    pub login: LoginConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoginConfig {
    /// Ceiling on password re-prompts before the login flow gives up.
    #[serde(default = "default_max_password_attempts")]
    pub max_password_attempts: u32,
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

const fn default_max_password_attempts() -> u32 {
    DEFAULT_MAX_PASSWORD_ATTEMPTS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            login: LoginConfig::default(),
        }
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            max_password_attempts: default_max_password_attempts(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path_ref, e)))?;
    let app_config: AppConfig = toml::from_str(&contents).map_err(|e| {
        Error::Config(format!(
            "Failed to parse TOML from config file {:?}: {}",
            path_ref, e
        ))
    })?;
    Ok(app_config)
}

/// Resolves the effective application configuration.
///
/// Reads the TOML file named by `SHOPFRONT_CONFIG` (default `config.toml`);
/// a missing file falls back to built-in defaults so the app can run out of
/// the box. `SHOPFRONT_DB`, if set, overrides the configured database path.
pub fn load_app_configuration() -> Result<AppConfig> {
    let config_path =
        env::var("SHOPFRONT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if Path::new(&config_path).exists() {
        load_config(&config_path)?
    } else {
        tracing::warn!(
            "Config file {:?} not found, using built-in defaults.",
            config_path
        );
        AppConfig::default()
    };

    if let Ok(db_path) = env::var("SHOPFRONT_DB") {
        tracing::debug!("SHOPFRONT_DB overrides database path: {}", db_path);
        config.database_path = db_path;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let toml_str = r#"
            database_path = "/tmp/store.db"

            [login]
            max_password_attempts = 3
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database_path, "/tmp/store.db");
        assert_eq!(config.login.max_password_attempts, 3);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.database_path, DEFAULT_DATABASE_PATH);
        assert_eq!(
            config.login.max_password_attempts,
            DEFAULT_MAX_PASSWORD_ATTEMPTS
        );
    }
}
