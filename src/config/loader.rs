//! Load config from the JSON file named by `CONFIG_PATH`.

use crate::config::{validate, AppConfig};
use crate::error::ConfigError;
use std::path::Path;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Read `.env` (if any), then load and validate the file named by `CONFIG_PATH`.
pub fn load() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    let path = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .ok_or(ConfigError::MissingPath)?;
    load_from_path(&path)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Load(e.to_string()))?;
    let config = parse(&raw)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

pub fn parse(raw: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(raw).map_err(|e| ConfigError::Load(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatusMode;
    use std::io::Write;

    const MINIMAL: &str = r#"{
        "postgres": { "host": "localhost", "user": "app", "password": "secret", "dbname": "users" },
        "http_server": { "address": "0.0.0.0:8080" }
    }"#;

    #[test]
    fn defaults_fill_optional_fields() {
        let config = parse(MINIMAL).unwrap();
        assert_eq!(config.env, "local");
        assert!(config.is_local());
        assert_eq!(config.postgres.port, 5432);
        assert_eq!(config.postgres.max_connections, 5);
        assert!(!config.postgres.ensure_database);
        assert_eq!(config.http_server.timeout_secs, 4);
        assert_eq!(config.http_server.status_mode, StatusMode::Envelope);
    }

    #[test]
    fn http_status_mode_is_parsed() {
        let raw = r#"{
            "env": "prod",
            "postgres": { "host": "db", "port": 6543, "user": "app", "dbname": "users" },
            "http_server": { "address": "0.0.0.0:8080", "timeout_secs": 10, "status_mode": "http" }
        }"#;
        let config = parse(raw).unwrap();
        assert!(!config.is_local());
        assert_eq!(config.postgres.port, 6543);
        assert_eq!(config.http_server.timeout().as_secs(), 10);
        assert_eq!(config.http_server.status_mode, StatusMode::Http);
    }

    #[test]
    fn missing_section_is_a_load_error() {
        let raw = r#"{ "http_server": { "address": "0.0.0.0:8080" } }"#;
        assert!(matches!(parse(raw), Err(ConfigError::Load(_))));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(load_from_path(&path), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let config = load_from_path(file.path()).unwrap();
        assert_eq!(config.postgres.dbname, "users");
        assert_eq!(config.http_server.address, "0.0.0.0:8080");
    }

    #[test]
    fn debug_output_hides_password() {
        let config = parse(MINIMAL).unwrap();
        let printed = format!("{:?}", config.postgres);
        assert!(!printed.contains("secret"));
    }
}
