//! Config validation: required values present before anything connects.

use crate::config::AppConfig;
use crate::error::ConfigError;

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let required = [
        ("postgres.host", config.postgres.host.as_str()),
        ("postgres.user", config.postgres.user.as_str()),
        ("postgres.dbname", config.postgres.dbname.as_str()),
        ("http_server.address", config.http_server.address.as_str()),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} is required", name)));
        }
    }
    if config.postgres.max_connections == 0 {
        return Err(ConfigError::Validation("postgres.max_connections must be at least 1".into()));
    }
    if config.http_server.timeout_secs == 0 {
        return Err(ConfigError::Validation("http_server.timeout_secs must be at least 1".into()));
    }
    Ok(())
}
