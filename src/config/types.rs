//! Config types matching the JSON config file.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// `local` selects human-readable logs; anything else logs JSON lines.
    #[serde(default = "default_env")]
    pub env: String,
    pub postgres: PostgresConfig,
    pub http_server: HttpServerConfig,
}

impl AppConfig {
    pub fn is_local(&self) -> bool {
        self.env == "local"
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    #[serde(default = "default_pg_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub dbname: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Create `dbname` through the `postgres` admin database before connecting.
    #[serde(default)]
    pub ensure_database: bool,
}

impl PostgresConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        self.options_for(&self.dbname)
    }

    pub fn admin_connect_options(&self) -> PgConnectOptions {
        self.options_for("postgres")
    }

    fn options_for(&self, database: &str) -> PgConnectOptions {
        let opts = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(database);
        if self.password.is_empty() {
            opts
        } else {
            opts.password(&self.password)
        }
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("dbname", &self.dbname)
            .field("max_connections", &self.max_connections)
            .field("ensure_database", &self.ensure_database)
            .finish()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpServerConfig {
    pub address: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub status_mode: StatusMode,
}

impl HttpServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How error outcomes reach the transport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMode {
    /// Every response is HTTP 200; the envelope carries the logical status.
    #[default]
    Envelope,
    /// Errors use 400/404/500 both as HTTP status and in the envelope.
    Http,
}

fn default_env() -> String {
    "local".into()
}

fn default_pg_port() -> u16 {
    5432
}

fn default_max_connections() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    4
}
