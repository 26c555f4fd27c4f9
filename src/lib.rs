//! User API: CRUD over a single PostgreSQL-backed `users` table with a uniform
//! JSON response envelope.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use config::{AppConfig, HttpServerConfig, PostgresConfig, StatusMode};
pub use error::{AppError, ConfigError, ErrorKind, Operation, StoreError};
pub use migration::apply_migrations;
pub use model::{User, UserRequest};
pub use response::Envelope;
pub use routes::{app, common_routes, user_routes};
pub use state::AppState;
pub use store::{InMemoryUserStore, PgUserStore, UserStore};
