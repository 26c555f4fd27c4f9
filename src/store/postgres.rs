//! PostgreSQL record store and connection setup.

use super::UserStore;
use crate::config::PostgresConfig;
use crate::error::StoreError;
use crate::model::User;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{ConnectOptions, PgPool};
use uuid::Uuid;

const INSERT_USER: &str =
    "INSERT INTO users (id, firstname, lastname, email, age, created) VALUES ($1, $2, $3, $4, $5, $6)";

const SELECT_USER: &str =
    "SELECT id, firstname, lastname, email, age, created FROM users WHERE id = $1";

// RETURNING yields no row when nothing matched; that is the affected-row check.
const UPDATE_USER: &str = "UPDATE users SET firstname = $1, lastname = $2, email = $3, age = $4 \
     WHERE id = $5 RETURNING id, firstname, lastname, email, age, created";

const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

/// Store over a pooled PostgreSQL connection.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        PgUserStore { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[tracing::instrument(skip(self, user), fields(id = %user.id))]
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        tracing::debug!(sql = %INSERT_USER, "query");
        sqlx::query(INSERT_USER)
            .bind(user.id)
            .bind(&user.firstname)
            .bind(&user.lastname)
            .bind(&user.email)
            .bind(user.age)
            .bind(user.created)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn read(&self, id: Uuid) -> Result<User, StoreError> {
        tracing::debug!(sql = %SELECT_USER, "query");
        sqlx::query_as::<_, User>(SELECT_USER)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(skip(self, user), fields(id = %user.id))]
    async fn update(&self, user: &User) -> Result<User, StoreError> {
        tracing::debug!(sql = %UPDATE_USER, "query");
        sqlx::query_as::<_, User>(UPDATE_USER)
            .bind(&user.firstname)
            .bind(&user.lastname)
            .bind(&user.email)
            .bind(user.age)
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        tracing::debug!(sql = %DELETE_USER, "query");
        let result = sqlx::query(DELETE_USER).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Open the connection pool and verify it with one round-trip.
pub async fn connect(cfg: &PostgresConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_with(cfg.connect_options())
        .await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(pool)
}

/// Ensure the configured database exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before [`connect`].
pub async fn ensure_database_exists(cfg: &PostgresConfig) -> Result<(), StoreError> {
    if cfg.dbname.is_empty() || cfg.dbname == "postgres" {
        return Ok(());
    }
    let mut conn = cfg.admin_connect_options().connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&cfg.dbname)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %cfg.dbname, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&cfg.dbname)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
