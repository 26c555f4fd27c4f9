//! Schema setup for the `users` table. Idempotent; run at startup before the first query.

use crate::error::StoreError;
use sqlx::PgPool;

const MIGRATIONS: &[(&str, &str)] = &[(
    "create_users",
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        firstname TEXT NOT NULL,
        lastname TEXT NOT NULL,
        email TEXT NOT NULL,
        age INTEGER NOT NULL,
        created TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
)];

pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    for (name, ddl) in MIGRATIONS {
        tracing::debug!(migration = %name, "applying");
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(count = MIGRATIONS.len(), "migrations applied");
    Ok(())
}
