//! Record store: all persistence of the `users` table goes through [`UserStore`].

mod memory;
mod postgres;

pub use memory::InMemoryUserStore;
pub use postgres::{connect, ensure_database_exists, PgUserStore};

use crate::error::StoreError;
use crate::model::User;
use async_trait::async_trait;
use uuid::Uuid;

/// Capability set the handlers depend on. Implemented by [`PgUserStore`] and
/// [`InMemoryUserStore`]; tests supply their own doubles.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a complete record (id and creation time already set).
    async fn create(&self, user: &User) -> Result<(), StoreError>;

    /// Fetch one record. `StoreError::NotFound` when no row matches.
    async fn read(&self, id: Uuid) -> Result<User, StoreError>;

    /// Overwrite firstname, lastname, email and age of `user.id`, keeping `created`.
    /// Returns the stored record; `StoreError::NotFound` when no row was affected.
    async fn update(&self, user: &User) -> Result<User, StoreError>;

    /// Remove one record. `StoreError::NotFound` when no row was affected.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
