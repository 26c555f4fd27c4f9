use super::UserStore;
use crate::error::StoreError;
use crate::model::User;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Map-backed store with the same not-found semantics as PostgreSQL.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            // Mirrors the primary key violation the database would raise.
            return Err(StoreError::Db(sqlx::Error::Protocol(format!(
                "duplicate key value violates unique constraint: id {}",
                user.id
            ))));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn read(&self, id: Uuid) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&user.id).ok_or(StoreError::NotFound)?;
        stored.firstname.clone_from(&user.firstname);
        stored.lastname.clone_from(&user.lastname);
        stored.email.clone_from(&user.email);
        stored.age = user.age;
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserRequest;

    fn ivan() -> User {
        User::create(UserRequest {
            firstname: "Ivan".into(),
            lastname: "Ivanov".into(),
            email: "ivan@example.com".into(),
            age: 30,
        })
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let store = InMemoryUserStore::new();
        let user = ivan();
        store.create(&user).await.unwrap();
        assert_eq!(store.read(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn duplicate_id_is_a_persistence_error() {
        let store = InMemoryUserStore::new();
        let user = ivan();
        store.create(&user).await.unwrap();
        assert!(matches!(store.create(&user).await, Err(StoreError::Db(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_keeps_id_and_created() {
        let store = InMemoryUserStore::new();
        let user = ivan();
        store.create(&user).await.unwrap();

        let edit = User::edit(
            user.id,
            UserRequest {
                firstname: "Petr".into(),
                lastname: "Petrov".into(),
                email: "petr@example.com".into(),
                age: 41,
            },
        );
        let updated = store.update(&edit).await.unwrap();
        assert_eq!(updated.id, user.id);
        assert_eq!(updated.created, user.created);
        assert_eq!(updated.firstname, "Petr");
        assert_eq!(updated.age, 41);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let store = InMemoryUserStore::new();
        assert!(matches!(store.update(&ivan()).await, Err(StoreError::NotFound)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn second_delete_reports_not_found() {
        let store = InMemoryUserStore::new();
        let user = ivan();
        store.create(&user).await.unwrap();
        store.delete(user.id).await.unwrap();
        assert!(matches!(store.delete(user.id).await, Err(StoreError::NotFound)));
        assert!(matches!(store.read(user.id).await, Err(StoreError::NotFound)));
    }
}
