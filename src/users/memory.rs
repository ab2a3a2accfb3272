//! In-process `UserStore` used by handler tests. Mirrors the database contract:
//! same validation, unique email, newest-first listing.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo::UserStore;
use crate::users::repo_types::{StoreError, User};
use crate::users::services::validate_user;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, name: &str, email: &str) -> Result<User, StoreError> {
        let input = validate_user(name, email)?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == input.email) {
            return Err(StoreError::Conflict {
                field: "email".into(),
            });
        }
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        // later inserts win ties on equal timestamps
        let mut users: Vec<User> = self.users.lock().unwrap().iter().rev().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_by_id(&self, id: Uuid, name: &str, email: &str) -> Result<User, StoreError> {
        let input = validate_user(name, email)?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.id != id && u.email == input.email) {
            return Err(StoreError::Conflict {
                field: "email".into(),
            });
        }
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;
        user.name = input.name;
        user.email = input.email;
        Ok(user.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        let pos = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;
        Ok(users.remove(pos))
    }
}

/// Store whose every call fails as if the database were unreachable.
pub struct UnreachableUserStore;

#[async_trait]
impl UserStore for UnreachableUserStore {
    async fn create(&self, _name: &str, _email: &str) -> Result<User, StoreError> {
        Err(StoreError::Connection(sqlx::Error::PoolTimedOut))
    }
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Connection(sqlx::Error::PoolTimedOut))
    }
    async fn find_by_id(&self, _id: Uuid) -> Result<User, StoreError> {
        Err(StoreError::Connection(sqlx::Error::PoolTimedOut))
    }
    async fn update_by_id(&self, _id: Uuid, _n: &str, _e: &str) -> Result<User, StoreError> {
        Err(StoreError::Connection(sqlx::Error::PoolTimedOut))
    }
    async fn delete_by_id(&self, _id: Uuid) -> Result<User, StoreError> {
        Err(StoreError::Connection(sqlx::Error::PoolTimedOut))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_id_and_lists_newest_first() {
        let store = MemoryUserStore::default();
        let alice = store.create("Alice", "a@x.com").await.unwrap();
        let bob = store.create("Bob", "b@x.com").await.unwrap();
        assert_ne!(alice.id, bob.id);

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, bob.id);
        assert_eq!(listed[1].id, alice.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryUserStore::default();
        store.create("Alice", "a@x.com").await.unwrap();
        let err = store.create("Bob", "A@X.com").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { ref field } if field == "email"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_id_and_created_at() {
        let store = MemoryUserStore::default();
        let created = store.create("Alice", "a@x.com").await.unwrap();
        let updated = store
            .update_by_id(created.id, "Alicia", "alicia@x.com")
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);

        let fetched = store.find_by_id(created.id).await.unwrap();
        assert_eq!(fetched.name, "Alicia");
        assert_eq!(fetched.email, "alicia@x.com");
    }

    #[tokio::test]
    async fn update_to_own_email_is_allowed() {
        let store = MemoryUserStore::default();
        let created = store.create("Alice", "a@x.com").await.unwrap();
        assert!(store.update_by_id(created.id, "Al", "a@x.com").await.is_ok());
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let store = MemoryUserStore::default();
        let created = store.create("Alice", "a@x.com").await.unwrap();
        let deleted = store.delete_by_id(created.id).await.unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(matches!(
            store.delete_by_id(created.id).await,
            Err(StoreError::NotFound)
        ));
        assert_eq!(store.len(), 0);
    }
}
