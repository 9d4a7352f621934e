//! User repository over the document store.

use chrono::Utc;

use brocante_core::{Email, UserId};

use super::{DocumentStore, StoreError};
use crate::models::User;

/// Repository for user documents.
pub struct UserRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Persist a new user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the email is already registered.
    pub async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.store.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.store.users.read().await.get(&id).cloned())
    }

    /// Get a user by email address.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        Ok(self
            .store
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    /// Whether an email address is already registered.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn email_exists(&self, email: &Email) -> Result<bool, StoreError> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    /// Replace a stored user document, refreshing its update timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user does not exist.
    pub async fn update(&self, mut user: User) -> Result<User, StoreError> {
        let mut users = self.store.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(StoreError::NotFound);
        }
        user.updated_at = Utc::now();
        users.insert(user.id, user.clone());
        Ok(user)
    }

    /// All users, in store order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.store.users.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(
            Email::parse(email).unwrap(),
            "Ada".to_string(),
            "hash".to_string(),
            "Quebec".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = DocumentStore::new();
        let created = store.users().create(user("a@example.com")).await.unwrap();

        let found = store.users().get(created.id).await.unwrap().unwrap();
        assert_eq!(found.email.as_str(), "a@example.com");

        let by_email = store
            .users()
            .get_by_email(&Email::parse("a@example.com").unwrap())
            .await
            .unwrap();
        assert!(by_email.is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let store = DocumentStore::new();
        store.users().create(user("a@example.com")).await.unwrap();

        let err = store.users().create(user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.users().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp() {
        let store = DocumentStore::new();
        let mut created = store.users().create(user("a@example.com")).await.unwrap();
        let before = created.updated_at;

        created.city = "Montreal".to_string();
        let updated = store.users().update(created).await.unwrap();
        assert_eq!(updated.city, "Montreal");
        assert!(updated.updated_at >= before);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = DocumentStore::new();
        let err = store.users().update(user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
