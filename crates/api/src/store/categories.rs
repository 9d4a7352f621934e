//! Category repository over the document store.

use brocante_core::CategoryId;

use super::{DocumentStore, StoreError};
use crate::models::Category;

/// Repository for category documents.
pub struct CategoryRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Persist a new category.
    ///
    /// The parent reference, when present, is stored without being resolved.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn create(&self, category: Category) -> Result<Category, StoreError> {
        self.store
            .categories
            .write()
            .await
            .insert(category.id, category.clone());
        Ok(category)
    }

    /// Get a category by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.store.categories.read().await.get(&id).cloned())
    }

    /// All categories, in store order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn list(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self
            .store
            .categories
            .read()
            .await
            .values()
            .cloned()
            .collect())
    }

    /// Remove a category, returning the removed document when it existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn remove(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.store.categories.write().await.remove(&id))
    }
}
