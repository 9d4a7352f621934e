//! Product repository over the document store.
//!
//! Listing and search share one pagination shape: a window of documents in
//! store order plus the total match count, so clients can page without a
//! second request.

use chrono::Utc;

use brocante_core::{CategoryId, ProductId, UserId};

use super::{DocumentStore, StoreError};
use crate::models::Product;

/// One page of products plus the total number of matches.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: usize,
}

/// Filter applied to the product collection.
///
/// An empty filter matches everything; both criteria combine conjunctively.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name.
    pub name_contains: Option<String>,
    /// Exact category match.
    pub category: Option<CategoryId>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.name_contains
            && !product
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        {
            return false;
        }
        if let Some(category) = self.category
            && product.category != category
        {
            return false;
        }
        true
    }
}

/// Repository for product documents.
pub struct ProductRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Persist a new product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn create(&self, product: Product) -> Result<Product, StoreError> {
        self.store
            .products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.store.products.read().await.get(&id).cloned())
    }

    /// Replace a stored product document, refreshing its update timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the product does not exist.
    pub async fn update(&self, mut product: Product) -> Result<Product, StoreError> {
        let mut products = self.store.products.write().await;
        if !products.contains_key(&product.id) {
            return Err(StoreError::NotFound);
        }
        product.updated_at = Utc::now();
        products.insert(product.id, product.clone());
        Ok(product)
    }

    /// Remove a product, returning the removed document when it existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn remove(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.store.products.write().await.remove(&id))
    }

    /// One page of the whole collection, in store order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn list_page(&self, page: u64, per_page: usize) -> Result<ProductPage, StoreError> {
        self.find(&ProductFilter::default(), page, per_page).await
    }

    /// One page of the products matching `filter`, in store order, with the
    /// total match count.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn find(
        &self,
        filter: &ProductFilter,
        page: u64,
        per_page: usize,
    ) -> Result<ProductPage, StoreError> {
        let products = self.store.products.read().await;
        let matches: Vec<&Product> = products.values().filter(|p| filter.matches(p)).collect();
        let total = matches.len();

        let skip = usize::try_from(page.saturating_sub(1)).unwrap_or(usize::MAX)
            .saturating_mul(per_page);
        let items = matches
            .into_iter()
            .skip(skip)
            .take(per_page)
            .cloned()
            .collect();

        Ok(ProductPage { items, total })
    }

    /// All products owned by `owner`, in store order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn by_owner(&self, owner: UserId) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .store
            .products
            .read()
            .await
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect())
    }

    /// Remove every product referencing `category`, returning how many were
    /// removed. Used by the category cascade delete.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store call fails.
    pub async fn remove_by_category(&self, category: CategoryId) -> Result<usize, StoreError> {
        let mut products = self.store.products.write().await;
        let before = products.len();
        products.retain(|_, p| p.category != category);
        Ok(before - products.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use brocante_core::Price;

    fn product(name: &str, category: CategoryId, owner: UserId) -> Product {
        Product::new(
            name.to_string(),
            "desc".to_string(),
            Price::parse("10.00").unwrap(),
            "http://x/1.jpg".to_string(),
            category,
            owner,
        )
    }

    #[tokio::test]
    async fn test_pagination_windows_and_total() {
        let store = DocumentStore::new();
        let category = CategoryId::generate();
        let owner = UserId::generate();
        for i in 0..12 {
            store
                .products()
                .create(product(&format!("item {i}"), category, owner))
                .await
                .unwrap();
        }

        let first = store.products().list_page(1, 9).await.unwrap();
        assert_eq!(first.items.len(), 9);
        assert_eq!(first.total, 12);

        let second = store.products().list_page(2, 9).await.unwrap();
        assert_eq!(second.items.len(), 3);
        assert_eq!(second.total, 12);

        let beyond = store.products().list_page(3, 9).await.unwrap();
        assert!(beyond.items.is_empty());
    }

    #[tokio::test]
    async fn test_filter_name_is_case_insensitive_substring() {
        let store = DocumentStore::new();
        let category = CategoryId::generate();
        let owner = UserId::generate();
        store
            .products()
            .create(product("Wooden Table", category, owner))
            .await
            .unwrap();
        store
            .products()
            .create(product("Chair", category, owner))
            .await
            .unwrap();

        let filter = ProductFilter {
            name_contains: Some("tAbLe".to_string()),
            category: None,
        };
        let page = store.products().find(&filter, 1, 9).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items.first().unwrap().name, "Wooden Table");
    }

    #[tokio::test]
    async fn test_filter_combines_name_and_category() {
        let store = DocumentStore::new();
        let tables = CategoryId::generate();
        let chairs = CategoryId::generate();
        let owner = UserId::generate();
        store
            .products()
            .create(product("Oak table", tables, owner))
            .await
            .unwrap();
        store
            .products()
            .create(product("Oak chair", chairs, owner))
            .await
            .unwrap();

        let filter = ProductFilter {
            name_contains: Some("oak".to_string()),
            category: Some(chairs),
        };
        let page = store.products().find(&filter, 1, 9).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items.first().unwrap().category, chairs);
    }

    #[tokio::test]
    async fn test_remove_by_category_cascade() {
        let store = DocumentStore::new();
        let doomed = CategoryId::generate();
        let kept = CategoryId::generate();
        let owner = UserId::generate();
        store.products().create(product("a", doomed, owner)).await.unwrap();
        store.products().create(product("b", doomed, owner)).await.unwrap();
        store.products().create(product("c", kept, owner)).await.unwrap();

        let removed = store.products().remove_by_category(doomed).await.unwrap();
        assert_eq!(removed, 2);

        let rest = store.products().list_page(1, 9).await.unwrap();
        assert_eq!(rest.total, 1);
        assert_eq!(rest.items.first().unwrap().category, kept);
    }

    #[tokio::test]
    async fn test_by_owner() {
        let store = DocumentStore::new();
        let category = CategoryId::generate();
        let ada = UserId::generate();
        let bob = UserId::generate();
        store.products().create(product("a", category, ada)).await.unwrap();
        store.products().create(product("b", category, bob)).await.unwrap();

        let owned = store.products().by_owner(ada).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned.first().unwrap().owner, ada);
    }
}
