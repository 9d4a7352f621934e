//! Cart mutation and sold-state synchronization.
//!
//! Adding or removing a cart entry touches two documents: the user's cart
//! list and the product's sold flag. The store gives no multi-document
//! transaction, so the two writes run as a two-phase apply: the cart write
//! lands first, and if the sold-flag write then fails the cart write is
//! compensated before the error surfaces. The compensation itself is
//! best-effort; a failure there leaves the documented inconsistency window.

use thiserror::Error;

use brocante_core::{ProductId, UserId};

use crate::models::Product;
use crate::store::{DocumentStore, StoreError};

/// Errors from cart mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// Product absent, or already claimed by another cart.
    #[error("product does not exist")]
    ProductUnavailable,

    /// Caller's account is absent.
    #[error("user does not exist")]
    UnknownUser,

    /// Product is not in the caller's cart.
    #[error("product is not in the cart")]
    NotInCart,

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Orchestrates the paired cart/sold-flag writes.
pub struct CartService<'a> {
    store: &'a DocumentStore,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Add a product to a user's cart and mark it sold.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductUnavailable` when the product is absent or
    /// already sold, and `CartError::UnknownUser` when the account is absent.
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<Product, CartError> {
        let products = self.store.products();
        let users = self.store.users();

        let mut product = products
            .get(product_id)
            .await?
            .filter(|p| !p.sold)
            .ok_or(CartError::ProductUnavailable)?;
        let mut user = users.get(user_id).await?.ok_or(CartError::UnknownUser)?;

        user.cart.push(product_id);
        users.update(user.clone()).await?;

        product.sold = true;
        match products.update(product).await {
            Ok(updated) => Ok(updated),
            Err(err) => {
                // Second write failed: compensate the cart append.
                user.cart.retain(|id| *id != product_id);
                if let Err(undo) = users.update(user).await {
                    tracing::error!(error = %undo, %user_id, %product_id,
                        "cart compensation failed; cart references an unsold product");
                }
                Err(err.into())
            }
        }
    }

    /// Remove a product from a user's cart and mark it unsold.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductUnavailable` when the product is absent,
    /// `CartError::UnknownUser` when the account is absent, and
    /// `CartError::NotInCart` when the product is not in the caller's cart.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Product, CartError> {
        let products = self.store.products();
        let users = self.store.users();

        let mut product = products
            .get(product_id)
            .await?
            .ok_or(CartError::ProductUnavailable)?;
        let mut user = users.get(user_id).await?.ok_or(CartError::UnknownUser)?;

        let position = user
            .cart
            .iter()
            .position(|id| *id == product_id)
            .ok_or(CartError::NotInCart)?;
        user.cart.remove(position);
        users.update(user.clone()).await?;

        product.sold = false;
        match products.update(product).await {
            Ok(updated) => Ok(updated),
            Err(err) => {
                // Second write failed: compensate the cart removal.
                user.cart.insert(position.min(user.cart.len()), product_id);
                if let Err(undo) = users.update(user).await {
                    tracing::error!(error = %undo, %user_id, %product_id,
                        "cart compensation failed; cart entry dropped for a sold product");
                }
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{Category, User};
    use brocante_core::{Email, Price};

    async fn seed(store: &DocumentStore) -> (User, Product) {
        let owner = store
            .users()
            .create(User::new(
                Email::parse("seller@example.com").unwrap(),
                "Seller".to_string(),
                "hash".to_string(),
                "Quebec".to_string(),
            ))
            .await
            .unwrap();
        let category = store
            .categories()
            .create(Category::new("Furniture".to_string(), None))
            .await
            .unwrap();
        let product = store
            .products()
            .create(Product::new(
                "Table".to_string(),
                "desc".to_string(),
                Price::parse("50.00").unwrap(),
                "http://x/1.jpg".to_string(),
                category.id,
                owner.id,
            ))
            .await
            .unwrap();
        (owner, product)
    }

    async fn buyer(store: &DocumentStore, email: &str) -> User {
        store
            .users()
            .create(User::new(
                Email::parse(email).unwrap(),
                "Buyer".to_string(),
                "hash".to_string(),
                "Montreal".to_string(),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_marks_sold_and_fills_cart() {
        let store = DocumentStore::new();
        let (_, product) = seed(&store).await;
        let buyer = buyer(&store, "buyer@example.com").await;

        let updated = CartService::new(&store).add(buyer.id, product.id).await.unwrap();
        assert!(updated.sold);

        let stored_user = store.users().get(buyer.id).await.unwrap().unwrap();
        assert_eq!(stored_user.cart, vec![product.id]);
    }

    #[tokio::test]
    async fn test_add_sold_product_is_unavailable() {
        let store = DocumentStore::new();
        let (_, product) = seed(&store).await;
        let first = buyer(&store, "first@example.com").await;
        let second = buyer(&store, "second@example.com").await;

        let service = CartService::new(&store);
        service.add(first.id, product.id).await.unwrap();

        let err = service.add(second.id, product.id).await.unwrap_err();
        assert!(matches!(err, CartError::ProductUnavailable));

        // Second buyer's cart stays untouched.
        let stored = store.users().get(second.id).await.unwrap().unwrap();
        assert!(stored.cart.is_empty());
    }

    #[tokio::test]
    async fn test_add_missing_product_or_user() {
        let store = DocumentStore::new();
        let (_, product) = seed(&store).await;
        let buyer = buyer(&store, "buyer@example.com").await;
        let service = CartService::new(&store);

        let err = service.add(buyer.id, ProductId::generate()).await.unwrap_err();
        assert!(matches!(err, CartError::ProductUnavailable));

        let err = service.add(UserId::generate(), product.id).await.unwrap_err();
        assert!(matches!(err, CartError::UnknownUser));
    }

    #[tokio::test]
    async fn test_remove_restores_unsold_state() {
        let store = DocumentStore::new();
        let (_, product) = seed(&store).await;
        let buyer = buyer(&store, "buyer@example.com").await;
        let service = CartService::new(&store);

        service.add(buyer.id, product.id).await.unwrap();
        let updated = service.remove(buyer.id, product.id).await.unwrap();
        assert!(!updated.sold);

        let stored_user = store.users().get(buyer.id).await.unwrap().unwrap();
        assert!(stored_user.cart.is_empty());

        // Sold flag holds iff the product sits in some cart.
        let stored_product = store.products().get(product.id).await.unwrap().unwrap();
        assert!(!stored_product.sold);
    }

    #[tokio::test]
    async fn test_remove_not_in_cart() {
        let store = DocumentStore::new();
        let (_, product) = seed(&store).await;
        let buyer = buyer(&store, "buyer@example.com").await;

        let err = CartService::new(&store)
            .remove(buyer.id, product.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::NotInCart));
    }
}
