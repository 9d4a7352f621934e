//! Product listing model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use brocante_core::{CategoryId, Price, ProductId, UserId};

/// A listed product.
///
/// `sold` is true exactly while the product sits in some user's cart; the
/// cart service owns both writes and keeps them in step (best-effort, see
/// [`crate::services::cart`]).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    pub category: CategoryId,
    pub owner: UserId,
    pub sold: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create an unsold listing.
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        price: Price,
        image_url: String,
        category: CategoryId,
        owner: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::generate(),
            name,
            description,
            price,
            image_url,
            category,
            owner,
            sold: false,
            created_at: now,
            updated_at: now,
        }
    }
}
