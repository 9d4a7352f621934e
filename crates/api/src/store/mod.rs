//! Document store and per-collection repositories.
//!
//! The production system delegates persistence to an external document
//! database; that collaborator is out of scope here, so `DocumentStore` is an
//! in-process stand-in with the same contract: per-document atomicity within
//! a collection, no multi-document transactions. Everything above this module
//! goes through the explicit repository interfaces — a string id never
//! resolves to a document without a lookup.

pub mod categories;
pub mod products;
pub mod users;

use std::collections::BTreeMap;

use thiserror::Error;
use tokio::sync::RwLock;

use brocante_core::{CategoryId, ProductId, UserId};

use crate::models::{Category, Product, User};

pub use categories::CategoryRepository;
pub use products::{ProductFilter, ProductPage, ProductRepository};
pub use users::UserRepository;

/// Store operation failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The targeted document was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Shared document collections.
///
/// Each collection sits behind its own lock; a write replaces one document
/// at a time, which is the per-document atomicity the external store would
/// give. Iteration order is the key order of the collection, which is stable
/// for a given set of documents but carries no insertion-order promise.
#[derive(Debug, Default)]
pub struct DocumentStore {
    pub(crate) users: RwLock<BTreeMap<UserId, User>>,
    pub(crate) categories: RwLock<BTreeMap<CategoryId, Category>>,
    pub(crate) products: RwLock<BTreeMap<ProductId, Product>>,
}

impl DocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository over the user collection.
    #[must_use]
    pub const fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self)
    }

    /// Repository over the category collection.
    #[must_use]
    pub const fn categories(&self) -> CategoryRepository<'_> {
        CategoryRepository::new(self)
    }

    /// Repository over the product collection.
    #[must_use]
    pub const fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(self)
    }
}
