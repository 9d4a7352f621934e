//! User account model and its public projections.

use chrono::{DateTime, Utc};
use serde::Serialize;

use brocante_core::{Email, ProductId, UserId};

/// A registered account.
///
/// The password never leaves the store in serialized form: only its
/// irreversible hash is persisted, and the hash is skipped on serialization
/// so no representation can leak it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub city: String,
    /// Accounts this user follows; presence toggles membership.
    pub followers: Vec<UserId>,
    /// Products currently held in this user's cart.
    pub cart: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a fresh account with empty follower and cart lists.
    #[must_use]
    pub fn new(email: Email, name: String, password_hash: String, city: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            email,
            name,
            password_hash,
            city,
            followers: Vec::new(),
            cart: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public projection of an account: name and city, plus the cart when the
/// profile is the caller's own.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<Vec<ProductId>>,
}

impl UserProfile {
    /// Projection visible to any caller.
    #[must_use]
    pub fn public(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            city: user.city.clone(),
            cart: None,
        }
    }

    /// Projection of the caller's own account, cart included.
    #[must_use]
    pub fn own(user: &User) -> Self {
        Self {
            cart: Some(user.cart.clone()),
            ..Self::public(user)
        }
    }
}
