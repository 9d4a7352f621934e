//! Cart route handlers.
//!
//! The cart itself lives on the user document; the paired sold-flag write
//! goes through [`crate::services::cart::CartService`].

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use brocante_core::ProductId;

use crate::error::{ApiError, Result};
use crate::links::{Linked, Links, Resource, enrich};
use crate::middleware::CurrentUser;
use crate::models::Product;
use crate::services::cart::CartService;
use crate::state::AppState;

/// One cart entry: the resolved product plus its action links.
#[derive(Debug, Serialize)]
pub struct CartEntry {
    pub item: Product,
    #[serde(rename = "_links")]
    pub links: Links,
}

/// `GET /cart`
///
/// Resolves every cart entry to its full product representation. Entries
/// whose product no longer resolves are dropped from the view.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse> {
    let store = state.store();
    let user = store
        .users()
        .get(identity.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user does not exist".to_string()))?;

    let mut cart = Vec::with_capacity(user.cart.len());
    for product_id in user.cart {
        if let Some(product) = store.products().get(product_id).await? {
            let links = enrich(state.base_url(), Resource::CartItem { id: product.id });
            cart.push(CartEntry {
                item: product,
                links,
            });
        }
    }

    Ok(Json(json!({ "cart": cart })))
}

/// `PUT /cart/{productId}` — add to cart, marking the product sold.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(product_id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = CartService::new(state.store())
        .add(identity.user_id, product_id)
        .await?;

    tracing::info!(user_id = %identity.user_id, %product_id, "product added to cart");

    let links = enrich(state.base_url(), Resource::Product {
        id: product.id,
        category: product.category,
        owner: product.owner,
    });
    Ok(Json(Linked::new(product, links)))
}

/// `DELETE /cart/{productId}` — remove from cart, marking the product unsold.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(product_id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = CartService::new(state.store())
        .remove(identity.user_id, product_id)
        .await?;

    tracing::info!(user_id = %identity.user_id, %product_id, "product removed from cart");

    let links = enrich(state.base_url(), Resource::Product {
        id: product.id,
        category: product.category,
        owner: product.owner,
    });
    Ok(Json(Linked::new(product, links)))
}
