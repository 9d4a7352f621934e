//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use brocante_core::{CategoryId, Price, ProductId, UserId};

use crate::error::{ApiError, Result};
use crate::links::{Linked, Resource, enrich};
use crate::middleware::CurrentUser;
use crate::models::{Product, User};
use crate::state::AppState;

/// Page size shared by listing and search.
pub const PER_PAGE: usize = 9;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

impl PageQuery {
    /// The requested page, clamped to at least 1.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Product creation request body.
///
/// The price is accepted as either a JSON number or a string, and validated
/// as a decimal either way.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Option<PriceInput>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
}

/// Raw price field: number or string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl PriceInput {
    fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// A product resolved with its owner, as returned by listing, search, and
/// detail endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    pub category: CategoryId,
    pub sold: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerView>,
}

/// The owner projection embedded in a [`ProductView`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerView {
    pub id: UserId,
    pub name: String,
    pub city: String,
}

impl From<&User> for OwnerView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            city: user.city.clone(),
        }
    }
}

impl ProductView {
    /// Build a view from a stored product and its (possibly missing) owner.
    #[must_use]
    pub fn new(product: Product, owner: Option<&User>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
            category: product.category,
            sold: product.sold,
            created_at: product.created_at,
            updated_at: product.updated_at,
            owner: owner.map(OwnerView::from),
        }
    }
}

/// Resolve a batch of products with their owners and attach links.
pub(crate) async fn resolve_views(
    state: &AppState,
    products: Vec<Product>,
) -> Result<Vec<Linked<ProductView>>> {
    let users = state.store().users();
    let mut views = Vec::with_capacity(products.len());

    for product in products {
        let links = enrich(state.base_url(), Resource::Product {
            id: product.id,
            category: product.category,
            owner: product.owner,
        });
        let owner = users.get(product.owner).await?;
        views.push(Linked::new(ProductView::new(product, owner.as_ref()), links));
    }

    Ok(views)
}

/// `GET /products?page=`
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .store()
        .products()
        .list_page(query.page(), PER_PAGE)
        .await?;

    let products = resolve_views(&state, page.items).await?;

    Ok(Json(json!({
        "products": products,
        "totalItems": page.total,
    })))
}

/// `GET /products/user` — the authenticated caller's own listings.
#[instrument(skip(state))]
pub async fn by_owner(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse> {
    let owned = state.store().products().by_owner(identity.user_id).await?;
    let products = resolve_views(&state, owned).await?;

    Ok(Json(json!({ "products": products })))
}

/// `GET /products/{id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = state
        .store()
        .products()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("product does not exist".to_string()))?;

    let owner = state.store().users().get(product.owner).await?;
    let links = enrich(state.base_url(), Resource::Product {
        id: product.id,
        category: product.category,
        owner: product.owner,
    });

    Ok(Json(json!({
        "product": Linked::new(ProductView::new(product, owner.as_ref()), links),
    })))
}

/// `POST /products`
///
/// Field violations are collected, with one deliberate exception kept for
/// wire compatibility with existing clients: an empty category responds
/// immediately with the violations gathered so far, before the category and
/// owner references are resolved.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(body): Json<CreateProductRequest>,
) -> Result<impl IntoResponse> {
    let mut errors = Vec::new();

    if body.name.is_empty() || body.name.len() > 50 {
        errors.push("name must contain between 1 and 50 characters".to_string());
    }
    if body.description.is_empty() || body.description.len() > 255 {
        errors.push("description must contain between 1 and 255 characters".to_string());
    }

    let price = match body.price {
        Some(ref input) => match Price::parse(&input.as_text()) {
            Ok(price) => Some(price),
            Err(err) => {
                errors.push(err.to_string());
                None
            }
        },
        None => {
            errors.push("price must be a decimal number".to_string());
            None
        }
    };

    if body.image_url.len() > 255 {
        errors.push("image url must contain at most 255 characters".to_string());
    }
    if body.image_url.is_empty() {
        errors.push("image url must not be empty".to_string());
    }

    if body.category.is_empty() {
        errors.push("category must not be empty".to_string());
        return Err(ApiError::Validation(errors));
    }

    let category = match CategoryId::parse(&body.category) {
        Ok(id) => state.store().categories().get(id).await?,
        Err(_) => None,
    };
    if category.is_none() {
        errors.push("category does not exist".to_string());
    }

    let owner = state.store().users().get(identity.user_id).await?;
    if owner.is_none() {
        errors.push("user does not exist".to_string());
    }

    let (Some(category), Some(owner), Some(price)) = (category, owner, price) else {
        return Err(ApiError::Validation(errors));
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let product = state
        .store()
        .products()
        .create(Product::new(
            body.name,
            body.description,
            price,
            body.image_url,
            category.id,
            owner.id,
        ))
        .await?;

    tracing::info!(product_id = %product.id, owner_id = %owner.id, "product created");

    let links = enrich(state.base_url(), Resource::Product {
        id: product.id,
        category: product.category,
        owner: product.owner,
    });

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Product created",
            "product": Linked::new(product, links),
        })),
    ))
}

/// `DELETE /products/{id}`
///
/// Responds with the removed representation; an absent id is a 404.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = state
        .store()
        .products()
        .remove(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("product does not exist".to_string()))?;

    tracing::info!(product_id = %id, "product deleted");

    let links = enrich(state.base_url(), Resource::Product {
        id: product.id,
        category: product.category,
        owner: product.owner,
    });

    Ok(Json(json!({
        "message": "Product deleted",
        "product": Linked::new(product, links),
    })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_clamps_to_one() {
        assert_eq!(PageQuery { page: None }.page(), 1);
        assert_eq!(PageQuery { page: Some(0) }.page(), 1);
        assert_eq!(PageQuery { page: Some(4) }.page(), 4);
    }

    #[test]
    fn test_price_input_accepts_number_and_string() {
        let number: PriceInput = serde_json::from_str("50.0").unwrap();
        assert!(Price::parse(&number.as_text()).is_ok());

        let text: PriceInput = serde_json::from_str("\"49.99\"").unwrap();
        assert!(Price::parse(&text.as_text()).is_ok());

        let garbage: PriceInput = serde_json::from_str("\"cheap\"").unwrap();
        assert!(Price::parse(&garbage.as_text()).is_err());
    }
}
