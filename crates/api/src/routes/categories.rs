//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use brocante_core::CategoryId;

use crate::error::{ApiError, Result};
use crate::links::{Linked, Resource, enrich};
use crate::middleware::CurrentUser;
use crate::models::Category;
use crate::state::AppState;

/// Category creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
    pub parent_id: Option<String>,
}

/// `GET /categories`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.store().categories().list().await?;

    let enriched: Vec<_> = categories
        .into_iter()
        .map(|category| {
            let links = enrich(state.base_url(), Resource::CategoryItem { id: category.id });
            Linked::new(category, links)
        })
        .collect();

    Ok(Json(json!({ "categories": enriched })))
}

/// `GET /categories/{id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<impl IntoResponse> {
    let category = state
        .store()
        .categories()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("category does not exist".to_string()))?;

    let links = enrich(state.base_url(), Resource::CategoryDetail { id: category.id });
    Ok(Json(json!({ "category": Linked::new(category, links) })))
}

/// `POST /categories`
///
/// The parent reference is stored unresolved; only its shape is checked.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse> {
    let mut errors = Vec::new();

    if body.name.is_empty() || body.name.len() > 50 {
        errors.push("name must contain between 1 and 50 characters".to_string());
    }

    let parent_id = match body.parent_id.as_deref() {
        None | Some("") => None,
        Some(raw) => match CategoryId::parse(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push("parent category id is not valid".to_string());
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let category = state
        .store()
        .categories()
        .create(Category::new(body.name, parent_id))
        .await?;

    tracing::info!(category_id = %category.id, "category created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Category created",
            "category": category,
        })),
    ))
}

/// `DELETE /categories/{id}`
///
/// Cascade: verify existence, remove the category, then remove every product
/// referencing it. No rollback between the steps.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
    Path(id): Path<CategoryId>,
) -> Result<impl IntoResponse> {
    let store = state.store();

    store
        .categories()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("category does not exist".to_string()))?;

    store.categories().remove(id).await?;
    let removed_products = store.products().remove_by_category(id).await?;

    tracing::info!(category_id = %id, removed_products, "category deleted");

    Ok(Json(json!({ "message": "Category deleted" })))
}
