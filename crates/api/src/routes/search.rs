//! Search route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use brocante_core::CategoryId;

use crate::error::Result;
use crate::routes::products::{PER_PAGE, resolve_views};
use crate::state::AppState;
use crate::store::ProductFilter;

/// The search term that means "no name filter".
const MATCH_ALL: &str = "all";

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub page: Option<u64>,
    pub category: Option<String>,
}

/// `GET /search/{term}?category=&page=`
///
/// The literal term `"all"` disables the name filter; otherwise the name
/// match is a case-insensitive substring. A category, when present, must
/// match exactly. Output is shaped identically to the product listing.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Path(term): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let name_contains = if term == MATCH_ALL {
        None
    } else {
        Some(term)
    };

    // An unparseable category reference cannot match any stored document.
    let mut unmatchable_category = false;
    let category = match query.category.as_deref() {
        None | Some("") => None,
        Some(raw) => match CategoryId::parse(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                unmatchable_category = true;
                None
            }
        },
    };

    let page_number = query.page.unwrap_or(1).max(1);

    let page = if unmatchable_category {
        crate::store::ProductPage {
            items: Vec::new(),
            total: 0,
        }
    } else {
        let filter = ProductFilter {
            name_contains,
            category,
        };
        state
            .store()
            .products()
            .find(&filter, page_number, PER_PAGE)
            .await?
    };

    let products = resolve_views(&state, page.items).await?;

    Ok(Json(json!({
        "products": products,
        "totalItems": page.total,
    })))
}
