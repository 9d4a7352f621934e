//! User profile and social-graph route handlers.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use tracing::instrument;

use brocante_core::UserId;

use crate::error::{ApiError, Result};
use crate::links::{Linked, Resource, enrich};
use crate::middleware::CurrentUser;
use crate::models::UserProfile;
use crate::state::AppState;

/// `GET /users`
///
/// Public projection of every account: name and city, never the cart.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.store().users().list().await?;

    let enriched: Vec<_> = users
        .iter()
        .map(|user| {
            let links = enrich(state.base_url(), Resource::UserItem { id: user.id });
            Linked::new(UserProfile::public(user), links)
        })
        .collect();

    Ok(Json(json!({ "users": enriched })))
}

/// `GET /user` — the caller's own profile, cart included.
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<impl IntoResponse> {
    let user = state
        .store()
        .users()
        .get(identity.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user does not exist".to_string()))?;

    Ok(Json(json!({ "user": UserProfile::own(&user) })))
}

/// `GET /user/{id}` — public profile; the cart stays self-only.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse> {
    let user = state
        .store()
        .users()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user does not exist".to_string()))?;

    Ok(Json(json!({ "user": UserProfile::public(&user) })))
}

/// `PUT /user/{id}/follow`
///
/// Toggles the target inside the caller's follow list: present removes,
/// absent appends. Self-follow is rejected. One persist per call.
#[instrument(skip(state))]
pub async fn follow(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(target): Path<UserId>,
) -> Result<impl IntoResponse> {
    if target == identity.user_id {
        return Err(ApiError::invalid("you cannot follow yourself"));
    }

    let users = state.store().users();
    let mut user = users
        .get(identity.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user does not exist".to_string()))?;

    let message = if let Some(position) = user.followers.iter().position(|id| *id == target) {
        user.followers.remove(position);
        "User unfollowed"
    } else {
        user.followers.push(target);
        "User followed"
    };
    users.update(user).await?;

    Ok(Json(json!({ "message": message })))
}

/// `GET /user/{id}/followers`
#[instrument(skip(state))]
pub async fn followers(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse> {
    let user = state
        .store()
        .users()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user does not exist".to_string()))?;

    Ok(Json(json!({ "followers": user.followers })))
}
