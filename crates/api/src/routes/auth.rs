//! Signup and login route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use brocante_core::Email;

use crate::error::{ApiError, Result};
use crate::links::{Linked, Resource, enrich};
use crate::models::User;
use crate::services::auth::{self, AuthError, MIN_PASSWORD_LENGTH};
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub password_confirmation: String,
    pub city: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Check every signup rule, collecting violations instead of stopping at
/// the first. Returns the parsed email only when it is usable.
fn validate_signup(body: &SignupRequest) -> (Option<Email>, Vec<String>) {
    let mut errors = Vec::new();

    let email = if body.email.len() > Email::MAX_LENGTH {
        errors.push(format!(
            "email must not exceed {} characters",
            Email::MAX_LENGTH
        ));
        None
    } else {
        match Email::parse(&body.email) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.push("email is not valid".to_string());
                None
            }
        }
    };

    if body.name.len() < 3 || body.name.len() > 50 {
        errors.push("name must contain between 3 and 50 characters".to_string());
    }
    if body.password.len() < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "password must contain at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }
    if body.password != body.password_confirmation {
        errors.push("passwords do not match".to_string());
    }
    if body.city.len() > 50 {
        errors.push("city must not exceed 50 characters".to_string());
    }

    (email, errors)
}

/// `POST /auth/signup`
///
/// Validates eagerly (every violated rule is reported together), then
/// persists the account with empty follower and cart lists.
#[instrument(skip(state, body))]
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    let (email, mut errors) = validate_signup(&body);

    if let Some(ref email) = email
        && state.store().users().email_exists(email).await?
    {
        errors.push("email is already in use".to_string());
    }

    let Some(email) = email else {
        return Err(ApiError::Validation(errors));
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let password_hash = auth::hash_password(&body.password)?;
    let user = state
        .store()
        .users()
        .create(User::new(email, body.name, password_hash, body.city))
        .await?;

    tracing::info!(user_id = %user.id, "account created");

    let links = enrich(state.base_url(), Resource::Signup { id: user.id });
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created",
            "user": Linked::new(user, links),
        })),
    ))
}

/// `POST /auth/login`
///
/// Unknown email is 404; wrong password is 401. On success returns the
/// bearer token plus the stored account (hash excluded by serialization).
#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let email = Email::parse(&body.email).map_err(|_| AuthError::UnknownUser)?;

    let user = state
        .store()
        .users()
        .get_by_email(&email)
        .await?
        .ok_or(AuthError::UnknownUser)?;

    auth::verify_password(&body.password, &user.password_hash)?;

    let token = state.authenticator().issue(&user)?;

    Ok(Json(json!({ "token": token, "user": user })))
}
