//! Authentication extractor.
//!
//! Provides an extractor for requiring a valid bearer token in route
//! handlers. Verification is pure signature/expiry checking; no store access
//! happens here.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::ApiError;
use crate::services::auth::Identity;
use crate::state::AppState;

/// Extractor that requires bearer-token authentication.
///
/// Rejects with 401 when the `Authorization` header is absent, carries no
/// bearer value, or the token fails verification.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(identity): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", identity.name)
/// }
/// ```
pub struct CurrentUser(pub Identity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let identity = state.authenticator().verify(raw_header)?;

        Ok(Self(identity))
    }
}
