//! HTTP route handlers for the marketplace service.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//!
//! # Auth
//! POST   /auth/signup             - Create an account
//! POST   /auth/login              - Issue a bearer token
//!
//! # Categories
//! GET    /categories              - Category listing
//! GET    /categories/{id}         - Category detail
//! POST   /categories              - Create (authenticated)
//! DELETE /categories/{id}         - Delete + cascade products (authenticated)
//!
//! # Products
//! GET    /products?page=          - Paginated listing (9 per page)
//! GET    /products/user           - Caller's own listings (authenticated)
//! GET    /products/{id}           - Product detail
//! POST   /products                - Create (authenticated)
//! DELETE /products/{id}           - Delete (authenticated)
//!
//! # Search
//! GET    /search/{term}?category=&page= - Filtered listing ("all" = no term)
//!
//! # Users
//! GET    /users                   - Public profiles
//! GET    /user                    - Own profile with cart (authenticated)
//! GET    /user/{id}               - Public profile
//! PUT    /user/{id}/follow        - Toggle follow (authenticated)
//! GET    /user/{id}/followers     - Follower list
//!
//! # Cart
//! GET    /cart                    - Resolved cart (authenticated)
//! PUT    /cart/{productId}        - Add, marks sold (authenticated)
//! DELETE /cart/{productId}        - Remove, marks unsold (authenticated)
//! ```

pub mod auth;
pub mod cart;
pub mod categories;
pub mod products;
pub mod search;
pub mod users;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route(
            "/{categoryId}",
            get(categories::show).delete(categories::destroy),
        )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/user", get(products::by_owner))
        .route(
            "/{productId}",
            get(products::show).delete(products::destroy),
        )
}

/// Create the search routes router.
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/search/{term}", get(search::search))
}

/// Create the user and social-graph routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::index))
        .route("/user", get(users::me))
        .route("/user/{userId}", get(users::show))
        .route("/user/{userId}/follow", put(users::follow))
        .route("/user/{userId}/followers", get(users::followers))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/cart/{productId}", put(cart::add).delete(cart::remove))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Build the complete application router with CORS and tracing layers.
#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::OPTIONS,
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes())
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
        .merge(search_routes())
        .merge(user_routes())
        .merge(cart_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
