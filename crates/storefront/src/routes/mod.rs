//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//! GET  /                            - Home: banner, today's deals, categories
//! GET  /locales                     - Languages and countries
//!
//! # Catalog
//! GET  /products                    - Visible products (category, deals, q, paging)
//! GET  /products/{id}               - Product detail with related products
//! GET  /categories                  - Category table
//! GET  /categories/{slug}           - Category listing
//! GET  /search?q=                   - Search results, AI summary when configured
//!
//! # Cart (customers)
//! GET  /cart                        - Items, subtotal, item count
//! POST /cart/add                    - {productId, quantity?}
//! POST /cart/update                 - {productId, quantity}
//! POST /cart/remove                 - {productId}
//!
//! # Auth
//! GET  /auth/me                     - Current identity
//! POST /auth/signin                 - Customer sign-in {email}
//! POST /auth/seller/signin          - {email, password}
//! POST /auth/admin/signin           - {email, password}
//! POST /auth/signout
//!
//! # Seller
//! GET    /seller/products           - Own products
//! POST   /seller/products           - New product draft
//! POST   /seller/products/{id}/toggle
//! DELETE /seller/products/{id}
//! POST   /seller/describe           - AI product description
//!
//! # Admin
//! GET  /admin/products              - Every product, published or not
//! GET  /admin/banner
//! PUT  /admin/banner                - {title, imageUrl}
//!
//! # AI
//! POST /ai/recommendations          - {browsingHistory, numberOfRecommendations?}
//! POST /ai/summarize                - {query, searchResults}
//! ```

pub mod admin;
pub mod ai;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod home;
pub mod products;
pub mod search;
pub mod seller;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{ai_rate_limiter, signin_rate_limiter};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{slug}", get(categories::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the auth routes router.
///
/// Credential endpoints get the sign-in rate limiter when `rate_limited`.
pub fn auth_routes(rate_limited: bool) -> Router<AppState> {
    let mut credentials = Router::new()
        .route("/signin", post(auth::sign_in))
        .route("/seller/signin", post(auth::seller_sign_in))
        .route("/admin/signin", post(auth::admin_sign_in));
    if rate_limited && let Some(limiter) = signin_rate_limiter() {
        credentials = credentials.layer(limiter);
    }

    Router::new()
        .route("/me", get(auth::me))
        .route("/signout", post(auth::sign_out))
        .merge(credentials)
}

/// Create the seller dashboard routes router.
pub fn seller_routes(rate_limited: bool) -> Router<AppState> {
    let mut describe = Router::new().route("/describe", post(seller::describe));
    if rate_limited && let Some(limiter) = ai_rate_limiter() {
        describe = describe.layer(limiter);
    }

    Router::new()
        .route("/products", get(seller::index).post(seller::create))
        .route("/products/{id}", axum::routing::delete(seller::destroy))
        .route("/products/{id}/toggle", post(seller::toggle))
        .merge(describe)
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(admin::products))
        .route("/banner", get(admin::banner).put(admin::update_banner))
}

/// Create the AI helper routes router.
pub fn ai_routes(rate_limited: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/recommendations", post(ai::recommendations))
        .route("/summarize", post(ai::summarize));
    match ai_rate_limiter() {
        Some(limiter) if rate_limited => router.layer(limiter),
        _ => router,
    }
}

/// Create all routes for the storefront.
///
/// Rate limiters key on the client IP, so `rate_limited` should only be set
/// when the router is served with connect info.
pub fn routes(rate_limited: bool) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(home::health))
        .route("/locales", get(home::locales))
        .route("/search", get(search::search))
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes(rate_limited))
        .nest("/seller", seller_routes(rate_limited))
        .nest("/admin", admin_routes())
        .nest("/ai", ai_routes(rate_limited))
}
