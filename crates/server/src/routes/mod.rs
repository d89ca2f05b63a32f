//! HTTP route handlers for the server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Install form
//! GET  /health           - Health check
//!
//! # OAuth
//! GET  /auth             - Redirect merchant to Shopify authorization page
//! GET  /auth/callback    - Exchange authorization code, store session
//!
//! # Admin API proxy (requires an installed session)
//! GET  /api/products     - First 10 products
//! GET  /api/customers    - First 10 customers
//! GET  /api/billing      - Create a test subscription, return confirmation URL
//! ```

pub mod api;
pub mod auth;

use axum::{
    Router,
    extract::State,
    response::Html,
    routing::get,
};

use crate::state::AppState;

/// Shop domains come from query strings and end up in upstream URLs, so
/// only a conservative hostname charset is accepted. A port suffix is
/// allowed for local development against mock endpoints.
pub(crate) fn valid_shop_domain(shop: &str) -> bool {
    !shop.is_empty()
        && !shop.starts_with(['.', '-'])
        && shop
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'))
}

/// Minimal install form: merchants enter their shop domain to start OAuth.
///
/// # Route
///
/// `GET /`
pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html>\n<head><title>Shopgate</title></head>\n<body>\n\
         <h1>Shopgate</h1>\n\
         <p>App key: <code>{}</code></p>\n\
         <form action=\"/auth\" method=\"get\">\n\
         <label>Shop domain <input name=\"shop\" placeholder=\"my-store.myshopify.com\"></label>\n\
         <button type=\"submit\">Install</button>\n\
         </form>\n</body>\n</html>",
        state.shopify().api_key()
    ))
}

/// Health check endpoint.
///
/// # Route
///
/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        // OAuth install flow
        .route("/auth", get(auth::begin_install))
        .route("/auth/callback", get(auth::callback))
        // Admin API proxy
        .route("/api/products", get(api::products))
        .route("/api/customers", get(api::customers))
        .route("/api/billing", get(api::billing))
}
