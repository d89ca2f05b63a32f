//! Admin API proxy route handlers.
//!
//! Each handler resolves the shop's stored access token, calls the Admin
//! GraphQL API, and returns flattened JSON for the dashboard. Requests for
//! shops without a session are rejected before any upstream call.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::shopify::{BillingConfirmation, Customer, Product};
use crate::state::AppState;

use super::valid_shop_domain;

/// Query parameters for the proxy routes.
#[derive(Debug, Deserialize)]
pub struct ShopQuery {
    /// Shop domain whose session to use.
    pub shop: Option<String>,
}

/// Resolve the shop and its stored access token, or reject the request.
fn require_session(state: &AppState, query: ShopQuery) -> Result<(String, String)> {
    let shop = query
        .shop
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing shop parameter".to_string()))?;
    if !valid_shop_domain(&shop) {
        return Err(AppError::BadRequest("Invalid shop parameter".to_string()));
    }

    let token = state.sessions().get(&shop).ok_or_else(|| {
        AppError::Unauthorized("No session for this shop. Install the app first.".to_string())
    })?;

    Ok((shop, token))
}

/// First 10 products of the shop as a flat `{id, title}` array.
///
/// # Route
///
/// `GET /api/products?shop=...`
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<ShopQuery>,
) -> Result<Json<Vec<Product>>> {
    let (shop, token) = require_session(&state, query)?;
    let products = state.shopify().get_products(&shop, &token).await?;
    Ok(Json(products))
}

/// First 10 customers of the shop as a flat
/// `{id, firstName, lastName, email}` array.
///
/// # Route
///
/// `GET /api/customers?shop=...`
pub async fn customers(
    State(state): State<AppState>,
    Query(query): Query<ShopQuery>,
) -> Result<Json<Vec<Customer>>> {
    let (shop, token) = require_session(&state, query)?;
    let customers = state.shopify().get_customers(&shop, &token).await?;
    Ok(Json(customers))
}

/// Create a test-mode recurring charge and return its confirmation URL.
///
/// The merchant must visit the returned URL to approve the charge; Shopify
/// then redirects them to the dashboard.
///
/// # Route
///
/// `GET /api/billing?shop=...`
pub async fn billing(
    State(state): State<AppState>,
    Query(query): Query<ShopQuery>,
) -> Result<Json<BillingConfirmation>> {
    let (shop, token) = require_session(&state, query)?;

    let return_url = format!(
        "{}/dashboard?shop={}",
        state.config().host,
        urlencoding::encode(&shop)
    );
    let confirmation_url = state
        .shopify()
        .create_subscription(&shop, &token, &return_url)
        .await?;

    Ok(Json(BillingConfirmation { confirmation_url }))
}
