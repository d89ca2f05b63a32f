//! OAuth install flow route handlers.
//!
//! - Install: redirects the merchant's browser to Shopify's authorization page
//! - Callback: exchanges the authorization code for an access token and
//!   stores it in the session store, keyed by shop domain

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::state::AppState;

use super::valid_shop_domain;

/// Query parameters for the install route.
#[derive(Debug, Deserialize)]
pub struct InstallQuery {
    /// Shop domain to install the app on.
    pub shop: Option<String>,
}

/// Query parameters from the Shopify OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Shop domain the authorization belongs to.
    pub shop: Option<String>,
    /// Authorization code to exchange for an access token.
    pub code: Option<String>,
}

fn require_shop(shop: Option<String>) -> Result<String> {
    let shop = shop
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing shop parameter".to_string()))?;
    if !valid_shop_domain(&shop) {
        return Err(AppError::BadRequest("Invalid shop parameter".to_string()));
    }
    Ok(shop)
}

/// Begin the OAuth install flow for a shop.
///
/// Redirects the merchant's browser to Shopify's authorization page; Shopify
/// redirects back to `/auth/callback` once the merchant approves the
/// requested scopes.
///
/// # Route
///
/// `GET /auth?shop=my-store.myshopify.com`
pub async fn begin_install(
    State(state): State<AppState>,
    Query(query): Query<InstallQuery>,
) -> Result<Redirect> {
    let shop = require_shop(query.shop)?;

    let redirect_uri = format!("{}/auth/callback", state.config().host);
    let auth_url = state.shopify().authorization_url(&shop, &redirect_uri);

    tracing::info!(%shop, "Starting OAuth install");
    Ok(Redirect::to(&auth_url))
}

/// Handle the Shopify OAuth callback.
///
/// Exchanges the authorization code for an access token, stores it keyed by
/// shop domain (overwriting any previous token for that shop), and sends the
/// merchant on to the dashboard.
///
/// # Route
///
/// `GET /auth/callback?shop=...&code=...`
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect> {
    let shop = require_shop(query.shop)?;
    let code = query
        .code
        .ok_or_else(|| AppError::BadRequest("Missing code parameter".to_string()))?;

    let access_token = state.shopify().exchange_code(&shop, &code).await?;
    state.sessions().set(&shop, access_token);

    tracing::info!(%shop, "App installed");

    let dashboard_url = format!(
        "{}/dashboard?shop={}",
        state.config().host,
        urlencoding::encode(&shop)
    );
    Ok(Redirect::to(&dashboard_url))
}
