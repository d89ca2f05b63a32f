//! Shopify OAuth and Admin API client.
//!
//! # Architecture
//!
//! - Raw GraphQL query strings with JSON variables - the query surface is
//!   small and fixed, so no codegen
//! - Shopify is source of truth - no local sync, direct API calls
//! - One client instance serves every shop; the shop domain and access
//!   token are passed per call

mod client;
pub mod types;

pub use client::ShopifyClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify APIs.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// OAuth token exchange failed.
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// Shopify responded with a non-success status.
    #[error("Shopify returned {status}: {body}")]
    Api { status: u16, body: String },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQL(Vec<String>),

    /// User error from a mutation (e.g., invalid input).
    #[error("User error: {0}")]
    UserError(String),

    /// Response was missing an expected field.
    #[error("Missing data in response: {0}")]
    MissingData(String),
}
