//! Types for Admin API responses and the JSON the proxy returns.

use serde::{Deserialize, Serialize};

/// A product as surfaced to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Opaque Shopify GID (e.g., `gid://shopify/Product/123`)
    pub id: String,
    /// Product title
    pub title: String,
}

/// A customer as surfaced to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Opaque Shopify GID
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Confirmation link for a pending recurring app charge.
///
/// Ephemeral - produced per billing request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BillingConfirmation {
    /// Merchant-facing URL to approve the charge
    pub confirmation_url: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// GraphQL response shapes
// ─────────────────────────────────────────────────────────────────────────────

/// Relay-style connection: `{ edges: [{ node: T }] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    /// Flatten `edges[].node` into a plain list, preserving order.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsData {
    pub products: Connection<Product>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomersData {
    pub customers: Connection<Customer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AppSubscriptionCreateData {
    pub app_subscription_create: AppSubscriptionCreatePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AppSubscriptionCreatePayload {
    pub confirmation_url: Option<String>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// A `userErrors` entry from a mutation payload.
#[derive(Debug, Deserialize)]
pub(crate) struct UserError {
    pub field: Option<Vec<String>>,
    pub message: String,
}
