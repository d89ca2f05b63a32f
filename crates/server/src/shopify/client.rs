//! Shopify OAuth + Admin GraphQL client.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::types::{
    AppSubscriptionCreateData, Customer, CustomersData, Product, ProductsData, UserError,
};
use super::ShopifyError;
use crate::config::ShopifyConfig;

/// Fixed dashboard queries - first 10 records, no pagination.
const PRODUCTS_QUERY: &str = "{ products(first: 10) { edges { node { id title } } } }";
const CUSTOMERS_QUERY: &str =
    "{ customers(first: 10) { edges { node { id firstName lastName email } } } }";

/// Recurring subscription mutation. The return URL is shop-influenced, so it
/// travels as a GraphQL variable rather than being spliced into the document.
const APP_SUBSCRIPTION_CREATE: &str = "\
mutation appSubscriptionCreate($name: String!, $returnUrl: URL!, $test: Boolean!, $lineItems: [AppSubscriptionLineItemInput!]!) {
  appSubscriptionCreate(name: $name, returnUrl: $returnUrl, test: $test, lineItems: $lineItems) {
    confirmationUrl
    userErrors { field message }
  }
}";

const PLAN_NAME: &str = "Basic Plan";
const PLAN_PRICE_USD: f64 = 5.0;

// ─────────────────────────────────────────────────────────────────────────────
// GraphQL wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GraphQLRequest {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
}

impl<T> GraphQLResponse<T> {
    fn into_result(self) -> Result<T, ShopifyError> {
        if let Some(errors) = self.errors
            && !errors.is_empty()
        {
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        self.data
            .ok_or_else(|| ShopifyError::MissingData("data".to_string()))
    }
}

/// OAuth token response from Shopify.
#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the Shopify OAuth endpoints and the Admin GraphQL API.
///
/// One instance is shared across all handlers; the target shop domain and
/// its access token are supplied per call.
#[derive(Clone)]
pub struct ShopifyClient {
    inner: Arc<ShopifyClientInner>,
}

struct ShopifyClientInner {
    client: reqwest::Client,
    api_key: String,
    api_secret: String,
    scopes: String,
    api_version: String,
    scheme: String,
}

impl ShopifyClient {
    /// Create a new client from app configuration.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        Self {
            inner: Arc::new(ShopifyClientInner {
                client: reqwest::Client::new(),
                api_key: config.api_key.clone(),
                api_secret: config.api_secret.expose_secret().to_string(),
                scopes: config.scopes.clone(),
                api_version: config.api_version.clone(),
                scheme: config.scheme.clone(),
            }),
        }
    }

    /// Get the OAuth client ID (safe to expose to the browser).
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    // ─────────────────────────────────────────────────────────────────────────
    // OAuth Flow
    // ─────────────────────────────────────────────────────────────────────────

    /// Generate the authorization URL that starts the install flow.
    ///
    /// Redirect the merchant's browser to this URL; Shopify redirects back
    /// to `redirect_uri` with an authorization code.
    #[must_use]
    pub fn authorization_url(&self, shop: &str, redirect_uri: &str) -> String {
        format!(
            "{}://{}/admin/oauth/authorize?client_id={}&scope={}&redirect_uri={}",
            self.inner.scheme,
            shop,
            urlencoding::encode(&self.inner.api_key),
            urlencoding::encode(&self.inner.scopes),
            urlencoding::encode(redirect_uri)
        )
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Call this in the OAuth callback handler after the merchant approves
    /// the install.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::OAuth` if the exchange is rejected and
    /// `ShopifyError::Http` if the request itself fails.
    pub async fn exchange_code(&self, shop: &str, code: &str) -> Result<String, ShopifyError> {
        let url = format!(
            "{}://{}/admin/oauth/access_token",
            self.inner.scheme, shop
        );

        let params = [
            ("client_id", self.inner.api_key.as_str()),
            ("client_secret", self.inner.api_secret.as_str()),
            ("code", code),
        ];

        let response = self.inner.client.post(&url).form(&params).send().await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ShopifyError::OAuth(format!(
                "Token exchange failed: {text}"
            )));
        }

        let token_response: OAuthTokenResponse = response.json().await?;

        Ok(token_response.access_token)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admin GraphQL API
    // ─────────────────────────────────────────────────────────────────────────

    /// First 10 products of the shop, flattened from the connection shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    pub async fn get_products(
        &self,
        shop: &str,
        access_token: &str,
    ) -> Result<Vec<Product>, ShopifyError> {
        let data: ProductsData = self
            .execute(shop, access_token, PRODUCTS_QUERY, None)
            .await?;
        Ok(data.products.into_nodes())
    }

    /// First 10 customers of the shop, flattened from the connection shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    pub async fn get_customers(
        &self,
        shop: &str,
        access_token: &str,
    ) -> Result<Vec<Customer>, ShopifyError> {
        let data: CustomersData = self
            .execute(shop, access_token, CUSTOMERS_QUERY, None)
            .await?;
        Ok(data.customers.into_nodes())
    }

    /// Create a test-mode recurring subscription and return the merchant
    /// confirmation URL.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::UserError` if the mutation reports
    /// `userErrors`, and `ShopifyError::MissingData` if the payload carries
    /// no confirmation URL.
    pub async fn create_subscription(
        &self,
        shop: &str,
        access_token: &str,
        return_url: &str,
    ) -> Result<String, ShopifyError> {
        let variables = serde_json::json!({
            "name": PLAN_NAME,
            "returnUrl": return_url,
            "test": true,
            "lineItems": [{
                "plan": {
                    "appRecurringPricingDetails": {
                        "price": { "amount": PLAN_PRICE_USD, "currencyCode": "USD" }
                    }
                }
            }],
        });

        let data: AppSubscriptionCreateData = self
            .execute(shop, access_token, APP_SUBSCRIPTION_CREATE, Some(variables))
            .await?;

        let payload = data.app_subscription_create;
        if !payload.user_errors.is_empty() {
            return Err(ShopifyError::UserError(format_user_errors(
                &payload.user_errors,
            )));
        }

        payload
            .confirmation_url
            .ok_or_else(|| ShopifyError::MissingData("confirmationUrl".to_string()))
    }

    /// Execute a GraphQL document against the shop's Admin API endpoint.
    async fn execute<T: DeserializeOwned>(
        &self,
        shop: &str,
        access_token: &str,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T, ShopifyError> {
        let endpoint = format!(
            "{}://{}/admin/api/{}/graphql.json",
            self.inner.scheme, shop, self.inner.api_version
        );

        let body = GraphQLRequest {
            query: query.to_string(),
            variables,
        };

        let response = self
            .inner
            .client
            .post(&endpoint)
            .header("X-Shopify-Access-Token", access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ShopifyError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let graphql_response: GraphQLResponse<T> = response.json().await?;
        graphql_response.into_result()
    }
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| {
            let field = e.field.as_ref().map_or_else(String::new, |f| f.join("."));
            format!("{}: {}", field, e.message)
        })
        .collect::<Vec<_>>()
        .join("; ")
}
