//! Shop session storage.
//!
//! A shop session pairs a shop domain with the Admin API access token
//! obtained during the OAuth handshake. Handlers depend on the
//! [`TokenStore`] trait rather than a concrete map so the in-memory
//! implementation can later be swapped for a persistent one without
//! touching handler logic.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Keyed access-token storage for shop sessions.
///
/// Writes are keyed by shop domain with last-write-wins semantics: a
/// re-install overwrites the previous token for that shop. Entries are
/// never removed.
pub trait TokenStore: Send + Sync {
    /// Look up the access token for a shop domain.
    fn get(&self, shop: &str) -> Option<String>;

    /// Store (or overwrite) the access token for a shop domain.
    fn set(&self, shop: &str, token: String);
}

/// In-memory [`TokenStore`] backed by an `RwLock`ed map.
///
/// Tokens live for the process lifetime only; a restart requires every
/// shop to re-run the OAuth handshake.
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, shop: &str) -> Option<String> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(shop)
            .cloned()
    }

    fn set(&self, shop: &str, token: String) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(shop.to_string(), token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_shop_returns_none() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get("missing.myshopify.com"), None);
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryTokenStore::new();
        store.set("foo.myshopify.com", "shpat_abc".to_string());
        assert_eq!(
            store.get("foo.myshopify.com"),
            Some("shpat_abc".to_string())
        );
    }

    #[test]
    fn test_reauth_overwrites_token() {
        // Last write wins per shop domain
        let store = MemoryTokenStore::new();
        store.set("foo.myshopify.com", "shpat_old".to_string());
        store.set("foo.myshopify.com", "shpat_new".to_string());
        assert_eq!(
            store.get("foo.myshopify.com"),
            Some("shpat_new".to_string())
        );
    }

    #[test]
    fn test_shops_are_independent() {
        let store = MemoryTokenStore::new();
        store.set("foo.myshopify.com", "shpat_foo".to_string());
        store.set("bar.myshopify.com", "shpat_bar".to_string());
        assert_eq!(
            store.get("foo.myshopify.com"),
            Some("shpat_foo".to_string())
        );
        assert_eq!(
            store.get("bar.myshopify.com"),
            Some("shpat_bar".to_string())
        );
    }
}
