//! Where the relay looks up the current access token.
//!
//! Kite access tokens die every morning and the relay owns no storage, so
//! by default the token lives only in process memory, seeded from
//! `KITE_ACCESS_TOKEN`. Deployments that want the token to survive a
//! restart implement [`TokenStore`] over their own backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Access-token storage seam.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// The current access token, if any.
    async fn get(&self) -> Option<String>;

    /// Replace the current access token.
    async fn set(&self, token: String);
}

/// In-process token store. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create a store, optionally seeded with a token. Empty strings count
    /// as no token.
    pub fn new(initial: Option<String>) -> Self {
        Self {
            token: RwLock::new(initial.filter(|t| !t.is_empty())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn set(&self, token: String) {
        *self.token.write().await = Some(token).filter(|t| !t.is_empty());
    }
}
