//! Application state

use std::sync::Arc;

use crate::config::Config;
use crate::db::{MemoryStore, PgStore, Store, default_produtos};
use crate::error::BoxError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway (PostgreSQL or in-memory)
    pub store: Arc<dyn Store>,
    /// Environment name reported by the health probe
    pub environment: String,
}

impl AppState {
    /// Create a new AppState: connect (or fall back to memory) and seed
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let store: Arc<dyn Store> = match &config.database_url {
            Some(url) => {
                let store = PgStore::connect(url, config.database_max_connections).await?;
                Arc::new(store)
            }
            None => {
                tracing::warn!(
                    "DATABASE_URL not set, running against the in-memory store. Data is lost on restart."
                );
                Arc::new(MemoryStore::new())
            }
        };
        tracing::info!(store = store.kind(), "Store ready");

        if config.seed_produtos {
            let inserted = store.seed_produtos(&default_produtos()).await?;
            if inserted > 0 {
                tracing::info!(inserted, "Sample produtos inserted");
            }
        }

        Ok(Self {
            store,
            environment: config.environment.clone(),
        })
    }

    /// State around an existing store
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            environment: "development".into(),
        }
    }
}
