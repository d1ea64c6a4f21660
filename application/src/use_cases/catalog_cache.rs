//! Tool catalog cache
//!
//! Discovers every provider's catalog once and keeps it for the life of the
//! process. There is no TTL and no invalidation.

use crate::ports::tool_client::ToolClients;
use taskbridge_domain::{ProviderCatalog, ProviderId, ToolCatalog};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct ToolCatalogCache {
    catalog: OnceCell<ToolCatalog>,
}

impl ToolCatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached catalog, discovering it on first call.
    ///
    /// Never fails: a provider whose listing errors gets an empty catalog.
    pub async fn get_or_discover(&self, clients: &ToolClients) -> &ToolCatalog {
        self.catalog.get_or_init(|| discover(clients)).await
    }

    /// The catalog if discovery has already run.
    pub fn cached(&self) -> Option<&ToolCatalog> {
        self.catalog.get()
    }
}

/// Query each provider in turn.
async fn discover(clients: &ToolClients) -> ToolCatalog {
    let mut catalog = ToolCatalog::new();

    for provider in ProviderId::ALL {
        let Some(client) = clients.get(provider) else {
            debug!("No client registered for {}, catalog left empty", provider);
            catalog.insert(ProviderCatalog::empty(provider));
            continue;
        };

        match client.list_tools().await {
            Ok(tools) => {
                info!("Discovered {} tools from {}", tools.len(), provider);
                catalog.insert(ProviderCatalog::new(provider, tools));
            }
            Err(e) => {
                warn!("Tool discovery failed for {}: {}", provider, e);
                catalog.insert(ProviderCatalog::empty(provider));
            }
        }
    }

    catalog
}
