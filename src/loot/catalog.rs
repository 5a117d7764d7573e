use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    error::{RerollError, Result},
    lcu::{CatalogEntry, InventoryItem, LcuTransport, LootEntry},
};

pub const PLAYER_LOOT_PATH: &str = "/lol-loot/v1/player-loot";
pub const INVENTORY_PATH: &str = "/lol-inventory/v2/inventory";
pub const CATALOG_PATH: &str = "/lol-catalog/v1/items";

/// Read-only queries against the loot ledger, inventory and store catalog
#[derive(Clone)]
pub struct LootCatalogClient {
    transport: Arc<dyn LcuTransport>,
}

impl LootCatalogClient {
    pub fn new(transport: Arc<dyn LcuTransport>) -> Self {
        Self { transport }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.transport.get(path).await?;
        if !response.is_success() {
            return Err(RerollError::Transport(format!(
                "GET {} returned status {}",
                path, response.status
            )));
        }
        response.json()
    }

    /// Fetch the full loot ledger
    pub async fn fetch_loot(&self) -> Result<Vec<LootEntry>> {
        let loot: Vec<LootEntry> = self.get_json(PLAYER_LOOT_PATH).await?;
        debug!("Fetched {} loot entries", loot.len());
        Ok(loot)
    }

    /// Fetch a single ledger entry. A non-ok status means the entry is absent.
    pub async fn fetch_loot_by_id(&self, loot_id: &str) -> Result<Option<LootEntry>> {
        let path = format!("{}/{}", PLAYER_LOOT_PATH, loot_id);
        let response = self.transport.get(&path).await?;

        if !response.is_success() {
            debug!("Loot entry {} not found (status {})", loot_id, response.status);
            return Ok(None);
        }

        Ok(Some(response.json()?))
    }

    /// Fetch owned items of one inventory category
    pub async fn fetch_inventory(&self, category: &str) -> Result<Vec<InventoryItem>> {
        let path = format!("{}/{}", INVENTORY_PATH, category);
        let items: Vec<InventoryItem> = self.get_json(&path).await?;
        debug!("Fetched {} {} inventory items", items.len(), category);
        Ok(items)
    }

    /// Fetch the store catalog for a category.
    ///
    /// Best-effort: any failure yields an empty catalog, which makes every
    /// novelty check answer "not new".
    pub async fn fetch_catalog(&self, category: &str) -> Vec<CatalogEntry> {
        let path = format!("{}/{}", CATALOG_PATH, category);
        match self.get_json(&path).await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Catalog unavailable, novelty checks disabled: {}", e);
                Vec::new()
            }
        }
    }
}
