use tracing::{info, warn};

use crate::{
    error::{RerollError, Result},
    lcu::Rarity,
    loot::{catalog::LootCatalogClient, SKIN_CATEGORY, SKIN_PREFIX},
};

/// Cross-references owned items against the loot ledger
pub struct RarityResolver {
    catalog: LootCatalogClient,
}

impl RarityResolver {
    pub fn new(catalog: LootCatalogClient) -> Self {
        Self { catalog }
    }

    /// Resolve an owned skin's rarity through its ledger record.
    ///
    /// Fails with `LootRetrieve` when the ledger has no record for the skin.
    pub async fn resolve_rarity(&self, item_id: i64) -> Result<Rarity> {
        let loot_id = format!("{}{}", SKIN_PREFIX, item_id);
        match self.catalog.fetch_loot_by_id(&loot_id).await? {
            Some(entry) => Ok(entry.rarity),
            None => Err(RerollError::LootRetrieve(loot_id)),
        }
    }

    /// Count mythic skins across the loot ledger and owned inventory.
    ///
    /// Returns `Ok(None)` when a fetch fails at the transport or decode level.
    pub async fn count_mythic(&self) -> Result<Option<usize>> {
        match self.try_count_mythic().await {
            Ok(count) => Ok(Some(count)),
            Err(e) if e.is_transport() || e.is_decode() => {
                warn!("Mythic skin count unavailable: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn try_count_mythic(&self) -> Result<usize> {
        let loot = self.catalog.fetch_loot().await?;
        let loot_count = loot
            .iter()
            .filter(|entry| entry.loot_id.starts_with(SKIN_PREFIX) && entry.rarity == Rarity::Mythic)
            .count();

        // One lookup per owned skin, in inventory order
        let inventory = self.catalog.fetch_inventory(SKIN_CATEGORY).await?;
        let mut inventory_count = 0;
        for item in &inventory {
            if self.resolve_rarity(item.item_id).await? == Rarity::Mythic {
                inventory_count += 1;
            }
        }

        let total = loot_count + inventory_count;
        info!(
            "Mythic skins count: Loot: {}, Inventory: {}, Total: {}",
            loot_count, inventory_count, total
        );
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcu::{LcuResponse, MockLcuTransport};
    use std::sync::Arc;

    fn resolver(mock: MockLcuTransport) -> RarityResolver {
        RarityResolver::new(LootCatalogClient::new(Arc::new(mock)))
    }

    #[tokio::test]
    async fn resolves_rarity_from_ledger_record() {
        let mut mock = MockLcuTransport::new();
        mock.expect_get().times(1).returning(|path| {
            assert_eq!(path, "/lol-loot/v1/player-loot/CHAMPION_SKIN_77001");
            Ok(LcuResponse::new(
                200,
                r#"{"lootId":"CHAMPION_SKIN_77001","rarity":"MYTHIC","disenchantValue":2000}"#,
            ))
        });

        let rarity = resolver(mock).resolve_rarity(77001).await.unwrap();
        assert_eq!(rarity, Rarity::Mythic);
    }

    #[tokio::test]
    async fn missing_record_is_loot_retrieve() {
        let mut mock = MockLcuTransport::new();
        mock.expect_get()
            .returning(|_| Ok(LcuResponse::new(404, "{}")));

        let err = resolver(mock).resolve_rarity(5).await.unwrap_err();
        assert!(matches!(err, RerollError::LootRetrieve(ref id) if id == "CHAMPION_SKIN_5"));
    }

    #[tokio::test]
    async fn count_mythic_is_none_when_ledger_unreachable() {
        let mut mock = MockLcuTransport::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Err(RerollError::Transport("connection refused".into())));

        let count = resolver(mock).count_mythic().await.unwrap();
        assert!(count.is_none());
    }
}
