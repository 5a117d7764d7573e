pub mod catalog;
pub mod rarity;

pub use catalog::LootCatalogClient;
pub use rarity::RarityResolver;

/// Inventory and catalog category for champion skins
pub const SKIN_CATEGORY: &str = "CHAMPION_SKIN";
/// Ledger id prefix shared by every skin shard
pub const SKIN_PREFIX: &str = "CHAMPION_SKIN_";
/// Ledger id prefix of rental (non-permanent) skin shards
pub const RENTAL_SKIN_PREFIX: &str = "CHAMPION_SKIN_RENTAL_";
