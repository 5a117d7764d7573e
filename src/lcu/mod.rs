pub mod client;
pub mod types;

pub use client::{LcuClient, LcuResponse, LcuTransport, Lockfile};
pub use types::{CatalogEntry, CraftResponse, InventoryItem, LootEntry, Rarity};

#[cfg(test)]
pub use client::MockLcuTransport;
