use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Rarity tier reported by the loot service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Default,
    Common,
    Epic,
    Legendary,
    Mythic,
    Ultimate,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Rarity {
    /// Tiers that are never offered for a reroll
    pub fn is_protected(&self) -> bool {
        matches!(self, Rarity::Mythic | Rarity::Ultimate | Rarity::Legendary)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Default => "DEFAULT",
            Rarity::Common => "COMMON",
            Rarity::Epic => "EPIC",
            Rarity::Legendary => "LEGENDARY",
            Rarity::Mythic => "MYTHIC",
            Rarity::Ultimate => "ULTIMATE",
            Rarity::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// A pending entry in the player's loot ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootEntry {
    pub loot_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rarity: Rarity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disenchant_value: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_desc: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub store_item_id: i64,
}

/// An owned item outside the loot ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub item_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inventory_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub item_id: i64,
    /// Unix seconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: i64,
}

/// Body returned by a recipe craft
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub added: Vec<CraftRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub redeemed: Vec<CraftRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftRecord {
    #[serde(default)]
    pub player_loot: Option<CraftedLoot>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftedLoot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_desc: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rarity: Rarity,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ledger_entry_with_nulls() {
        let json = r#"{
            "lootId": "CHAMPION_SKIN_RENTAL_103002",
            "rarity": "EPIC",
            "disenchantValue": 330,
            "itemDesc": null,
            "storeItemId": 103002,
            "count": 1
        }"#;
        let entry: LootEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.rarity, Rarity::Epic);
        assert_eq!(entry.disenchant_value, 330);
        assert_eq!(entry.item_desc, "");
        assert_eq!(entry.store_item_id, 103002);
    }

    #[test]
    fn unknown_rarity_falls_back() {
        let entry: LootEntry =
            serde_json::from_str(r#"{"lootId":"X","rarity":"TRANSCENDENT"}"#).unwrap();
        assert_eq!(entry.rarity, Rarity::Unknown);
        assert!(!entry.rarity.is_protected());
    }

    #[test]
    fn protected_tiers() {
        assert!(Rarity::Mythic.is_protected());
        assert!(Rarity::Ultimate.is_protected());
        assert!(Rarity::Legendary.is_protected());
        assert!(!Rarity::Epic.is_protected());
        assert!(!Rarity::Common.is_protected());
    }
}
