use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::{
    lcu::{CatalogEntry, LootEntry},
    loot::{RENTAL_SKIN_PREFIX, SKIN_PREFIX},
};

/// Six months
pub const DEFAULT_NOVELTY_THRESHOLD_SECS: i64 = 15_552_000;

#[derive(Debug, Clone)]
pub struct EligibilityPolicy {
    /// Permanent skin shards are rerollable too, not only rentals
    pub include_permanent: bool,
    /// Store item ids that are never rerolled
    pub whitelist: HashSet<i64>,
    pub novelty_threshold_secs: i64,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            include_permanent: true,
            whitelist: HashSet::new(),
            novelty_threshold_secs: DEFAULT_NOVELTY_THRESHOLD_SECS,
        }
    }
}

impl EligibilityPolicy {
    pub fn prefix(&self) -> &'static str {
        if self.include_permanent {
            SKIN_PREFIX
        } else {
            RENTAL_SKIN_PREFIX
        }
    }
}

/// Why an entry is not offered for a reroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Category,
    ProtectedRarity,
    Whitelisted,
    New,
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exclusion::Category => write!(f, "not a rerollable skin category"),
            Exclusion::ProtectedRarity => write!(f, "protected rarity"),
            Exclusion::Whitelisted => write!(f, "whitelisted"),
            Exclusion::New => write!(f, "recently released"),
        }
    }
}

pub struct EligibilityFilter {
    policy: EligibilityPolicy,
}

impl EligibilityFilter {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// Reduce a ledger snapshot to the rerollable entries, cheapest first.
    ///
    /// Stages run in a fixed order: category prefix, protected rarity,
    /// sort by disenchant value, whitelist, novelty.
    pub fn select_eligible(
        &self,
        loot: Vec<LootEntry>,
        catalog: &[CatalogEntry],
        now: DateTime<Utc>,
    ) -> Vec<LootEntry> {
        let prefix = self.policy.prefix();
        let mut eligible: Vec<LootEntry> = loot
            .into_iter()
            .filter(|entry| entry.loot_id.starts_with(prefix))
            .filter(|entry| !entry.rarity.is_protected())
            .collect();
        // Stable, so equal values keep ledger order
        eligible.sort_by_key(|entry| entry.disenchant_value);
        info!("Rerollable skin count: {}", eligible.len());

        eligible.retain(|entry| !self.policy.whitelist.contains(&entry.store_item_id));
        info!(
            "Rerollable skin count (no high-value skins): {}",
            eligible.len()
        );

        eligible.retain(|entry| {
            !is_new(
                catalog,
                entry.store_item_id,
                now,
                self.policy.novelty_threshold_secs,
            )
        });
        info!("Rerollable skin count (no new skins): {}", eligible.len());

        eligible
    }

    /// First policy rule that excludes the entry, if any
    pub fn exclusion(
        &self,
        entry: &LootEntry,
        catalog: &[CatalogEntry],
        now: DateTime<Utc>,
    ) -> Option<Exclusion> {
        if !entry.loot_id.starts_with(self.policy.prefix()) {
            return Some(Exclusion::Category);
        }
        if entry.rarity.is_protected() {
            return Some(Exclusion::ProtectedRarity);
        }
        if self.policy.whitelist.contains(&entry.store_item_id) {
            return Some(Exclusion::Whitelisted);
        }
        if is_new(
            catalog,
            entry.store_item_id,
            now,
            self.policy.novelty_threshold_secs,
        ) {
            return Some(Exclusion::New);
        }
        None
    }
}

/// An item is new when its catalog record was released within the threshold.
/// Items without a catalog record are never new.
pub fn is_new(
    catalog: &[CatalogEntry],
    store_item_id: i64,
    now: DateTime<Utc>,
    threshold_secs: i64,
) -> bool {
    match catalog.iter().find(|c| c.item_id == store_item_id) {
        Some(record) => {
            let new = now.timestamp() - record.release_date < threshold_secs;
            if new {
                debug!(
                    "Skin {} released at {} is within the novelty window",
                    store_item_id, record.release_date
                );
            }
            new
        }
        None => false,
    }
}
