use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::Result,
    lcu::{CraftResponse, LcuTransport, Rarity},
    reroll::batch::ExchangeBatch,
};

pub const REROLL_RECIPE_PATH: &str = "/lol-loot/v1/recipes/SKIN_reroll/craft";

/// Which list of the craft response carried the returned loot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeSource {
    Granted,
    Redeemed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedItem {
    pub description: String,
    pub rarity: Rarity,
}

/// Result of one reroll submission
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOutcome {
    pub success: bool,
    /// `None` for failed submissions
    pub source: Option<OutcomeSource>,
    pub received: Vec<ReceivedItem>,
}

impl ExchangeOutcome {
    pub fn failed() -> Self {
        Self {
            success: false,
            source: None,
            received: Vec::new(),
        }
    }

    /// Interpret an accepted craft body. `added` wins when non-empty,
    /// otherwise `redeemed` is used; records without loot are skipped.
    pub fn from_body(body: &str) -> Result<Self> {
        let response: CraftResponse = serde_json::from_str(body)?;

        let (source, records) = if response.added.is_empty() {
            (OutcomeSource::Redeemed, response.redeemed)
        } else {
            (OutcomeSource::Granted, response.added)
        };

        let received = records
            .into_iter()
            .filter_map(|record| record.player_loot)
            .map(|loot| ReceivedItem {
                description: loot.item_desc,
                rarity: loot.rarity,
            })
            .collect();

        Ok(Self {
            success: true,
            source: Some(source),
            received,
        })
    }
}

/// Submits batches to the skin reroll recipe
pub struct ExchangeExecutor {
    transport: Arc<dyn LcuTransport>,
    repeat: u32,
}

impl ExchangeExecutor {
    pub fn new(transport: Arc<dyn LcuTransport>, repeat: u32) -> Self {
        Self { transport, repeat }
    }

    /// Reroll one batch.
    ///
    /// Non-ok statuses and unreadable bodies become a failed outcome; only a
    /// request that never got a response is returned as an error.
    pub async fn execute(&self, batch: &ExchangeBatch) -> Result<ExchangeOutcome> {
        info!("Rerolling using skins: {}...", batch.describe());

        let path = format!("{}?repeat={}", REROLL_RECIPE_PATH, self.repeat);
        let response = self
            .transport
            .post_json(&path, &json!(batch.loot_ids()))
            .await?;

        if !response.is_success() {
            warn!(
                "Error when rerolling skins: Status: {}, content: {}",
                response.status, response.body
            );
            return Ok(ExchangeOutcome::failed());
        }

        match ExchangeOutcome::from_body(&response.body) {
            Ok(outcome) => {
                if outcome.received.is_empty() {
                    info!("Reroll accepted, no loot visible in response");
                }
                for item in &outcome.received {
                    info!(
                        "Loot received after rerolling: {}, Rarity: {}",
                        item.description, item.rarity
                    );
                }
                Ok(outcome)
            }
            Err(e) => {
                warn!(
                    "Did not receive skin when rerolling ({}): {}",
                    e, response.body
                );
                Ok(ExchangeOutcome::failed())
            }
        }
    }
}
