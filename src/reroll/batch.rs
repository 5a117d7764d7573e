use colored::Colorize;

use crate::{
    lcu::LootEntry,
    reroll::{controller::RerollState, engine::ReceivedItem},
};

/// Number of skin shards consumed by one reroll
pub const BATCH_SIZE: usize = 3;

/// Exactly three ledger entries submitted together
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeBatch {
    entries: [LootEntry; BATCH_SIZE],
}

impl ExchangeBatch {
    /// Take the first three entries, or `None` when fewer remain
    pub fn from_eligible(eligible: &[LootEntry]) -> Option<Self> {
        match eligible {
            [a, b, c, ..] => Some(Self {
                entries: [a.clone(), b.clone(), c.clone()],
            }),
            _ => None,
        }
    }

    pub fn entries(&self) -> &[LootEntry] {
        &self.entries
    }

    pub fn loot_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.loot_id.clone()).collect()
    }

    /// `desc(value OE, rarity)` for each entry
    pub fn describe(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}({} OE, {})", e.item_desc, e.disenchant_value, e.rarity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Audit record of one controller run
#[derive(Debug, Clone)]
pub struct RerollReport {
    pub termination: RerollState,
    pub iterations: u32,
    pub successful: u32,
    /// Failed attempts, i.e. the retry counter at termination
    pub retries: u32,
    pub received: Vec<ReceivedItem>,
}

impl Default for RerollReport {
    fn default() -> Self {
        Self {
            termination: RerollState::Running,
            iterations: 0,
            successful: 0,
            retries: 0,
            received: Vec::new(),
        }
    }
}

impl RerollReport {
    /// Print a formatted summary to console
    pub fn print_summary(&self) {
        println!("\n{}", "=== Reroll Summary ===".cyan().bold());
        println!("Stopped:         {}", self.termination.description());
        println!("Iterations:      {}", self.iterations);
        println!("Successful:      {} ✓", self.successful.to_string().green());
        println!("Failed:          {} ✗", self.retries.to_string().red());
        println!("Success Rate:    {:.1}%", self.success_rate());
        if !self.received.is_empty() {
            println!("Received:");
            for item in &self.received {
                println!("  {} ({})", item.description, item.rarity);
            }
        }
        println!("{}", "======================".cyan());
    }

    /// Get success rate as percentage
    pub fn success_rate(&self) -> f64 {
        let attempts = self.successful + self.retries;
        if attempts == 0 {
            0.0
        } else {
            (self.successful as f64 / attempts as f64) * 100.0
        }
    }
}
