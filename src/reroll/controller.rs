use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::{
    config::RerollConfig,
    error::Result,
    lcu::{CatalogEntry, LcuTransport, LootEntry},
    loot::{LootCatalogClient, SKIN_CATEGORY},
    reroll::{
        batch::{ExchangeBatch, RerollReport},
        eligibility::{EligibilityFilter, EligibilityPolicy},
        engine::ExchangeExecutor,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RerollState {
    Running,
    /// No skin shards of the selected category are left in the ledger
    TerminatedExhausted,
    /// Skins remain, but fewer than a full batch are eligible
    TerminatedIneligible,
    TerminatedRetryLimit,
    TerminatedCancelled,
}

impl RerollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RerollState::Running)
    }

    pub fn description(&self) -> &'static str {
        match self {
            RerollState::Running => "running",
            RerollState::TerminatedExhausted => "no skins left to reroll",
            RerollState::TerminatedIneligible => "cannot reroll skins anymore",
            RerollState::TerminatedRetryLimit => "retry limit exceeded when rerolling skins",
            RerollState::TerminatedCancelled => "cancelled",
        }
    }
}

/// Eligibility of one ledger snapshot
#[derive(Debug, Clone)]
pub struct Eligibility {
    /// Ledger entries matching the category prefix, before other rules
    pub candidates: usize,
    pub eligible: Vec<LootEntry>,
}

/// Drives reroll iterations until the ledger, the retry budget or the
/// operator says stop
pub struct RerollController {
    catalog: LootCatalogClient,
    filter: EligibilityFilter,
    executor: ExchangeExecutor,
    retry_limit: u32,
    delay: Duration,
    cancelled: Arc<AtomicBool>,
}

impl RerollController {
    pub fn new(transport: Arc<dyn LcuTransport>, config: &RerollConfig) -> Self {
        Self {
            catalog: LootCatalogClient::new(transport.clone()),
            filter: EligibilityFilter::new(config.policy()),
            executor: ExchangeExecutor::new(transport, config.repeat),
            retry_limit: config.retry_limit,
            delay: config.inter_iteration_delay(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stop at the top of the next iteration once `flag` is set
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        self.filter.policy()
    }

    pub async fn fetch_catalog(&self) -> Vec<CatalogEntry> {
        self.catalog.fetch_catalog(SKIN_CATEGORY).await
    }

    /// Fetch the ledger and apply the eligibility policy.
    ///
    /// A failed fetch is an error, distinct from an empty selection.
    pub async fn fetch_eligible(&self, catalog: &[CatalogEntry]) -> Result<Eligibility> {
        let loot = self.catalog.fetch_loot().await?;
        let prefix = self.filter.policy().prefix();
        let candidates = loot.iter().filter(|e| e.loot_id.starts_with(prefix)).count();
        let eligible = self.filter.select_eligible(loot, catalog, Utc::now());

        Ok(Eligibility {
            candidates,
            eligible,
        })
    }

    /// Run until a terminal state. Never fails; the reason is in the report.
    pub async fn run(&self) -> RerollReport {
        let catalog = self.fetch_catalog().await;
        self.run_with_catalog(&catalog).await
    }

    /// Run against a catalog snapshot the caller already fetched
    pub async fn run_with_catalog(&self, catalog: &[CatalogEntry]) -> RerollReport {
        info!("Loaded {} catalog entries for novelty checks", catalog.len());

        let mut report = RerollReport::default();
        let mut state = RerollState::Running;

        while !state.is_terminal() {
            state = self.step(catalog, &mut report).await;
        }

        report.termination = state;
        info!(
            "Reroll stopped: {} ({} successful, {} failed)",
            state.description(),
            report.successful,
            report.retries
        );
        report
    }

    async fn step(&self, catalog: &[CatalogEntry], report: &mut RerollReport) -> RerollState {
        if self.cancelled.load(Ordering::SeqCst) {
            return RerollState::TerminatedCancelled;
        }

        if report.retries >= self.retry_limit {
            return RerollState::TerminatedRetryLimit;
        }

        report.iterations += 1;

        let eligibility = match self.fetch_eligible(catalog).await {
            Ok(eligibility) => eligibility,
            Err(e) => {
                warn!("Could not fetch loot ledger: {}", e);
                report.retries += 1;
                self.pause().await;
                return RerollState::Running;
            }
        };

        let Some(batch) = ExchangeBatch::from_eligible(&eligibility.eligible) else {
            return if eligibility.candidates == 0 {
                RerollState::TerminatedExhausted
            } else {
                RerollState::TerminatedIneligible
            };
        };

        match self.executor.execute(&batch).await {
            Ok(outcome) if outcome.success => {
                report.successful += 1;
                report.received.extend(outcome.received);
            }
            Ok(_) => {
                report.retries += 1;
            }
            Err(e) => {
                warn!("Reroll request failed: {}", e);
                report.retries += 1;
            }
        }

        self.pause().await;
        RerollState::Running
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
