use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::reroll::eligibility::{EligibilityPolicy, DEFAULT_NOVELTY_THRESHOLD_SECS};

const MAX_INTER_ITERATION_DELAY_MS: u64 = 3_600_000;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub reroll: RerollConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_lockfile_path")]
    pub lockfile_path: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RerollConfig {
    #[serde(default = "default_true")]
    pub include_permanent: bool,
    /// Store item ids that are never rerolled
    #[serde(default)]
    pub whitelist: Vec<i64>,
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,
    #[serde(default = "default_novelty_threshold_secs")]
    pub novelty_threshold_secs: i64,
    #[serde(default = "default_inter_iteration_delay_ms")]
    pub inter_iteration_delay_ms: u64,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_lockfile_path() -> String {
    "C:/Riot Games/League of Legends/lockfile".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_retry_limit() -> u32 {
    20
}

fn default_novelty_threshold_secs() -> i64 {
    DEFAULT_NOVELTY_THRESHOLD_SECS
}

fn default_inter_iteration_delay_ms() -> u64 {
    1000
}

fn default_repeat() -> u32 {
    1
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            lockfile_path: default_lockfile_path(),
            host: default_host(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for RerollConfig {
    fn default() -> Self {
        Self {
            include_permanent: true,
            whitelist: Vec::new(),
            retry_limit: default_retry_limit(),
            novelty_threshold_secs: default_novelty_threshold_secs(),
            inter_iteration_delay_ms: default_inter_iteration_delay_ms(),
            repeat: default_repeat(),
        }
    }
}

impl Config {
    /// Load configuration from `config/default`, an explicit file and
    /// `REROLL__*` environment variables, in increasing priority.
    ///
    /// `config/default` may be absent; an explicitly passed file must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("REROLL")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("reroll.whitelist")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.reroll.repeat == 0 {
            anyhow::bail!("reroll.repeat must be at least 1");
        }
        if self.reroll.inter_iteration_delay_ms > MAX_INTER_ITERATION_DELAY_MS {
            anyhow::bail!(
                "reroll.inter_iteration_delay_ms must not exceed {} ms",
                MAX_INTER_ITERATION_DELAY_MS
            );
        }
        Ok(())
    }
}

impl RerollConfig {
    pub fn policy(&self) -> EligibilityPolicy {
        EligibilityPolicy {
            include_permanent: self.include_permanent,
            whitelist: self.whitelist.iter().copied().collect::<HashSet<_>>(),
            novelty_threshold_secs: self.novelty_threshold_secs,
        }
    }

    pub fn inter_iteration_delay(&self) -> Duration {
        Duration::from_millis(self.inter_iteration_delay_ms)
    }
}
