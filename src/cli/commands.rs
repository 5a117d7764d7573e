use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skin-reroll")]
#[command(about = "Reroll disposable skin shards through the local game client")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reroll eligible skins until none are left or retries run out
    Reroll {
        /// Only reroll rental skin shards
        #[arg(long)]
        rental_only: bool,

        /// Store item id to protect (repeatable)
        #[arg(short, long = "whitelist", value_name = "STORE_ITEM_ID")]
        whitelist: Vec<i64>,

        /// Failed attempts allowed before giving up
        #[arg(long)]
        retry_limit: Option<u32>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show which skins would be rerolled
    Eligible {
        /// Only consider rental skin shards
        #[arg(long)]
        rental_only: bool,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Count mythic skins across loot and inventory
    CountMythic,

    /// Show effective configuration and check the client lockfile
    Init,
}
