mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::*;
use skin_reroll::{
    config::Config,
    error::{self, RerollError},
    lcu::{LcuClient, LcuTransport, Lockfile},
    loot::{LootCatalogClient, RarityResolver},
    reroll::RerollController,
    utils,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("skin_reroll=debug,info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Reroll {
            rental_only,
            whitelist,
            retry_limit,
            yes,
        } => {
            info!("Starting skin reroll...");
            run_reroll(config, rental_only, whitelist, retry_limit, yes).await
        }

        Commands::Eligible {
            rental_only,
            verbose,
        } => {
            info!("Checking eligible skins...");
            show_eligible(config, rental_only, verbose).await
        }

        Commands::CountMythic => {
            info!("Counting mythic skins...");
            count_mythic(&config).await
        }

        Commands::Init => initialize(&config),
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn connect(config: &Config) -> error::Result<Arc<dyn LcuTransport>> {
    let client = LcuClient::from_config(&config.client)?;
    info!("Connected to client API at {}", client.base_url());
    Ok(Arc::new(client))
}

async fn run_reroll(
    mut config: Config,
    rental_only: bool,
    whitelist: Vec<i64>,
    retry_limit: Option<u32>,
    yes: bool,
) -> error::Result<()> {
    if rental_only {
        config.reroll.include_permanent = false;
    }
    config.reroll.whitelist.extend(whitelist);
    if let Some(limit) = retry_limit {
        config.reroll.retry_limit = limit;
    }

    let transport = connect(&config)?;
    let cancelled = Arc::new(AtomicBool::new(false));
    let controller = RerollController::new(transport, &config.reroll)
        .with_cancellation(cancelled.clone());

    let catalog = controller.fetch_catalog().await;
    match controller.fetch_eligible(&catalog).await {
        Ok(eligibility) => println!(
            "{} eligible skins ({} candidates)",
            eligibility.eligible.len().to_string().green(),
            eligibility.candidates
        ),
        // The run itself retries ledger failures against its budget
        Err(e) => warn!("Could not preview eligible skins: {}", e),
    }

    if !yes && !utils::confirm_action("Reroll eligible skins? This consumes skin shards") {
        println!("Cancelled");
        return Ok(());
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current reroll");
            cancelled.store(true, Ordering::SeqCst);
        }
    });

    let report = controller.run_with_catalog(&catalog).await;
    report.print_summary();
    Ok(())
}

async fn show_eligible(mut config: Config, rental_only: bool, verbose: bool) -> error::Result<()> {
    if rental_only {
        config.reroll.include_permanent = false;
    }

    let transport = connect(&config)?;
    let controller = RerollController::new(transport.clone(), &config.reroll);
    let catalog = controller.fetch_catalog().await;
    let eligibility = controller.fetch_eligible(&catalog).await?;

    println!("\n{}", "=== Eligibility ===".cyan().bold());
    println!("Skin shards:     {}", eligibility.candidates);
    println!(
        "Eligible:        {} ✓",
        eligibility.eligible.len().to_string().green()
    );
    println!(
        "Full batches:    {}",
        eligibility.eligible.len() / skin_reroll::reroll::BATCH_SIZE
    );

    if verbose && !eligibility.eligible.is_empty() {
        println!("\n{}", "Eligible Skins (reroll order):".yellow());
        let widths = [34, 30, 10, 10];
        println!("{}", utils::table_rule(&widths));
        println!(
            "{}",
            utils::table_row(&["Loot ID", "Name", "Value", "Rarity"], &widths).bold()
        );
        println!("{}", utils::table_rule(&widths));

        for entry in &eligibility.eligible {
            let row = utils::table_row(
                &[
                    entry.loot_id.clone(),
                    utils::truncate(&entry.item_desc, 30),
                    utils::format_essence(entry.disenchant_value),
                    entry.rarity.to_string(),
                ],
                &widths,
            );
            println!("{}", utils::paint_rarity(&row, entry.rarity));
        }
        println!("{}", utils::table_rule(&widths));
    }

    if verbose {
        // Show why the remaining skins were held back
        let loot = LootCatalogClient::new(transport).fetch_loot().await?;
        let filter = skin_reroll::reroll::EligibilityFilter::new(controller.policy().clone());
        let now = chrono::Utc::now();
        let held_back: Vec<_> = loot
            .iter()
            .filter(|e| e.loot_id.starts_with(controller.policy().prefix()))
            .filter_map(|e| filter.exclusion(e, &catalog, now).map(|reason| (e, reason)))
            .collect();

        if !held_back.is_empty() {
            println!("\n{}", "Protected Skins:".yellow());
            for (entry, reason) in held_back {
                println!("  {} - {}", utils::truncate(&entry.item_desc, 40), reason);
            }
        }
    }

    Ok(())
}

async fn count_mythic(config: &Config) -> error::Result<()> {
    let transport = connect(config)?;
    let resolver = RarityResolver::new(LootCatalogClient::new(transport));

    match resolver.count_mythic().await? {
        Some(count) => println!("Mythic skins: {}", count.to_string().magenta().bold()),
        None => println!("{}", "Mythic skin count unavailable".yellow()),
    }
    Ok(())
}

fn initialize(config: &Config) -> error::Result<()> {
    println!("{}", "Skin Reroll configuration".green());
    println!("\n{}", "Client:".cyan());
    println!("  Lockfile:       {}", config.client.lockfile_path);
    println!("  Host:           {}", config.client.host);
    println!("  Timeout:        {}s", config.client.request_timeout_secs);
    println!("\n{}", "Reroll:".cyan());
    println!("  Permanent:      {}", config.reroll.include_permanent);
    println!("  Whitelist:      {:?}", config.reroll.whitelist);
    println!("  Retry Limit:    {}", config.reroll.retry_limit);
    println!("  Novelty Window: {}s", config.reroll.novelty_threshold_secs);
    println!("  Delay:          {}ms", config.reroll.inter_iteration_delay_ms);

    let lockfile = Lockfile::read(Path::new(&config.client.lockfile_path)).map_err(|e| {
        RerollError::Config(format!(
            "client lockfile {} unusable: {}",
            config.client.lockfile_path, e
        ))
    })?;
    println!(
        "\n{}",
        format!("✓ Client found on port {} (pid {})", lockfile.port, lockfile.pid).green()
    );

    println!("\n{}", "Ready to use! Try running:".cyan());
    println!("  {} to preview eligible skins", "skin-reroll eligible --verbose".yellow());
    println!("  {} to start rerolling", "skin-reroll reroll".yellow());
    Ok(())
}
