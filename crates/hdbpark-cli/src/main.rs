mod commands;
mod shell;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use hdbpark_resolver::AddressQuery;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hdbpark")]
#[command(about = "Look up HDB carparks by number or address, with live availability")]
struct Cli {
    /// Reference carpark CSV (overrides `HDBPARK_REFERENCE_PATH`)
    #[arg(long, global = true)]
    reference: Option<PathBuf>,
    /// Live availability endpoint (overrides `HDBPARK_AVAILABILITY_URL`)
    #[arg(long, global = true)]
    availability_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show one carpark by carpark number (e.g. A20)
    Lookup { identifier: String },
    /// Search by full address (e.g. BLK 101 TAMPINES STREET 1)
    Address {
        #[arg(required = true, num_args = 1..)]
        address: Vec<String>,
    },
    /// Search by town or road name, optionally narrowed to a block
    Town {
        #[arg(required = true, num_args = 1..)]
        town: Vec<String>,
        /// Block number; omit or pass "NOT SURE" to list the whole town
        #[arg(long)]
        block: Option<String>,
    },
    /// Show the latest feed update time, for one carpark or overall
    LastUpdate { identifier: Option<String> },
    /// Interactive query shell (the default)
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = hdbpark_core::load_app_config().context("loading configuration")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = cli.reference {
        config.reference_path = path;
    }
    if let Some(url) = cli.availability_url {
        config.availability_url = url;
    }

    let session = commands::Session::open(&config)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Lookup { identifier } => commands::run_lookup(&session, &identifier).await?,
        Commands::Address { address } => {
            let query = AddressQuery::Full(address.join(" "));
            commands::run_search(&session, &query).await?;
        }
        Commands::Town { town, block } => {
            let query = AddressQuery::TownBlock {
                town: town.join(" "),
                block,
            };
            commands::run_search(&session, &query).await?;
        }
        Commands::LastUpdate { identifier } => {
            commands::run_last_update(&session, identifier.as_deref()).await?;
        }
        Commands::Shell => shell::run_shell(&session).await?,
    }

    Ok(())
}
