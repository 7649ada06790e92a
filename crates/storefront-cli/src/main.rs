use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod load;
mod priorities;
mod validate;
mod views;

use priorities::PrioritiesCommands;
use views::RankMode;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Validate and maintain a storefront catalog snapshot")]
struct Cli {
    /// Snapshot directory; overrides `STOREFRONT_DATA_DIR`
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema-check every collection and cross-check references
    Validate {
        /// Require tags.json to cover exactly the catalog tag universe
        #[arg(long)]
        strict_tags: bool,
    },
    /// Inspect or rewrite tag and category priorities
    Priorities {
        #[command(subcommand)]
        command: PrioritiesCommands,
    },
    /// Print product ids in display order
    Rank {
        #[arg(long, value_enum, default_value_t = RankMode::Priority)]
        mode: RankMode,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Tag usage across products
    Tags {
        #[command(subcommand)]
        command: TagsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum TagsCommands {
    /// Count products per normalized tag, most used first
    Counts,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = storefront_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let universe = storefront_core::load_universe(&config.catalog_path)?;
    tracing::debug!(
        env = %config.env,
        data_dir = %data_dir.display(),
        categories = universe.categories.len(),
        tags = universe.tags.len(),
        "storefront-cli starting"
    );

    match cli.command {
        Commands::Validate { strict_tags } => {
            validate::run_validate(&data_dir, &universe, strict_tags)
        }
        Commands::Priorities { command } => {
            priorities::run_priorities(&data_dir, &config, &universe, &command)
        }
        Commands::Rank { mode, limit } => views::run_rank(&data_dir, mode, limit),
        Commands::Tags {
            command: TagsCommands::Counts,
        } => views::run_tag_counts(&data_dir),
    }
}
