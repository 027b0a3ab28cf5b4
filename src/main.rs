use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use ratings_scraper::apis::RedditPostSource;
use ratings_scraper::config::{environment_prefix, SecretConfig};
use ratings_scraper::logging;
use ratings_scraper::pipeline::ingest::{run_ingestion, InsertionOutcome};
use ratings_scraper::pipeline::storage::{InMemoryStorage, Storage};

#[derive(Parser)]
#[command(name = "ratings_scraper")]
#[command(about = "Toonami television ratings scraper")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the most recent ratings posts
    Ingest {
        /// Number of news posts to search over
        #[arg(long, default_value_t = 10)]
        posts: u32,
    },
    /// Walk the search feed further back for historical ratings
    Backfill {
        /// Total number of news posts to search over, in pages of 25
        #[arg(long)]
        posts: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();
    let posts = match cli.command {
        Commands::Ingest { posts } => posts,
        Commands::Backfill { posts } => posts,
    };

    info!("main: running in {}", environment_prefix());

    let secrets = SecretConfig::from_env()?;
    let source = RedditPostSource::connect(&secrets).await?;
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());

    match run_ingestion(&source, storage.as_ref(), posts).await {
        Ok(summary) => {
            println!("\n📊 Ingestion results:");
            println!("   Ratings records assembled: {}", summary.records);
            match &summary.outcome {
                InsertionOutcome::FullyInserted { inserted } => {
                    println!("   Nights inserted: {}", inserted.len());
                }
                InsertionOutcome::ShortCircuited {
                    inserted,
                    stopped_at,
                } => {
                    println!("   Nights inserted: {}", inserted.len());
                    println!("   Stopped at already-persisted night: {stopped_at}");
                }
            }
            println!("   Shows indexed: {}", summary.shows_indexed);
        }
        Err(e) => {
            error!("Ingestion failed: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}
