mod config;
mod repl;

use crate::config::{MapchatConfig, API_KEY_ENV};
use crate::repl::Repl;
use clap::{Parser, Subcommand};
use mapchat_agent::{HttpMapSource, MapSource, ObserveOutcome, SessionManager, TurnExecutor};
use mapchat_session::extract_title;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mapchat", about = "mapchat: ask an LLM about a Wardley map")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "mapchat.toml")]
    config: PathBuf,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat interactively about a map
    Chat {
        /// Map id to load first (defaults to maps.default_map_id)
        #[arg(short, long)]
        map: Option<String>,
    },
    /// Fetch a map and print its title and text
    Fetch {
        /// Map id
        id: String,
    },
    /// Ask a single question about a map
    Ask {
        /// Map id (defaults to maps.default_map_id)
        #[arg(short, long)]
        map: Option<String>,
        /// The question
        question: String,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = MapchatConfig::load(&cli.config)?;
    let source: Arc<dyn MapSource> = Arc::new(HttpMapSource::new(
        config.maps.api_base_url.clone(),
        config.maps.timeout(),
    )?);

    match cli.command {
        Commands::Fetch { id } => {
            let text = source.fetch(&id).await?;
            if let Some(title) = extract_title(&text) {
                println!("### {title}");
            }
            println!("{text}");
        }
        Commands::Chat { map } => {
            // Refuse to start without a key rather than running with chat disabled.
            config.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;
            info!(model = %config.model.model_id, "Starting chat");

            let executor = Arc::new(TurnExecutor::new(config.model)?);
            let manager = SessionManager::new(source, executor);
            let mut repl = Repl::new(manager, config.pricing.usd_per_1k_tokens);

            let map_id = map.unwrap_or(config.maps.default_map_id);
            repl.load(&map_id, &mut std::io::stdout()).await?;
            repl.run().await?;
        }
        Commands::Ask { map, question } => {
            config.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;

            let executor = Arc::new(TurnExecutor::new(config.model)?);
            let mut manager = SessionManager::new(source, executor);

            let map_id = map.unwrap_or(config.maps.default_map_id);
            match manager.observe(&map_id).await {
                ObserveOutcome::Loaded { .. } | ObserveOutcome::Unchanged => {}
                ObserveOutcome::NoDocument => anyhow::bail!("no map id given"),
                ObserveOutcome::FetchFailed(e) => return Err(e.into()),
            }

            let outcome = manager.ask(&question).await?;
            println!("{}", outcome.reply);
            let cost = outcome
                .usage
                .estimated_cost(config.pricing.usd_per_1k_tokens);
            eprintln!(
                "Total Tokens Used: {} (est. ${cost:.4})",
                outcome.usage.total_tokens
            );
        }
    }

    Ok(())
}
