use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsbrief_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "newsbrief")]
#[command(author, version, about = "Summarize news articles with a text-generation provider")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of ~/.config/newsbrief/config.toml
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize one or more articles
    Summarize(SummarizeArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
pub struct SummarizeArgs {
    /// Article URL (also used to look up the full article)
    #[arg(short = 'u', long)]
    pub url: Option<String>,
    /// Article id
    #[arg(long)]
    pub id: Option<String>,
    #[arg(short = 't', long)]
    pub title: Option<String>,
    #[arg(short = 'd', long)]
    pub description: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    /// JSON file holding one article object or an array of them
    #[arg(short = 'f', long, conflicts_with_all = ["url", "id", "title", "description", "content"])]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default config file if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Summarize(args) => commands::summarize::run(&config, args).await,
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init => commands::config::init(&config_path),
        },
    }
}
