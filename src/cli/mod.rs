pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;

#[derive(Parser)]
#[command(name = "favorites")]
#[command(about = "Favorites CLI - Command-line client for the Favorites API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "FAVORITES_SERVER",
        default_value = "http://localhost:3000",
        help = "Base URL of the Favorites API"
    )]
    pub server: String,

    #[arg(long, global = true, env = "FAVORITES_TOKEN", hide_env_values = true, help = "Bearer token")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Check server health and store counters")]
    Health,

    #[command(flatten)]
    Favorites(commands::favorites::FavoritesCommands),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&cli.server, cli.token)?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &client, output_format).await,
        Commands::Health => commands::auth::health(&client, output_format).await,
        Commands::Favorites(cmd) => commands::favorites::handle(cmd, &client, output_format).await,
    }
}
