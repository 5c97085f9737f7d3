use anyhow::Context;
use clap::Subcommand;
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_asset_list, output_json, output_success};
use crate::cli::OutputFormat;
use crate::favorites::Asset;

#[derive(Subcommand)]
pub enum FavoritesCommands {
    #[command(about = "List a user's favorites")]
    List {
        #[arg(help = "User ID")]
        user_id: String,
        #[arg(long = "type", help = "Only show one kind: chart, insight or audience")]
        kind: Option<String>,
    },

    #[command(about = "Show a single favorite")]
    Show {
        #[arg(help = "User ID")]
        user_id: String,
        #[arg(help = "Asset ID")]
        asset_id: String,
    },

    #[command(about = "Add a favorite from a JSON asset (file or stdin)")]
    Add {
        #[arg(help = "User ID")]
        user_id: String,
        #[arg(long, help = "Path to the asset JSON; reads stdin when omitted")]
        file: Option<PathBuf>,
    },

    #[command(about = "Replace a favorite's description")]
    Edit {
        #[arg(help = "User ID")]
        user_id: String,
        #[arg(help = "Asset ID")]
        asset_id: String,
        #[arg(help = "New description")]
        description: String,
    },

    #[command(about = "Remove a favorite")]
    Remove {
        #[arg(help = "User ID")]
        user_id: String,
        #[arg(help = "Asset ID")]
        asset_id: String,
    },
}

pub async fn handle(cmd: FavoritesCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        FavoritesCommands::List { user_id, kind } => {
            let query: Vec<(&str, &str)> = kind.as_deref().map(|k| ("type", k)).into_iter().collect();
            let data = client.get(&["favorites", user_id.as_str()], &query).await?;
            let favorites = data.get("favorites").cloned().unwrap_or_else(|| json!([]));

            match output_format {
                OutputFormat::Json => output_json(&favorites),
                OutputFormat::Text => {
                    let assets: Vec<Asset> =
                        serde_json::from_value(favorites).context("server returned malformed favorites")?;
                    output_asset_list(&user_id, &assets);
                    Ok(())
                }
            }
        }
        FavoritesCommands::Show { user_id, asset_id } => {
            let data = client.get(&["favorites", user_id.as_str(), asset_id.as_str()], &[]).await?;
            output_json(&data)
        }
        FavoritesCommands::Add { user_id, file } => {
            let asset = read_asset(file)?;
            client
                .post(&["favorites"], Some(&json!({ "user_id": user_id, "asset": asset })))
                .await?;
            output_success(&output_format, "Asset added to favorites", None)
        }
        FavoritesCommands::Edit { user_id, asset_id, description } => {
            client
                .put(&["favorites", user_id.as_str(), asset_id.as_str()], &json!({ "new_description": description }))
                .await?;
            output_success(&output_format, "Asset updated", Some(json!({ "asset_id": asset_id })))
        }
        FavoritesCommands::Remove { user_id, asset_id } => {
            client.delete(&["favorites", user_id.as_str(), asset_id.as_str()]).await?;
            output_success(&output_format, "Asset removed", Some(json!({ "asset_id": asset_id })))
        }
    }
}

/// Read the asset JSON and check it decodes before it goes over the wire
fn read_asset(file: Option<PathBuf>) -> anyhow::Result<Value> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read asset from stdin")?;
            buffer
        }
    };

    let value: Value = serde_json::from_str(&raw).context("asset is not valid JSON")?;
    Asset::from_value(value.clone())?;
    Ok(value)
}
