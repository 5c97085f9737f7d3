use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_json, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Obtain a bearer token for a user")]
    Login {
        #[arg(help = "User ID")]
        user_id: String,
    },

    #[command(about = "Revoke the current bearer token")]
    Logout,
}

pub async fn handle(cmd: AuthCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { user_id } => {
            let data = client
                .post(&["login"], Some(&json!({ "user_id": user_id })))
                .await?;

            match output_format {
                OutputFormat::Json => output_json(&data),
                OutputFormat::Text => {
                    let token = data.get("token").and_then(|t| t.as_str()).unwrap_or_default();
                    let expires_at = data.get("expires_at").and_then(|t| t.as_str()).unwrap_or("unknown");
                    println!("✓ Logged in as {} (expires {})", user_id, expires_at);
                    println!("export FAVORITES_TOKEN={}", token);
                    Ok(())
                }
            }
        }
        AuthCommands::Logout => {
            client.post(&["logout"], None).await?;
            output_success(&output_format, "Token revoked", None)
        }
    }
}

pub async fn health(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let data = client.get(&["health"], &[]).await?;

    match output_format {
        OutputFormat::Json => output_json(&data),
        OutputFormat::Text => {
            let status = data.get("status").and_then(|s| s.as_str()).unwrap_or("unknown");
            let users = data.pointer("/favorites/users").and_then(|v| v.as_u64()).unwrap_or(0);
            let assets = data.pointer("/favorites/assets").and_then(|v| v.as_u64()).unwrap_or(0);
            println!("Status: {}", status);
            println!("Users: {}  Favorites: {}", users, assets);
            Ok(())
        }
    }
}
