use clap::Args;
use colored::Colorize;
use reqwest::Method;
use serde_json::json;

use crate::api::{PbClient, Report, Result};

#[derive(Args)]
pub struct HealthCommand {}

/// Probe `/api/health`, then verify the configured superuser credentials
/// when present. Narration goes to stdout before the single final report.
pub async fn handle_health_command(_args: HealthCommand, client: &PbClient) -> Result<Report> {
    let config = client.config();
    println!("Checking PocketBase at {} ...", config.base_url.cyan());

    let health = client
        .transport()
        .send(Method::GET, "/api/health", None, None)
        .await?
        .into_data();

    if !config.has_superuser_credentials() {
        println!("Skipping superuser auth test (credentials not set).");
        return Ok(Report::success(
            200,
            json!({
                "message": "PocketBase is healthy",
                "health": health,
            }),
        ));
    }

    println!("Testing superuser authentication ...");
    let token = client.authenticate(true).await?;
    let preview: String = token.chars().take(20).collect();

    Ok(Report::success(
        200,
        json!({
            "message": "PocketBase is healthy",
            "health": health,
            "auth": "Superuser authentication successful",
            "token_preview": format!("{preview}..."),
        }),
    ))
}
