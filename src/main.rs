// This is the entry point of the blocklist tester.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (HTTP API clients)
// - `cli/` = Operator-facing adapters (test harness, interactive menu)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Hand control to the selected testing mode

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a handful of mod.rs files that all look the same.
#[path = "cli/cli_layer.rs"]
mod cli;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use anyhow::Context;

use crate::core::moderation::{ModerationConfig, ModerationService};
use crate::infra::content_safety::AzureContentSafetyClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let endpoint = std::env::var("CONTENT_SAFETY_ENDPOINT").context(
        "Missing CONTENT_SAFETY_ENDPOINT environment variable! Create a .env file with your resource endpoint.",
    )?;
    let api_key = std::env::var("CONTENT_SAFETY_KEY")
        .context("Missing CONTENT_SAFETY_KEY environment variable!")?;

    // Severity at or above this value blocks content (0-3 scale).
    let severity_threshold = std::env::var("CONTENT_SAFETY_SEVERITY_THRESHOLD")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or_else(|| ModerationConfig::default().severity_threshold);

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Wire the HTTP client into the moderation service. This is the
    // composition root; credentials live here, not in the client module.

    let client = AzureContentSafetyClient::new(&endpoint, &api_key)?;
    let config = ModerationConfig {
        severity_threshold,
        ..Default::default()
    };
    let service = ModerationService::new(client, config);

    println!("\n{}", "=".repeat(70));
    println!("AZURE CONTENT SAFETY - BLOCKLIST TESTING");
    println!("{}", "=".repeat(70));

    println!("\nChoose testing mode:");
    println!("1. Run predefined tests (recommended for first run)");
    println!("2. Interactive testing");

    loop {
        let Some(choice) = cli::prompt("\nSelect mode (1 or 2): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                cli::harness::run_predefined_tests(&service).await;
                break;
            }
            "2" => {
                cli::interactive::run(&service).await?;
                break;
            }
            _ => println!("Invalid choice. Please select 1 or 2."),
        }
    }

    Ok(())
}
