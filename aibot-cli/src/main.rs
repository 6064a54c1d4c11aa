//! aibot CLI: run the Telegram relay bot, list providers, ask one provider directly. Config from env and optional CLI args.

use aibot_cli::{run_bot, BotConfig, Cli, Commands};
use aibot_core::ProviderId;
use anyhow::{Context, Result};
use clap::Parser;
use llm_providers::{ProviderRegistry, ProvidersConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
        Commands::Providers => handle_providers(),
        Commands::Ask { provider, prompt } => handle_ask(&provider, &prompt).await,
    }
}

/// Prints the catalog for the current environment.
fn handle_providers() -> Result<()> {
    let config = ProvidersConfig::from_env();
    config.validate()?;
    let registry = ProviderRegistry::from_config(&config)?;

    println!("{:<12} {:<12} {:<12} {}", "id", "name", "category", "status");
    println!("{}", "-".repeat(50));
    for info in registry.catalog() {
        println!(
            "{:<12} {:<12} {:<12} {}",
            info.id.as_str(),
            info.display_name,
            info.category.label(),
            if info.available { "available" } else { "unavailable" }
        );
    }
    Ok(())
}

/// One-shot invoke through the registry; logs to console.
async fn handle_ask(provider: &str, prompt: &str) -> Result<()> {
    aibot_core::init_tracing(None)?;

    let id: ProviderId = provider
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Unknown provider (see `aibot providers`)")?;
    let config = ProvidersConfig::from_env();
    config.validate()?;
    let registry = ProviderRegistry::from_config(&config)?;

    let reply = registry.invoke(id, prompt).await?;
    println!("{}", reply);
    Ok(())
}
