//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aibot")]
#[command(about = "Multi-provider AI relay bot for Telegram: run, providers, ask", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// List known providers and whether the current environment makes them available.
    Providers,
    /// Send one prompt to a provider and print the reply (no Telegram involved).
    Ask {
        /// Provider id, e.g. chatgpt, grok, gemini, perplexity.
        provider: String,
        /// Prompt text.
        prompt: String,
    },
}
