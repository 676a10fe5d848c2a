//! # DataDesk
//!
//! One shared reference text, a keyword RAG core over it, LLM chat grounded
//! in the retrieved context, and live update push over WebSocket.
//!
//! Usage:
//!   datadesk                         # Start the gateway with the saved config
//!   datadesk serve --port 8080       # Custom bind
//!   datadesk config                  # Print the resolved config as TOML

use anyhow::Result;
use clap::{Parser, Subcommand};
use datadesk_core::DataDeskConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "datadesk",
    version,
    about = "🗂️ DataDesk: master-data backend with keyword RAG and live updates"
)]
struct Cli {
    /// Config file path (default: ~/.datadesk/config.toml, or DATADESK_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP/WebSocket gateway (the default when no command is given)
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the resolved configuration as TOML, with the API key masked
    Config,
}

/// Keep enough of the key to recognize it, hide the rest.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "********".into();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

fn resolve_config_path(cli: &Cli) -> PathBuf {
    cli.config
        .clone()
        .or_else(|| std::env::var("DATADESK_CONFIG").ok())
        .map(|p| PathBuf::from(shellexpand::tilde(&p).to_string()))
        .unwrap_or_else(DataDeskConfig::default_path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "datadesk=debug,datadesk_gateway=debug,datadesk_store=debug,\
         datadesk_providers=debug,tower_http=debug"
    } else {
        "datadesk=info,datadesk_gateway=info,datadesk_store=info,datadesk_providers=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config_path = resolve_config_path(&cli);
    let mut config = if config_path.exists() {
        DataDeskConfig::load_from(&config_path)?
    } else {
        DataDeskConfig::default()
    };

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }

            println!("🗂️ DataDesk v{}", env!("CARGO_PKG_VERSION"));
            println!("   🌐 Gateway:  http://{}:{}", config.gateway.host, config.gateway.port);
            println!("   🤖 Provider: {} ({})", config.llm.provider, config.llm.model);
            println!("   💾 Storage:  {}", config.storage.backend);
            println!("   ⚙️ Config:   {}", config_path.display());
            println!();

            datadesk_gateway::start(config).await?;
        }
        Command::Config => {
            let mut shown = config;
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = mask_key(&shown.llm.api_key);
            }
            print!("{}", toml::to_string_pretty(&shown)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key_short() {
        assert_eq!(mask_key("sk-123"), "********");
    }

    #[test]
    fn test_mask_key_long() {
        assert_eq!(mask_key("sk-abcdefghijklmnop"), "sk-a...mnop");
    }
}
