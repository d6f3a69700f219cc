//! `landing-server` entry point.
//!
//! Loads configuration (defaults, TOML file, `LANDING_*` env, flags),
//! installs tracing, and serves until Ctrl+C.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use landing_server::config::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "landing-server", version, about = "Landing page content API")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override the bind address.
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "landing_server=info,landing_content=info,tower_http=info",
                )
            }),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    tracing::info!("landing-server v{} starting", env!("CARGO_PKG_VERSION"));
    landing_server::run(config)
        .await
        .context("server error")?;

    tracing::info!("landing-server exiting cleanly");
    Ok(())
}
