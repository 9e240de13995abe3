//! credits-server - Album Credits Service
//!
//! Looks up album credits on Genius, merges them per person, and finds
//! Instagram handles (and optionally contact emails) for the people credited.
//!
//! **Configuration priority:** CLI → ENV → TOML → compiled defaults

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use credits_common::config::resolve_config_path;
use credits_server::config::{initial_log_level, CliOverrides, ServiceConfig};
use credits_server::{bind_listener, build_router, AppState};

/// Album credits HTTP service
#[derive(Debug, Parser)]
#[command(name = "credits-server", version, about)]
struct Args {
    /// TOML config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Listen address
    #[arg(long, env = "CREDITS_BIND")]
    host: Option<String>,

    /// Listen port
    #[arg(long, short = 'p', env = "CREDITS_PORT")]
    port: Option<u16>,

    /// Genius API bearer token (prefer CREDITS_GENIUS_TOKEN)
    #[arg(long)]
    genius_token: Option<String>,

    /// Default log filter, e.g. "info" or "credits_server=debug"
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(initial_log_level(args.log_level.as_deref(), config_path.as_deref()))
        }))
        .init();

    info!(
        "Starting credits-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = ServiceConfig::load(
        config_path.as_deref(),
        CliOverrides {
            host: args.host,
            port: args.port,
            genius_token: args.genius_token,
            log_level: args.log_level,
        },
    )?;

    let state = AppState::from_config(&config)?;
    info!(
        instagram = state.social.is_some(),
        genius = %config.settings.genius_base_url,
        "Upstream clients initialized"
    );

    let app = build_router(state);

    let listener = bind_listener(&config).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
