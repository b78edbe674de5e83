use std::sync::Arc;

use clap::Parser;
use marquee_core::config::MarqueeConfig;
use tracing::info;

mod host;
mod peers;
mod power;

/// Schedules playlist content and switches all peer displays in sync.
#[derive(Debug, Parser)]
#[command(name = "marquee-player", version, about)]
struct Cli {
    /// Path to marquee.toml. Defaults to $MARQUEE_CONFIG, then ~/.marquee/marquee.toml.
    #[arg(short, long)]
    config: Option<String>,

    /// Shared configuration JSON file, overriding `player.shared_config_path`.
    #[arg(long)]
    shared_config: Option<String>,

    /// Blank and power off the display when nothing is scheduled.
    #[arg(long)]
    blank: bool,

    /// Log synchronized calls instead of sending them to peers.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_player=info,marquee_scheduler=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // load config: --config > MARQUEE_CONFIG env > ~/.marquee/marquee.toml
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("MARQUEE_CONFIG").ok());
    let mut config = MarqueeConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        MarqueeConfig::default()
    });
    if let Some(path) = cli.shared_config {
        config.player.shared_config_path = path;
    }
    if cli.blank {
        config.player.blank = true;
    }

    info!(
        shared_config = %config.player.shared_config_path,
        peers = config.sync.peers.len(),
        blank = config.player.blank,
        dry_run = cli.dry_run,
        "starting marquee player"
    );

    let host = host::DisplayHost::new(&config, cli.dry_run).await?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let driver = marquee_scheduler::spawn(Arc::new(host), shutdown_rx);

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");

    // signal the driver to stop and wait for it to leave its loop
    let _ = shutdown_tx.send(true);
    driver.await?;
    Ok(())
}
