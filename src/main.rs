//! Entry point. Loads `.env` and `config.toml`, initialises structured
//! logging, logs in, and prints the account's settled bets.

use anyhow::{Context, Result};
use tracing::info;

use betfair_rpc::params::ClearedOrdersQuery;
use betfair_rpc::types::BetStatus;
use betfair_rpc::{AppConfig, BetfairClient};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path = std::env::var("BETFAIR_CONFIG").unwrap_or_else(|_| CONFIG_PATH.to_string());
    let cfg = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration from {config_path}"))?;

    info!(
        identity_url = %cfg.betfair.identity_url,
        betting_url = %cfg.betfair.betting_url,
        "betfair-rpc starting up"
    );

    let client = BetfairClient::connect(&cfg)
        .await
        .context("Betfair login failed")?;

    let settled = client
        .list_cleared_orders(BetStatus::Settled, &ClearedOrdersQuery::default())
        .await
        .context("listClearedOrders failed")?;

    println!("{}", serde_json::to_string_pretty(&settled)?);
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("betfair_rpc=info"));

    if std::env::var("BETFAIR_LOG_JSON").is_ok() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
