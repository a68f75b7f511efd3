//! Basic VaultX Client Example
//!
//! Checks API health, opens a deal and polls its status once.
//!
//! Run with: cargo run --example basic_client -- https://api.vaultx.one [api-key]

use std::num::NonZeroU32;

use tracing_subscriber::EnvFilter;
use vaultx_rs::{create_client, ClientConfig, DealCreateRequest, VaultXError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vaultx_rs=debug")),
        )
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let base_url = args.next().unwrap_or_else(|| "http://localhost:8080".to_string());

    let mut config = ClientConfig::new(base_url).with_timeout_ms(5_000);
    if let Some(key) = args.next() {
        config = config.with_api_key(key);
    }

    let client = create_client(config)?;
    println!("VaultX client for {}\n", client.config().api_base_url);

    match client.get_health().await {
        Ok(health) => println!("✅ Health: {}", health.unwrap_or_default()),
        Err(VaultXError::Timeout { cause }) => {
            println!("⏱️  API unreachable: {}", cause.as_deref().unwrap_or("deadline exceeded"));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let request = DealCreateRequest::new(
        "bafybeigdyrztaq3dm5ym3i2xagq2ph6sa7wb7ryjdnbg3bzv4ckmr7dbmu",
        1_048_576,
        NonZeroU32::new(3).unwrap_or(NonZeroU32::MIN),
    );

    let created = client.create_deal(&request).await?;
    println!("📝 Created deal: {}", created.deal_id);

    let status = client.get_deal_status(&created.deal_id).await?;
    println!("🔍 Deal {} is {}", status.deal_id, status.status);
    if let Some(message) = status.message {
        println!("   {}", message);
    }

    Ok(())
}
