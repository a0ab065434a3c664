//! Terminal harness for the client core: loads the first pages of the
//! transaction history against a live deployment and prints them.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bytebank_client::config::AppConfig;
use bytebank_client::screen::TransactionsScreen;
use bytebank_client::service::{GraphQlTransactionGateway, HttpReceiptStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!(api = %config.api_url, "starting bytebank client");

    let gateway = Arc::new(GraphQlTransactionGateway::new(
        config.api_url.clone(),
        config.api_token.clone(),
    ));
    let store = Arc::new(HttpReceiptStore::new(config.storage_url.clone()));
    let mut screen = TransactionsScreen::new(config.user_id.clone(), gateway, store);

    screen.mount().await;
    screen.load_more().await;
    for event in screen.take_events() {
        eprintln!("{event:?}");
    }

    println!("{:<12} {:<12} {:>10}  alias", "date", "kind", "value");
    for tx in screen.items() {
        println!(
            "{:<12} {:<12} {:>10.2}  {}",
            tx.date,
            tx.kind.label(),
            tx.signed_value(),
            tx.alias.as_deref().unwrap_or("-")
        );
    }

    let summary = screen.summary().await?;
    println!("\nbalance: {:.2}", summary.balance);
    Ok(())
}
