//! Environment-driven configuration for the demo binary.

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// GraphQL endpoint of the transaction service.
    pub api_url: String,
    /// Bearer token for the API, when the deployment requires one.
    pub api_token: Option<String>,
    /// Base URL of the receipt bucket.
    pub storage_url: String,
    /// Id of the signed-in user; receipts are keyed under it.
    pub user_id: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_url: require("BYTEBANK_API_URL")?,
            api_token: std::env::var("BYTEBANK_API_TOKEN").ok(),
            storage_url: require("BYTEBANK_STORAGE_URL")?,
            user_id: require("BYTEBANK_USER_ID")?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}
