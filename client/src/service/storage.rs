//! HTTP object-storage client for receipts.
//!
//! Speaks the bucket REST surface the mobile app uses: objects are addressed
//! as `{base}/o/{key}` with the key percent-encoded as a single path
//! segment, uploads go through `POST {base}/o?name={key}`, and downloads use
//! the `?alt=media` form of the object URL. A 404 on delete or resolve means
//! the object is simply absent, which is a success for delete and `None` for
//! resolve.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::service::traits::ReceiptStore;

pub struct HttpReceiptStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpReceiptStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/o/{}", self.base_url, urlencoding::encode(key))
    }

    fn download_url(&self, key: &str) -> String {
        format!("{}?alt=media", self.object_url(key))
    }
}

#[async_trait]
impl ReceiptStore for HttpReceiptStore {
    async fn upload(&self, data: &[u8], key: &str, content_type: &str) -> Result<String> {
        debug!(key, size = data.len(), "uploading receipt");
        let url = format!("{}/o?name={}", self.base_url, urlencoding::encode(key));
        self.http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data.to_vec())
            .send()
            .await
            .context("receipt storage is unreachable")?
            .error_for_status()
            .context("receipt upload was rejected")?;
        Ok(self.download_url(key))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        debug!(key, "deleting receipt");
        let response = self
            .http
            .delete(self.object_url(key))
            .send()
            .await
            .context("receipt storage is unreachable")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        response
            .error_for_status()
            .context("receipt delete was rejected")?;
        Ok(())
    }

    async fn resolve_url(&self, key: &str) -> Result<Option<String>> {
        let response = self
            .http
            .get(self.object_url(key))
            .send()
            .await
            .context("receipt storage is unreachable")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        response
            .error_for_status()
            .context("receipt lookup failed")?;
        Ok(Some(self.download_url(key)))
    }
}
