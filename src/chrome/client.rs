//! REST client for the Chrome Web Store items API

use crate::config::ChromeConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

/// Delay between the upload completing and the publish request
const INTER_CALL_DELAY: Duration = Duration::from_secs(1);

/// Observer for the phases of [`publish_new_version`]
///
/// All hooks default to no-ops; implement only the milestones you report.
///
/// [`publish_new_version`]: ChromeWebStoreClient::publish_new_version
#[async_trait]
pub trait PublishProgress: Send + Sync {
    /// An access token was minted
    async fn on_token(&self) {}
    /// The archive was accepted as the new draft
    async fn on_uploaded(&self) {}
    /// The draft was published
    async fn on_published(&self) {}
}

/// Progress observer that reports nothing
pub struct SilentProgress;

#[async_trait]
impl PublishProgress for SilentProgress {}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for uploading and publishing one Web Store item
///
/// Each call mints nothing on its own; [`publish_new_version`] is the
/// intended entry point and runs refresh, upload, and publish in order.
///
/// [`publish_new_version`]: ChromeWebStoreClient::publish_new_version
pub struct ChromeWebStoreClient {
    http: reqwest::Client,
    config: ChromeConfig,
    api_root: String,
    token_root: String,
    inter_call_delay: Duration,
}

impl ChromeWebStoreClient {
    /// Build a client against the production Google endpoints
    pub fn new(config: ChromeConfig) -> Self {
        Self::with_roots(
            config,
            "https://www.googleapis.com".to_string(),
            "https://www.googleapis.com".to_string(),
        )
    }

    /// Build a client against arbitrary endpoint roots
    pub fn with_roots(config: ChromeConfig, api_root: String, token_root: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_root,
            token_root,
            inter_call_delay: INTER_CALL_DELAY,
        }
    }

    /// Exchange the refresh token for a short-lived access token
    pub async fn refresh_access_token(&self) -> Result<String> {
        let url = format!("{}/oauth2/v4/token", self.token_root);
        debug!("refreshing Web Store access token");

        let response = self
            .http
            .post(&url)
            .form(&[
                ("refresh_token", self.config.refresh_token.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("token endpoint answered {status}");
            return Err(Error::UnexpectedStatus {
                endpoint: url,
                status: status.as_u16(),
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Upload a packaged extension as the item's new draft
    ///
    /// The archive is streamed from disk rather than buffered; the Web Store
    /// requires an explicit `Content-Length`, so the file is sized first.
    pub async fn upload(&self, access_token: &str, archive: &Path) -> Result<()> {
        let url = format!(
            "{}/upload/chromewebstore/v1.1/items/{}",
            self.api_root, self.config.store_id
        );
        let len = tokio::fs::metadata(archive).await?.len();
        let file = tokio::fs::File::open(archive).await?;
        info!("uploading {} ({len} bytes)", archive.display());

        let response = self
            .http
            .put(&url)
            .bearer_auth(access_token)
            .header("x-goog-api-version", "2")
            .header(reqwest::header::CONTENT_LENGTH, len)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await?;

        self.check(url, response).await
    }

    /// Publish the item's current draft to the default audience
    pub async fn publish(&self, access_token: &str) -> Result<()> {
        let url = format!(
            "{}/chromewebstore/v1.1/items/{}/publish",
            self.api_root, self.config.store_id
        );
        info!("publishing item {}", self.config.store_id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .header("x-goog-api-version", "2")
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await?;

        self.check(url, response).await
    }

    /// Upload the archive and publish it as a new version
    ///
    /// The store needs a moment to register a freshly uploaded draft, so a
    /// short settle separates the upload from the publish.
    pub async fn publish_new_version(
        &self,
        archive: &Path,
        progress: &dyn PublishProgress,
    ) -> Result<()> {
        let token = self.refresh_access_token().await?;
        progress.on_token().await;

        self.upload(&token, archive).await?;
        progress.on_uploaded().await;

        tokio::time::sleep(self.inter_call_delay).await;

        self.publish(&token).await?;
        progress.on_published().await;
        Ok(())
    }

    async fn check(&self, url: String, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            debug!("{url} answered {status}");
            return Ok(());
        }

        // The API reports the reason in the body; keep it for the operator.
        let body = response.text().await.unwrap_or_default();
        warn!("{url} answered {status}: {body}");
        Err(Error::UnexpectedStatus {
            endpoint: url,
            status: status.as_u16(),
        })
    }
}
