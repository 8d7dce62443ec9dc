//! Remote object-store sink for snapshots
//!
//! A plain HTTP PUT against an S3-style endpoint with a public-read ACL.
//! There is no read-back contract; objects are write-once.

use crate::error::{Error, Result};
use tracing::debug;
use url::Url;

/// One bucket on an S3-compatible object store
pub struct HttpBucket {
    http: reqwest::Client,
    endpoint: Url,
    bucket: String,
}

impl HttpBucket {
    /// Create a sink for `bucket` on `endpoint`
    ///
    /// The endpoint is treated as the store root; bucket and key are
    /// appended as path segments.
    pub fn new(endpoint: Url, bucket: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            bucket,
        }
    }

    /// Write one object with a public-read ACL
    pub async fn put_object(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let url = Url::parse(&format!(
            "{}/{}/{key}",
            self.endpoint.as_str().trim_end_matches('/'),
            self.bucket
        ))?;

        let len = bytes.len();
        let response = self
            .http
            .put(url.clone())
            .header("x-amz-acl", "public-read")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("published {len} bytes to {url}");
            Ok(())
        } else {
            Err(Error::UnexpectedStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_put_object_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/forensics/2024_01_05_03_09_07_screenshot.png/ext.zip")
            .match_header("x-amz-acl", "public-read")
            .with_status(200)
            .create_async()
            .await;

        let bucket = HttpBucket::new(Url::parse(&server.url()).unwrap(), "forensics".to_string());
        bucket
            .put_object("2024_01_05_03_09_07_screenshot.png/ext.zip", vec![1, 2, 3])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_put_object_non_2xx_carries_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PUT", Matcher::Regex("^/forensics/.*$".to_string()))
            .with_status(500)
            .create_async()
            .await;

        let bucket = HttpBucket::new(Url::parse(&server.url()).unwrap(), "forensics".to_string());
        let err = bucket.put_object("key.png", vec![0]).await.unwrap_err();

        match err {
            crate::error::Error::UnexpectedStatus { status, .. } => assert_eq!(status, 500),
            other => panic!("expected UnexpectedStatus, got {other}"),
        }
    }
}
