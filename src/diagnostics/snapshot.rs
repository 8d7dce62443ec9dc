//! Snapshot capture and persistence

use crate::browser::UiDriver;
use crate::config::DiagnosticsConfig;
use crate::diagnostics::HttpBucket;
use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use tracing::{info, warn};

/// A captured screenshot on local disk
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Timestamp-derived file name
    pub name: String,
    /// Where the image was written
    pub path: PathBuf,
}

/// File name for a snapshot taken at `now`, local time to the second
pub fn snapshot_name(now: NaiveDateTime) -> String {
    format!("{}_screenshot.png", now.format("%Y_%m_%d_%H_%M_%S"))
}

/// Snapshot destinations for one run
///
/// Local persistence is part of the capture contract; remote publication is
/// best-effort and can never fail the caller.
pub struct Diagnostics {
    dir: PathBuf,
    artifact_label: String,
    sink: Option<HttpBucket>,
}

impl Diagnostics {
    /// Build destinations from config; `artifact_label` keys remote objects
    /// back to the build being published
    pub fn new(config: &DiagnosticsConfig, artifact_label: impl Into<String>) -> Self {
        let sink = config
            .bucket
            .as_ref()
            .map(|b| HttpBucket::new(b.endpoint.clone(), b.bucket.clone()));
        Self {
            dir: config.dir.clone(),
            artifact_label: artifact_label.into(),
            sink,
        }
    }

    /// Capture the current browser state
    ///
    /// Writes the full-page image under the snapshot dir, then publishes it
    /// to the remote bucket when one is configured. The publish leg is
    /// awaited but its failure is logged only.
    pub async fn capture<D: UiDriver + ?Sized>(&self, driver: &mut D) -> Result<Snapshot> {
        let bytes = driver.screenshot().await?;
        let name = snapshot_name(Local::now().naive_local());

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(&name);
        tokio::fs::write(&path, &bytes).await?;
        info!("wrote diagnostic snapshot {}", path.display());

        if let Some(sink) = &self.sink {
            let key = format!("{name}/{}", self.artifact_label);
            if let Err(err) = sink.put_object(&key, bytes).await {
                warn!("failed to publish snapshot {name}: {err}");
            }
        }

        Ok(Snapshot { name, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BucketConfig;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::path::Path;
    use std::time::Duration;
    use url::Url;

    struct OnePixelPage;

    #[async_trait]
    impl UiDriver for OnePixelPage {
        async fn goto(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }
        async fn probe(&mut self, _selector: &str) -> Result<bool> {
            Ok(false)
        }
        async fn click(&mut self, _selector: &str) -> Result<()> {
            Ok(())
        }
        async fn type_text(&mut self, _s: &str, _t: &str, _d: Duration) -> Result<()> {
            Ok(())
        }
        async fn eval(&mut self, _script: &str) -> Result<()> {
            Ok(())
        }
        async fn upload_file(&mut self, _t: &str, _f: &Path) -> Result<()> {
            Ok(())
        }
        async fn screenshot(&mut self) -> Result<Vec<u8>> {
            Ok(vec![0x89, 0x50, 0x4e, 0x47])
        }
        async fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_snapshot_name_is_zero_padded_to_the_second() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(3, 9, 7)
            .unwrap();
        assert_eq!(snapshot_name(ts), "2024_01_05_03_09_07_screenshot.png");
    }

    #[tokio::test]
    async fn test_capture_writes_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = DiagnosticsConfig {
            dir: dir.path().join("shots"),
            bucket: None,
        };
        let diagnostics = Diagnostics::new(&config, "ext.zip");

        let snapshot = diagnostics.capture(&mut OnePixelPage).await.unwrap();
        assert!(snapshot.path.exists());
        assert!(snapshot.name.ends_with("_screenshot.png"));
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_fail_capture() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", mockito::Matcher::Regex("^/forensics/.*$".to_string()))
            .with_status(500)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = DiagnosticsConfig {
            dir: dir.path().to_path_buf(),
            bucket: Some(BucketConfig {
                endpoint: Url::parse(&server.url()).unwrap(),
                bucket: "forensics".to_string(),
            }),
        };
        let diagnostics = Diagnostics::new(&config, "ext.zip");

        // The sink answered 500, but capture still succeeds.
        let snapshot = diagnostics.capture(&mut OnePixelPage).await.unwrap();
        assert!(snapshot.path.exists());
        mock.assert_async().await;
    }
}
