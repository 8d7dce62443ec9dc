//! Per-store publish flows

use crate::cli::style::banner;
use async_trait::async_trait;
use webext_publish::browser::ChromiumDriver;
use webext_publish::chrome::{ChromeWebStoreClient, PublishProgress};
use webext_publish::config::Config;
use webext_publish::diagnostics::Diagnostics;
use webext_publish::error::Result;
use webext_publish::firefox::{SelectorTable, SubmissionWorkflow, WorkflowTiming};
use tracing::info;

/// Progress observer that prints the milestone banners
struct BannerProgress;

#[async_trait]
impl PublishProgress for BannerProgress {
    async fn on_uploaded(&self) {
        banner("Uploaded Chrome Version");
    }

    async fn on_published(&self) {
        banner("Published Chrome Version");
    }
}

/// Upload and publish the build to the Chrome Web Store
pub async fn run_chrome(config: &Config) -> Result<()> {
    let Some(chrome) = &config.chrome else {
        info!("Chrome Web Store not configured, skipping");
        return Ok(());
    };

    banner("Beginning Chrome");

    let client = ChromeWebStoreClient::new(chrome.clone());
    client
        .publish_new_version(&config.artifacts.build, &BannerProgress)
        .await?;

    banner("🎉 Upload to Chrome completed 🎉");
    Ok(())
}

/// Submit the build as a new version on addons.mozilla.org
pub async fn run_firefox(config: &Config) -> Result<()> {
    let Some(firefox) = &config.firefox else {
        info!("Mozilla flow not configured, skipping");
        return Ok(());
    };

    banner("Beginning Firefox");

    let selectors = SelectorTable::load(config.selectors_path.as_deref())?;
    let diagnostics = Diagnostics::new(&config.diagnostics, "firefox_screenshot.png");
    let mut driver = ChromiumDriver::launch().await?;

    let workflow = SubmissionWorkflow::new(
        &mut driver,
        firefox,
        &config.artifacts,
        &selectors,
        &diagnostics,
        WorkflowTiming::default(),
    );
    let report = workflow.run().await;

    info!(
        "run finished in {:?} with {} snapshots",
        report.final_state,
        report.snapshots.len()
    );
    if let Some(err) = report.error {
        return Err(err);
    }

    banner("🎉 Upload to Firefox completed 🎉");
    Ok(())
}
