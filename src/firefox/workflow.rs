//! The submission state machine
//!
//! Drives one new-version submission through the developer hub: navigate,
//! log in, upload the build through the native file chooser, confirm,
//! declare and attach sources, write release notes, submit. Every step
//! boundary captures a diagnostic snapshot; any unresolved control fails the
//! run closed. The browser session is closed on every exit path, exactly
//! once, before the report is returned.

use crate::browser::wait::{self, PollConfig};
use crate::browser::UiDriver;
use crate::config::{ArtifactPaths, FirefoxConfig};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::firefox::selectors::{resolve_any, SelectorTable};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

/// Changelog line typed into the release-notes field
pub const RELEASE_NOTES: &str = "- Bug fixes and improvements";

/// States of one submission run, in order
///
/// `Failed` is reachable from any state; `Closed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Nothing has happened yet
    Idle,
    /// Browser session exists
    Launched,
    /// Submission URL loaded
    Navigated,
    /// Credentials being typed
    Authenticating,
    /// Waiting for the post-login page
    AuthenticatedWaiting,
    /// Build artifact going through the file chooser
    UploadingBuild,
    /// "Finish upload" clicked, server validating the package
    ConfirmingBuildUpload,
    /// Resolving and clicking the source-declaration control
    DeclaringSource,
    /// Source artifact going through the file chooser
    AttachingSource,
    /// Submitting the source form
    ConfirmingSourceSubmit,
    /// Typing and submitting release notes
    WritingReleaseNotes,
    /// All forms submitted
    Submitted,
    /// Session closed after success
    Closed,
    /// A required step could not complete
    Failed,
}

/// Fixed settles and polling bounds for one run
///
/// The settle values are the delays the target UI was tuned against; the
/// poll config bounds required-control resolution. Tests zero everything.
#[derive(Debug, Clone)]
pub struct WorkflowTiming {
    /// After loading the submission URL
    pub post_navigation: Duration,
    /// After submitting the login form
    pub post_login: Duration,
    /// After handing a file to the chooser
    pub post_upload: Duration,
    /// After each form submission
    pub post_submit: Duration,
    /// After clicking the source declaration
    pub post_declaration: Duration,
    /// Per-keystroke typing delay
    pub key_delay: Duration,
    /// Bounds for required-control polling
    pub poll: PollConfig,
}

impl Default for WorkflowTiming {
    fn default() -> Self {
        Self {
            post_navigation: Duration::from_secs(10),
            post_login: Duration::from_secs(15),
            post_upload: Duration::from_secs(15),
            post_submit: Duration::from_secs(15),
            post_declaration: Duration::from_secs(1),
            key_delay: Duration::from_millis(100),
            poll: PollConfig::default(),
        }
    }
}

impl WorkflowTiming {
    /// All-zero timing: no settles, no typing delay, single-pass polling
    pub const fn instant() -> Self {
        Self {
            post_navigation: Duration::ZERO,
            post_login: Duration::ZERO,
            post_upload: Duration::ZERO,
            post_submit: Duration::ZERO,
            post_declaration: Duration::ZERO,
            key_delay: Duration::ZERO,
            poll: PollConfig::single_pass(),
        }
    }
}

/// Outcome of one submission run
///
/// The workflow is all-or-nothing from the caller's perspective: `error`
/// holds the fatal failure when `final_state` is not [`WorkflowState::Closed`].
#[derive(Debug)]
pub struct SubmissionReport {
    /// Terminal state of the run
    pub final_state: WorkflowState,
    /// Snapshot files written during the run
    pub snapshots: Vec<PathBuf>,
    /// The fatal error, when the run failed
    pub error: Option<Error>,
}

/// One submission run over an exclusively owned browser session
pub struct SubmissionWorkflow<'a, D: UiDriver> {
    driver: &'a mut D,
    config: &'a FirefoxConfig,
    artifacts: &'a ArtifactPaths,
    selectors: &'a SelectorTable,
    diagnostics: &'a Diagnostics,
    timing: WorkflowTiming,
    state: WorkflowState,
    snapshots: Vec<PathBuf>,
}

impl<'a, D: UiDriver> SubmissionWorkflow<'a, D> {
    /// Assemble a run; the driver must already be launched
    pub fn new(
        driver: &'a mut D,
        config: &'a FirefoxConfig,
        artifacts: &'a ArtifactPaths,
        selectors: &'a SelectorTable,
        diagnostics: &'a Diagnostics,
        timing: WorkflowTiming,
    ) -> Self {
        Self {
            driver,
            config,
            artifacts,
            selectors,
            diagnostics,
            timing,
            state: WorkflowState::Idle,
            snapshots: Vec::new(),
        }
    }

    /// Run the submission to completion
    ///
    /// Never returns early with an open session: on the success path the
    /// session close is part of the contract, and on the failure path one
    /// forensic snapshot is attempted before the close.
    pub async fn run(mut self) -> SubmissionReport {
        self.state = WorkflowState::Launched;
        let outcome = self.drive().await;

        let mut error = outcome.err();
        if let Some(err) = &error {
            error!("submission failed in {:?}: {err}", self.state);
            self.state = WorkflowState::Failed;

            // Best-effort forensic capture; it must not mask the failure.
            match self.diagnostics.capture(&mut *self.driver).await {
                Ok(snapshot) => self.snapshots.push(snapshot.path),
                Err(capture_err) => warn!("forensic capture failed: {capture_err}"),
            }

            if let Err(close_err) = self.driver.close().await {
                warn!("failed to close browser session: {close_err}");
            }
        } else {
            match self.driver.close().await {
                Ok(()) => self.state = WorkflowState::Closed,
                Err(close_err) => error = Some(close_err),
            }
        }

        SubmissionReport {
            final_state: self.state,
            snapshots: self.snapshots,
            error,
        }
    }

    async fn drive(&mut self) -> Result<()> {
        let url = self.config.submission_url();

        self.enter(WorkflowState::Navigated);
        self.driver.goto(&url).await?;
        self.checkpoint().await?;
        wait::settle(self.timing.post_navigation).await;
        self.checkpoint().await?;

        self.enter(WorkflowState::Authenticating);
        self.driver
            .type_text(
                &self.selectors.email_input,
                &self.config.username,
                self.timing.key_delay,
            )
            .await?;
        self.driver
            .type_text(
                &self.selectors.password_input,
                &self.config.password,
                self.timing.key_delay,
            )
            .await?;
        // Submit the form directly; the button's geometry is not stable.
        self.driver.eval(&self.selectors.login_submit_script).await?;

        self.enter(WorkflowState::AuthenticatedWaiting);
        wait::settle(self.timing.post_login).await;
        info!("logged in");
        self.checkpoint().await?;

        self.enter(WorkflowState::UploadingBuild);
        self.driver
            .upload_file(&self.selectors.upload_trigger, &self.artifacts.build)
            .await?;
        wait::settle(self.timing.post_upload).await;

        self.enter(WorkflowState::ConfirmingBuildUpload);
        self.driver.click(&self.selectors.finish_upload).await?;
        self.checkpoint().await?;
        info!("confirmed build upload");
        // The server validates the package before the next page is usable.
        wait::settle(self.timing.post_submit).await;
        self.checkpoint().await?;

        self.enter(WorkflowState::DeclaringSource);
        let declared = resolve_any(
            &mut *self.driver,
            "source declaration",
            &self.selectors.source_declared,
            &self.timing.poll,
        )
        .await?;
        self.driver.click(&declared).await?;
        self.checkpoint().await?;
        wait::settle(self.timing.post_declaration).await;
        self.checkpoint().await?;

        self.enter(WorkflowState::AttachingSource);
        let source = self.artifacts.source.as_deref().ok_or_else(|| {
            Error::Config("no source archive configured for the Mozilla flow".to_string())
        })?;
        self.driver
            .upload_file(&self.selectors.source_file_input, source)
            .await?;
        self.checkpoint().await?;
        wait::settle(self.timing.post_upload).await;
        self.checkpoint().await?;

        self.enter(WorkflowState::ConfirmingSourceSubmit);
        self.driver.eval(&self.selectors.form_submit_script).await?;
        self.checkpoint().await?;
        wait::settle(self.timing.post_submit).await;
        self.checkpoint().await?;

        self.enter(WorkflowState::WritingReleaseNotes);
        self.driver
            .type_text(
                &self.selectors.release_notes_input,
                RELEASE_NOTES,
                self.timing.key_delay,
            )
            .await?;
        self.driver.eval(&self.selectors.form_submit_script).await?;
        self.checkpoint().await?;
        wait::settle(self.timing.post_submit).await;
        self.checkpoint().await?;

        self.enter(WorkflowState::Submitted);
        info!("version submitted");
        Ok(())
    }

    fn enter(&mut self, state: WorkflowState) {
        self.state = state;
        info!("entering {state:?}");
    }

    async fn checkpoint(&mut self) -> Result<()> {
        let snapshot = self.diagnostics.capture(&mut *self.driver).await?;
        self.snapshots.push(snapshot.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing_matches_tuned_delays() {
        let timing = WorkflowTiming::default();
        assert_eq!(timing.post_navigation, Duration::from_secs(10));
        assert_eq!(timing.post_login, Duration::from_secs(15));
        assert_eq!(timing.post_declaration, Duration::from_secs(1));
        assert_eq!(timing.key_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_instant_timing_is_all_zero() {
        let timing = WorkflowTiming::instant();
        assert_eq!(timing.post_login, Duration::ZERO);
        assert_eq!(timing.poll.timeout, Duration::ZERO);
    }
}
