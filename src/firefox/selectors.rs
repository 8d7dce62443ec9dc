//! Selector table and ordered-candidate resolution
//!
//! The target site renames and restructures its controls between releases.
//! Rather than detecting the site version, each logical control maps to an
//! ordered list of known-good selector variants; resolution probes them in
//! order and acts on the first that exists. The table is plain data so a new
//! site version can be accommodated with a JSON override instead of a code
//! change.

use crate::browser::UiDriver;
use crate::browser::wait::PollConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Selectors (and submit scripts) for every control the workflow touches
///
/// Single-string fields are controls that have been stable across site
/// versions; `source_declared` is the one control observed under several
/// DOM variants, listed newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorTable {
    /// Login email input
    pub email_input: String,
    /// Login password input
    pub password_input: String,
    /// Script submitting the login form directly
    pub login_submit_script: String,
    /// Control that opens the build-upload file chooser
    pub upload_trigger: String,
    /// "Finish upload" control after the build is validated
    pub finish_upload: String,
    /// Candidate selectors for "yes, source code is provided"
    pub source_declared: Vec<String>,
    /// File input for the source archive
    pub source_file_input: String,
    /// Script submitting the current page's form directly
    pub form_submit_script: String,
    /// Release-notes textarea
    pub release_notes_input: String,
}

impl Default for SelectorTable {
    fn default() -> Self {
        Self {
            email_input: "input[name='email']".to_string(),
            password_input: "#password".to_string(),
            login_submit_script: "document.getElementById('submit-btn').click()".to_string(),
            upload_trigger: "#upload-addon".to_string(),
            finish_upload: "#submit-upload-file-finish".to_string(),
            source_declared: vec![
                "#id_has_source>input".to_string(),
                "label[for='id_has_source_0']".to_string(),
                "#id_has_source_0".to_string(),
            ],
            source_file_input: "#id_source".to_string(),
            form_submit_script: "document.querySelector(\"button[type='submit']\").click()"
                .to_string(),
            release_notes_input: "#id_release_notes_0".to_string(),
        }
    }
}

impl SelectorTable {
    /// Load the table, applying a JSON override file when one is configured
    ///
    /// The override may be partial; unlisted controls keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                serde_json::from_str(&text).map_err(|e| {
                    Error::Config(format!("invalid selector table {}: {e}", path.display()))
                })
            }
        }
    }
}

/// Locate one logical control from an ordered candidate list
///
/// Probes candidates in listed order and returns the first that resolves;
/// later candidates are ignored even when also present. When no candidate
/// resolves, the page is re-polled with exponential backoff until the
/// configured timeout, then [`Error::ControlNotFound`] is returned - the
/// caller must treat that as fatal, because continuing would submit without
/// a required confirmation.
pub async fn resolve_any<D: UiDriver + ?Sized>(
    driver: &mut D,
    control: &str,
    candidates: &[String],
    poll: &PollConfig,
) -> Result<String> {
    let start = Instant::now();
    let mut interval = poll.initial_interval;

    loop {
        for candidate in candidates {
            if driver.probe(candidate).await? {
                debug!("control '{control}' resolved to '{candidate}'");
                return Ok(candidate.clone());
            }
        }

        if start.elapsed() >= poll.timeout {
            return Err(Error::ControlNotFound {
                control: control.to_string(),
                candidates: candidates.to_vec(),
            });
        }

        tokio::time::sleep(interval).await;
        interval = poll.next_interval(interval);
    }
}
