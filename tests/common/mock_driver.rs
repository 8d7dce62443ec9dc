//! Mock browser driver for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use webext_publish::browser::UiDriver;
use webext_publish::error::{Error, Result};

/// One recorded driver operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Goto(String),
    Probe(String),
    Click(String),
    TypeText { selector: String, text: String },
    Eval(String),
    UploadFile { trigger: String, file: PathBuf },
    Screenshot,
    Close,
}

/// Simple mock driver for workflow testing
///
/// This manually implements `UiDriver` rather than using a mocking crate,
/// so call ordering can be asserted against the full operation log.
///
/// Features:
/// - Full ordered call log for verification
/// - Configurable probe responses per selector
/// - Error injection per operation kind
/// - Close counting for session-lifecycle assertions
pub struct MockDriver {
    ops: Vec<Op>,
    present: HashSet<String>,
    error_on_goto: Option<String>,
    error_on_click: Option<String>,
    error_on_upload: Option<String>,
    error_on_close: Option<String>,
    close_calls: usize,
}

impl MockDriver {
    /// Create a mock where every probed selector is present
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            present: HashSet::new(),
            error_on_goto: None,
            error_on_click: None,
            error_on_upload: None,
            error_on_close: None,
            close_calls: 0,
        }
    }

    /// Mark a selector as present for `probe`
    pub fn with_present(mut self, selector: &str) -> Self {
        self.present.insert(selector.to_string());
        self
    }

    // === Error injection methods ===

    /// Make `goto` return a navigation error
    pub fn fail_goto(mut self, msg: &str) -> Self {
        self.error_on_goto = Some(msg.to_string());
        self
    }

    /// Make `click` return a browser error
    pub fn fail_click(mut self, msg: &str) -> Self {
        self.error_on_click = Some(msg.to_string());
        self
    }

    /// Make `upload_file` return a browser error
    pub fn fail_upload(mut self, msg: &str) -> Self {
        self.error_on_upload = Some(msg.to_string());
        self
    }

    /// Make `close` return a browser error
    pub fn fail_close(mut self, msg: &str) -> Self {
        self.error_on_close = Some(msg.to_string());
        self
    }

    // === Call verification methods ===

    /// The full ordered operation log
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// How many times `close` was called
    pub fn close_calls(&self) -> usize {
        self.close_calls
    }

    /// Position of the first matching operation in the log
    pub fn position(&self, op: &Op) -> Option<usize> {
        self.ops.iter().position(|o| o == op)
    }

    /// Assert one operation happened before another
    pub fn assert_order(&self, earlier: &Op, later: &Op) {
        let a = self
            .position(earlier)
            .unwrap_or_else(|| panic!("expected {earlier:?} in log: {:?}", self.ops));
        let b = self
            .position(later)
            .unwrap_or_else(|| panic!("expected {later:?} in log: {:?}", self.ops));
        assert!(a < b, "expected {earlier:?} before {later:?}: {:?}", self.ops);
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UiDriver for MockDriver {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.ops.push(Op::Goto(url.to_string()));
        if let Some(msg) = &self.error_on_goto {
            return Err(Error::Navigation(msg.clone()));
        }
        Ok(())
    }

    async fn probe(&mut self, selector: &str) -> Result<bool> {
        self.ops.push(Op::Probe(selector.to_string()));
        Ok(self.present.contains(selector))
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        self.ops.push(Op::Click(selector.to_string()));
        if let Some(msg) = &self.error_on_click {
            return Err(Error::Browser(msg.clone()));
        }
        Ok(())
    }

    async fn type_text(&mut self, selector: &str, text: &str, _key_delay: Duration) -> Result<()> {
        self.ops.push(Op::TypeText {
            selector: selector.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn eval(&mut self, script: &str) -> Result<()> {
        self.ops.push(Op::Eval(script.to_string()));
        Ok(())
    }

    async fn upload_file(&mut self, trigger: &str, file: &Path) -> Result<()> {
        self.ops.push(Op::UploadFile {
            trigger: trigger.to_string(),
            file: file.to_path_buf(),
        });
        if let Some(msg) = &self.error_on_upload {
            return Err(Error::Browser(msg.clone()));
        }
        Ok(())
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>> {
        self.ops.push(Op::Screenshot);
        // Smallest possible payload; the workflow only moves the bytes.
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn close(&mut self) -> Result<()> {
        self.ops.push(Op::Close);
        self.close_calls += 1;
        if let Some(msg) = &self.error_on_close {
            return Err(Error::Browser(msg.clone()));
        }
        Ok(())
    }
}
