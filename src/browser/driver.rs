//! Driver trait between the workflow and the live page
//!
//! The trait deliberately exposes a small fixed set of interactions - the
//! workflow targets one specific multi-page form and nothing else.

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Page interactions the submission workflow needs
///
/// Every method maps to one observable browser effect. Implementations must
/// make [`close`](Self::close) idempotent: the workflow guarantees it is
/// called on every exit path, and a second call must not double-close.
#[async_trait]
pub trait UiDriver: Send {
    /// Navigate to a URL and wait for the load to finish
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Probe whether a selector currently resolves on the page
    ///
    /// A missing element is `Ok(false)`, not an error; only transport-level
    /// failures are errors.
    async fn probe(&mut self, selector: &str) -> Result<bool>;

    /// Click the element matching a selector
    async fn click(&mut self, selector: &str) -> Result<()>;

    /// Focus an input and type text with a per-keystroke delay
    ///
    /// The pacing emulates human input so trivially rate-checked forms do
    /// not reject the value.
    async fn type_text(&mut self, selector: &str, text: &str, key_delay: Duration) -> Result<()>;

    /// Evaluate a JavaScript expression in the page
    ///
    /// Used to invoke form submission directly instead of relying on the
    /// geometry of a submit button.
    async fn eval(&mut self, script: &str) -> Result<()>;

    /// Supply a file to the native chooser opened by clicking `trigger`
    ///
    /// The chooser interception must be armed before the triggering click;
    /// implementations issue both as one concurrent pair or the chooser
    /// event is missed.
    async fn upload_file(&mut self, trigger: &str, file: &Path) -> Result<()>;

    /// Capture a full-page PNG of the current state
    async fn screenshot(&mut self) -> Result<Vec<u8>>;

    /// Close the browser session; subsequent calls are no-ops
    async fn close(&mut self) -> Result<()>;
}
