//! Error types for webext-publish

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a publish run
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// Browser launch or interaction failed
    #[error("browser error: {0}")]
    Browser(String),

    /// Navigation to the target page failed
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// No candidate selector resolved for a required control
    #[error("control '{control}' not found; tried candidates {candidates:?}")]
    ControlNotFound {
        /// Logical name of the control that could not be located
        control: String,
        /// Candidate selectors probed, in order
        candidates: Vec<String>,
    },

    /// A dependency endpoint answered with a non-2xx status
    #[error("{endpoint} returned status {status}")]
    UnexpectedStatus {
        /// Which endpoint answered
        endpoint: String,
        /// The HTTP status code
        status: u16,
    },

    /// HTTP transport error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Endpoint URL construction failed
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Diagnostic snapshot could not be captured or persisted
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl Error {
    /// Wrap a browser-layer failure, preserving its message
    pub fn browser(err: impl std::fmt::Display) -> Self {
        Self::Browser(err.to_string())
    }

    /// Wrap a navigation failure, preserving its message
    pub fn navigation(err: impl std::fmt::Display) -> Self {
        Self::Navigation(err.to_string())
    }
}
