//! Process configuration
//!
//! Everything is read from the environment exactly once at startup and held
//! in an immutable [`Config`] that is passed by reference into each flow.
//! There are no ambient lookups after construction and no reloading.

use crate::error::{Error, Result};
use std::path::PathBuf;
use url::Url;

/// Base URL for the addons.mozilla.org developer hub
const AMO_BASE: &str = "https://addons.mozilla.org";

/// Resolved filesystem locations for the artifacts to publish
///
/// Paths are derived by raw concatenation of `INPUT_SRC_DIR` with the
/// archive names, so the directory value is expected to carry its trailing
/// separator (the upstream CI convention).
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    /// The packaged extension (`INPUT_SRC_DIR` + `INPUT_ZIP_NAME`)
    pub build: PathBuf,
    /// The source archive, when configured
    /// (`INPUT_SRC_DIR` + `INPUT_ZIP_SRC_NAME`)
    pub source: Option<PathBuf>,
}

/// Chrome Web Store credentials and target item
#[derive(Debug, Clone)]
pub struct ChromeConfig {
    /// Web Store item ID to upload into
    pub store_id: String,
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Long-lived refresh token
    pub refresh_token: String,
}

/// addons.mozilla.org account and target add-on
#[derive(Debug, Clone)]
pub struct FirefoxConfig {
    /// Add-on slug or ID in the developer hub
    pub addon_id: String,
    /// Developer account email
    pub username: String,
    /// Developer account password
    pub password: String,
}

impl FirefoxConfig {
    /// URL of the new-version submission form for this add-on
    pub fn submission_url(&self) -> String {
        format!(
            "{AMO_BASE}/en-US/developers/addon/{}/versions/submit/",
            self.addon_id
        )
    }
}

/// Remote object-store target for diagnostic snapshots
#[derive(Debug, Clone)]
pub struct BucketConfig {
    /// Object-store endpoint (scheme + host)
    pub endpoint: Url,
    /// Bucket name
    pub bucket: String,
}

/// Where diagnostic snapshots go
#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    /// Local directory for screenshot files
    pub dir: PathBuf,
    /// Optional remote bucket for best-effort publication
    pub bucket: Option<BucketConfig>,
}

/// Complete process configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Artifact locations
    pub artifacts: ArtifactPaths,
    /// Chrome Web Store flow, present iff all four Chrome values are set
    pub chrome: Option<ChromeConfig>,
    /// Mozilla flow, present iff all three Mozilla values are set
    pub firefox: Option<FirefoxConfig>,
    /// Diagnostic snapshot destinations
    pub diagnostics: DiagnosticsConfig,
    /// Optional JSON file overriding the built-in selector table
    pub selectors_path: Option<PathBuf>,
}

impl Config {
    /// Build configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// The closure seam keeps construction testable without mutating the
    /// process environment. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| Error::Config(format!("you must set `{key}` as an input")))
        };

        let src_dir = require("INPUT_SRC_DIR")?;
        let zip_name = require("INPUT_ZIP_NAME")?;

        let artifacts = ArtifactPaths {
            build: PathBuf::from(format!("{src_dir}{zip_name}")),
            source: get("INPUT_ZIP_SRC_NAME").map(|name| PathBuf::from(format!("{src_dir}{name}"))),
        };

        let chrome = match (
            get("INPUT_CHROME_STORE_ID"),
            get("CHROME_CLIENT_ID"),
            get("CHROME_CLIENT_SECRET"),
            get("CHROME_REFRESH_TOKEN"),
        ) {
            (Some(store_id), Some(client_id), Some(client_secret), Some(refresh_token)) => {
                Some(ChromeConfig {
                    store_id,
                    client_id,
                    client_secret,
                    refresh_token,
                })
            }
            _ => None,
        };

        let firefox = match (
            get("INPUT_MOZILLA_ADDON_ID"),
            get("MOZILLA_USERNAME"),
            get("MOZILLA_PASSWORD"),
        ) {
            (Some(addon_id), Some(username), Some(password)) => Some(FirefoxConfig {
                addon_id,
                username,
                password,
            }),
            _ => None,
        };

        // The Mozilla flow cannot skip the source-attachment step, so a
        // missing source archive is a config error, not a runtime one.
        if firefox.is_some() && artifacts.source.is_none() {
            return Err(Error::Config(
                "you must set `INPUT_ZIP_SRC_NAME` as an input when the Mozilla flow is configured"
                    .to_string(),
            ));
        }

        let bucket = match (get("SCREENSHOT_BUCKET_URL"), get("SCREENSHOT_BUCKET")) {
            (Some(endpoint), Some(bucket)) => Some(BucketConfig {
                endpoint: Url::parse(&endpoint)
                    .map_err(|e| Error::Config(format!("invalid SCREENSHOT_BUCKET_URL: {e}")))?,
                bucket,
            }),
            _ => None,
        };

        let diagnostics = DiagnosticsConfig {
            dir: get("SCREENSHOT_DIR").map_or_else(|| PathBuf::from("screenshots"), PathBuf::from),
            bucket,
        };

        Ok(Self {
            artifacts,
            chrome,
            firefox,
            diagnostics,
            selectors_path: get("FIREFOX_SELECTORS_PATH").map(PathBuf::from),
        })
    }
}
