//! webext-publish - publish a browser extension build to extension stores
//!
//! Two store flows, both driven entirely by environment configuration:
//!
//! - **Chrome Web Store**: a two-call REST sequence (token refresh, streamed
//!   upload, publish) in [`chrome`].
//! - **addons.mozilla.org**: a multi-step headless-browser form submission in
//!   [`firefox`], built on the [`browser`] driver seam with forensic
//!   screenshots from [`diagnostics`] at every step boundary.
//!
//! The flows run sequentially within one process; a fatal error in either
//! terminates the run with a non-zero exit status.

pub mod browser;
pub mod chrome;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod firefox;
