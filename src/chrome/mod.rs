//! Chrome Web Store publishing over the items REST API

mod client;

pub use client::{ChromeWebStoreClient, PublishProgress, SilentProgress};
