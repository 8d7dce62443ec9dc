//! Diagnostic snapshots
//!
//! Screenshots are the primary forensic artifact for UI-driven failures:
//! they are written to local disk at every step boundary and optionally
//! mirrored to a remote bucket for offline inspection. Nothing in the main
//! control flow ever reads them back.

mod snapshot;
mod store;

pub use snapshot::{Diagnostics, Snapshot, snapshot_name};
pub use store::HttpBucket;
