//! CLI flows
//!
//! Per-store flow implementations for the `webext-publish` binary.

mod publish;
pub mod style;

pub use publish::{run_chrome, run_firefox};
