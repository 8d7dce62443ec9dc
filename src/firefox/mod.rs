//! addons.mozilla.org submission
//!
//! The UI-driven store: a multi-page form flow with no public API, automated
//! as a linear state machine over the [`crate::browser::UiDriver`] seam.
//! Selector variants across site versions live in [`SelectorTable`].

mod selectors;
mod workflow;

pub use selectors::{SelectorTable, resolve_any};
pub use workflow::{
    RELEASE_NOTES, SubmissionReport, SubmissionWorkflow, WorkflowState, WorkflowTiming,
};
