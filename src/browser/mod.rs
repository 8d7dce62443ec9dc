//! Browser session layer
//!
//! The submission workflow talks to the page through the [`UiDriver`] trait;
//! [`ChromiumDriver`] is the production implementation on top of
//! chromiumoxide, and tests substitute a recording mock.

mod driver;
mod session;
pub mod wait;

pub use driver::UiDriver;
pub use session::ChromiumDriver;
