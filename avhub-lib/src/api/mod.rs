//! Resource fetching
//!
//! Everything between the HTTP client and the table engine: list response
//! decoding, the [`RowSource`] seam, and the [`ResourceLoader`] that drops
//! results overtaken by a newer load. [`DashboardSummary`] is the home page
//! summary.

mod dashboard;
mod envelope;
mod generation;
mod loader;
mod source;

pub use dashboard::*;
pub use envelope::*;
pub use generation::*;
pub use loader::*;
pub use source::*;
