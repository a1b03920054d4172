//! Run summary types and helpers.

mod result;
mod run_summary;

pub use result::RunOutcome;
pub use run_summary::RunSummary;
