// Template Store: the shared phrase catalogue read by the report composer and
// grown only by the approval merger.

pub mod handlers;
pub mod merge;
pub mod models;
pub mod versioned;

pub use merge::MergeOutcome;
pub use models::{LookEntry, OverallEntry, TemplateStore, DEFAULT_SUB};
pub use versioned::{compare_and_swap, fetch_store, SwapOutcome};
