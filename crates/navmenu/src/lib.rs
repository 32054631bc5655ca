pub mod menu;
pub mod reconcile;

pub use menu::{bucket, default_ranges, sort_summaries};
pub use reconcile::{reconcile, Reconciliation};
