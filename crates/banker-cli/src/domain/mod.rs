//! Result types handed from the application layer to the presentation layer.
//!
//! These are plain data: no behaviour beyond construction, and every type
//! derives `Serialize` so `--format json` can emit it unchanged.

pub mod report;

pub use report::{DeadlockReport, SafetyReport, StrategyReport};
