//! # weft-bench
//!
//! The canonical cloth scenes, a runner that steps them frame by frame
//! while driving inspection hooks, and CSV/JSON export of the collected
//! metrics.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::{BenchmarkRunner, RunOutcome};
pub use scenarios::{Scenario, ScenarioKind};
