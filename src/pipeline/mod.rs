//! Pipeline entry points.
//!
//! - `aggregate`: Query sources and reduce records to the final list
//! - `run_pipeline`: Full collect, snapshot, notify sequence

pub mod aggregate;
pub mod run;

pub use aggregate::aggregate;
pub use run::run_pipeline;
