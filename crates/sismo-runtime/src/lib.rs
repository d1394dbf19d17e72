//! Runtime orchestration layer for the sismo charts.
//!
//! Defines the chart jobs, runs them sequentially over a catalog loaded once
//! per invocation, and builds the JSON summary of the aggregations.

pub mod jobs;
pub mod orchestrator;
pub mod summary;

pub use sismo_core as core;
pub use sismo_data as data;
