//! Data layer for the sismo charts.
//!
//! Responsible for reading the SSN catalog CSV, selecting records, grouping
//! them by year, month and magnitude band, loading region boundaries and
//! running the top-level loading pipeline.

pub mod aggregator;
pub mod analysis;
pub mod boundaries;
pub mod filter;
pub mod reader;

pub use sismo_core as core;
