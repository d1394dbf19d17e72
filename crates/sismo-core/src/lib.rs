//! Shared model, formatting and configuration layer for the sismo charts.
//!
//! Holds the catalog record type, the jurisdiction and magnitude-band
//! reference tables, color helpers, timestamp parsing, the error type and the
//! command-line settings used by every other crate in the workspace.

pub mod color;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{Result, SismoError};
