//! Chart layer for the sismo workspace.
//!
//! Turns aggregation output into renderer-ready series, draws them with
//! [`plotters`] onto fixed-size canvases themed per chart, and exports PNG
//! files, including the vertical composite of the monthly bar charts.

pub mod bar_chart;
pub mod choropleth;
pub mod circle_grid;
pub mod components;
pub mod composite;
pub mod export;
pub mod series;
pub mod strip_chart;
pub mod themes;

pub use sismo_core as core;
