//! Catalog loading pipeline.
//!
//! Loads the CSV once, checks every derived jurisdiction against the known
//! codes and returns the records together with run metadata for the chart
//! jobs.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::Local;
use sismo_core::error::Result;
use sismo_core::models::SeismicRecord;
use tracing::{info, warn};

use crate::aggregator::observed_year_span;
use crate::reader::load_catalog;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the loaded catalog.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when the catalog was loaded.
    pub generated_at: String,
    /// Rows read from the CSV.
    pub rows_loaded: usize,
    /// Rows whose magnitude was not computable.
    pub unmeasured: usize,
    /// Distinct jurisdiction strings that are not a known code, sorted.
    pub unrecognized_jurisdictions: Vec<String>,
    /// First and last calendar year present, if any rows were loaded.
    pub year_span: Option<(i32, i32)>,
    /// Wall-clock seconds spent reading the CSV.
    pub load_time_seconds: f64,
}

/// The loaded catalog plus its [`AnalysisMetadata`].
#[derive(Debug, Clone)]
pub struct CatalogAnalysis {
    pub records: Vec<SeismicRecord>,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Load and validate the catalog at `path`.
///
/// Unknown jurisdictions are kept on the records (they simply never match a
/// jurisdiction filter) and logged once per distinct value.
pub fn analyze_catalog(path: &Path) -> Result<CatalogAnalysis> {
    let load_start = std::time::Instant::now();
    let records = load_catalog(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let unrecognized = unrecognized_jurisdictions(&records);
    for code in &unrecognized {
        warn!("Unrecognized jurisdiction \"{code}\" in catalog");
    }

    let metadata = AnalysisMetadata {
        generated_at: Local::now().to_rfc3339(),
        rows_loaded: records.len(),
        unmeasured: records.iter().filter(|r| !r.is_measured()).count(),
        unrecognized_jurisdictions: unrecognized.into_iter().collect(),
        year_span: observed_year_span(&records),
        load_time_seconds: load_time,
    };

    info!(
        "Catalog ready: {} rows, {} unmeasured, {:.2}s",
        metadata.rows_loaded, metadata.unmeasured, metadata.load_time_seconds
    );

    Ok(CatalogAnalysis { records, metadata })
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn unrecognized_jurisdictions(records: &[SeismicRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter(|r| r.jurisdiction_code().is_none())
        .map(|r| r.jurisdiction.clone())
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
