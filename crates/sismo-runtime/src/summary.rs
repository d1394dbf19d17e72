//! Machine-readable summary of the catalog aggregations.

use serde::Serialize;
use sismo_core::error::Result;
use sismo_core::models::{MagnitudeBand, SeismicRecord};
use sismo_data::aggregator::{AggregationBucket, BandBucket, CatalogAggregator};
use sismo_data::analysis::CatalogAnalysis;
use sismo_data::filter::RecordFilter;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub generated_at: String,
    pub rows_loaded: usize,
    pub unmeasured: usize,
    pub unrecognized_jurisdictions: Vec<String>,
    pub year_span: Option<(i32, i32)>,
    /// Measured records per year, only years present.
    pub by_year: Vec<AggregationBucket<i32>>,
    /// Measured records per calendar month.
    pub by_month: Vec<AggregationBucket<u32>>,
    /// Measured records per strong-motion band.
    pub by_band: Vec<BandBucket>,
}

impl CatalogSummary {
    pub fn from_analysis(analysis: &CatalogAnalysis) -> Self {
        let measured: Vec<&SeismicRecord> = RecordFilter::new().measured().apply(&analysis.records);
        let meta = &analysis.metadata;
        Self {
            generated_at: meta.generated_at.clone(),
            rows_loaded: meta.rows_loaded,
            unmeasured: meta.unmeasured,
            unrecognized_jurisdictions: meta.unrecognized_jurisdictions.clone(),
            year_span: meta.year_span,
            by_year: CatalogAggregator::count_by_year(measured.iter().copied()),
            by_month: CatalogAggregator::count_by_month(measured.iter().copied()),
            by_band: CatalogAggregator::count_by_band(
                measured.iter().copied(),
                &MagnitudeBand::strong_bands(),
            ),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
