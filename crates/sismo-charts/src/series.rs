//! Renderer-ready series built from aggregation output.
//!
//! Nothing here draws; every function is a pure mapping from buckets and
//! records to labels, values and colors so the text of each chart can be
//! tested without rendering an image.

use serde::Serialize;
use sismo_core::color::{ColorScale, Rgb};
use sismo_core::formatting::{format_count, format_magnitude, month_abbreviation, pluralize_sismos};
use sismo_core::models::{JurisdictionColors, MagnitudeBand, SeismicRecord};
use sismo_data::aggregator::{AggregationBucket, BandBucket, MonthMagnitudes, YearTop};

// ── Monthly bars ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    /// `Ene.` … `Dic.`
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// Value printed above each bar, thousands separated.
    pub value_labels: Vec<String>,
    pub colors: Vec<Rgb>,
}

impl BarSeries {
    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

/// Bars for the 12 month buckets, colored on the Portland scale by value.
pub fn monthly_bars(buckets: &[AggregationBucket<u32>]) -> BarSeries {
    let values: Vec<u64> = buckets.iter().map(|b| b.count).collect();
    let min = values.iter().copied().min().unwrap_or(0) as f64;
    let max = values.iter().copied().max().unwrap_or(0) as f64;
    let scale = ColorScale::portland();

    BarSeries {
        labels: buckets
            .iter()
            .map(|b| month_abbreviation(b.key).to_string())
            .collect(),
        value_labels: values.iter().map(|&v| format_count(v)).collect(),
        colors: values.iter().map(|&v| scale.map(v as f64, min, max)).collect(),
        values,
    }
}

// ── Strip plot ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripColumn {
    /// `"{mes} ({count})"`
    pub label: String,
    pub magnitudes: Vec<f64>,
    pub color: Rgb,
}

/// Hue for `month` (1-based): 12 evenly spaced hues over `0..=360`,
/// January taking the last one.
pub fn month_hue(month: u32) -> f64 {
    let index = 12 - month.clamp(1, 12);
    index as f64 * 360.0 / 11.0
}

/// One strip column per month.
pub fn strip_columns(months: &[MonthMagnitudes]) -> Vec<StripColumn> {
    months
        .iter()
        .map(|m| StripColumn {
            label: format!(
                "{} ({})",
                month_abbreviation(m.month),
                m.magnitudes.len()
            ),
            magnitudes: m.magnitudes.clone(),
            color: Rgb::from_hsl(month_hue(m.month), 1.0, 0.75),
        })
        .collect()
}

// ── Circle grid ───────────────────────────────────────────────────────────────

/// How the day and month of a cell are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `dd/mm`
    Slash,
    /// `dd-mm`
    Dash,
}

impl DateStyle {
    fn format(self) -> &'static str {
        match self {
            DateStyle::Slash => "%d/%m",
            DateStyle::Dash => "%d-%m",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub magnitude: String,
    /// Drawn bold.
    pub jurisdiction: String,
    pub date: String,
    /// `None` when the jurisdiction is not a known code.
    pub color: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub label: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleGrid {
    /// First year first; renderers place it at the bottom.
    pub rows: Vec<GridRow>,
    pub columns: usize,
    /// Cells whose jurisdiction had no color.
    pub uncolored: usize,
}

/// One row per year, one cell per top record.
pub fn circle_grid(
    tops: &[YearTop],
    columns: usize,
    colors: &JurisdictionColors,
    date_style: DateStyle,
) -> CircleGrid {
    let mut uncolored = 0;
    let rows = tops
        .iter()
        .map(|top| GridRow {
            label: top.year.to_string(),
            cells: top
                .records
                .iter()
                .map(|record| {
                    let color = colors.lookup(&record.jurisdiction);
                    if color.is_none() {
                        uncolored += 1;
                    }
                    GridCell {
                        magnitude: record.magnitude.map(format_magnitude).unwrap_or_default(),
                        jurisdiction: record.jurisdiction.clone(),
                        date: record.occurred_at.format(date_style.format()).to_string(),
                        color,
                    }
                })
                .collect(),
        })
        .collect();

    CircleGrid {
        rows,
        columns,
        uncolored,
    }
}

// ── Map ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    pub longitude: f64,
    pub latitude: f64,
    /// Marker diameter in px.
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    /// `"{label} ({n} sismos)"`
    pub legend: String,
    pub color: Rgb,
    pub points: Vec<MapPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSeries {
    pub layers: Vec<MapLayer>,
    pub year_heading: String,
    /// `"{year}: {n} sismo(s)"`, ascending.
    pub year_lines: Vec<String>,
    /// `"{n} registros totales"`
    pub subtitle: String,
}

pub const MARKER_SCALE: f64 = 4.0;
pub const YEAR_HEADING: &str = "Registros por año";

/// Point layers per band plus the per-year annotation.
///
/// `band_counts` must be the counts for `bands` over the same `records`.
pub fn map_series(
    records: &[&SeismicRecord],
    band_counts: &[BandBucket],
    per_year: &[AggregationBucket<i32>],
) -> MapSeries {
    let layers = band_counts
        .iter()
        .map(|bucket| MapLayer {
            legend: legend_entry(&bucket.band, bucket.count),
            color: bucket.band.color,
            points: records
                .iter()
                .filter_map(|r| {
                    let m = r.magnitude?;
                    bucket.band.contains(m).then_some(MapPoint {
                        longitude: r.longitude,
                        latitude: r.latitude,
                        size: m * MARKER_SCALE,
                    })
                })
                .collect(),
        })
        .collect();

    MapSeries {
        layers,
        year_heading: YEAR_HEADING.to_string(),
        year_lines: per_year
            .iter()
            .map(|b| format!("{}: {}", b.key, pluralize_sismos(b.count)))
            .collect(),
        subtitle: format!("{} registros totales", records.len()),
    }
}

fn legend_entry(band: &MagnitudeBand, count: u64) -> String {
    format!("{} ({})", band.label, pluralize_sismos(count))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
