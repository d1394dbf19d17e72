//! Catalog aggregation by year, month, magnitude band and top-N per year.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use sismo_core::formatting::percentage;
use sismo_core::models::{MagnitudeBand, SeismicRecord};

use crate::boundaries::BoundarySet;

/// Band shares are kept to two decimals.
const BAND_PERCENT_DECIMALS: u32 = 2;

// ── Bucket types ──────────────────────────────────────────────────────────────

/// Count of records sharing one key (a year, a month, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationBucket<K> {
    pub key: K,
    pub count: u64,
}

impl<K> AggregationBucket<K> {
    fn new(key: K, count: u64) -> Self {
        Self { key, count }
    }
}

/// Records falling in one magnitude band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandBucket {
    pub band: MagnitudeBand,
    pub count: u64,
    /// Share of all banded records, `0.0..=100.0`, unrounded.
    pub percentage: f64,
}

/// The highest-magnitude records of one calendar year, strongest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTop {
    pub year: i32,
    pub records: Vec<SeismicRecord>,
}

/// Every measured magnitude observed in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthMagnitudes {
    /// `1..=12`.
    pub month: u32,
    pub magnitudes: Vec<f64>,
}

/// Constant weight assigned to a boundary polygon so it renders as an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionWeight {
    pub code: String,
    pub weight: u32,
}

// ── CatalogAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that groups catalog records.
pub struct CatalogAggregator;

impl CatalogAggregator {
    /// Records per calendar year, only years that have records, ascending.
    pub fn count_by_year<'a>(
        records: impl IntoIterator<Item = &'a SeismicRecord>,
    ) -> Vec<AggregationBucket<i32>> {
        let mut map: BTreeMap<i32, u64> = BTreeMap::new();
        for record in records {
            *map.entry(record.year()).or_default() += 1;
        }
        map.into_iter()
            .map(|(year, count)| AggregationBucket::new(year, count))
            .collect()
    }

    /// Records per calendar year over `first..=last`, zero-filled.
    /// Records outside the range are ignored.
    pub fn count_by_year_dense<'a>(
        records: impl IntoIterator<Item = &'a SeismicRecord>,
        first: i32,
        last: i32,
    ) -> Vec<AggregationBucket<i32>> {
        let sparse: BTreeMap<i32, u64> = Self::count_by_year(records)
            .into_iter()
            .map(|b| (b.key, b.count))
            .collect();
        (first..=last)
            .map(|year| AggregationBucket::new(year, sparse.get(&year).copied().unwrap_or(0)))
            .collect()
    }

    /// Records per calendar year from the first to the last observed year,
    /// zero-filling gaps in between. Empty input yields no buckets.
    pub fn count_by_year_dense_observed<'a>(
        records: impl IntoIterator<Item = &'a SeismicRecord>,
    ) -> Vec<AggregationBucket<i32>> {
        let records: Vec<&SeismicRecord> = records.into_iter().collect();
        match observed_year_span(records.iter().copied()) {
            Some((first, last)) => Self::count_by_year_dense(records, first, last),
            None => Vec::new(),
        }
    }

    /// Records per calendar month. Always 12 buckets, January first.
    pub fn count_by_month<'a>(
        records: impl IntoIterator<Item = &'a SeismicRecord>,
    ) -> Vec<AggregationBucket<u32>> {
        let mut counts = [0u64; 12];
        for record in records {
            counts[(record.month() - 1) as usize] += 1;
        }
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| AggregationBucket::new(i as u32 + 1, count))
            .collect()
    }

    /// Measured magnitudes per calendar month, 12 entries, input order kept.
    pub fn magnitudes_by_month<'a>(
        records: impl IntoIterator<Item = &'a SeismicRecord>,
    ) -> Vec<MonthMagnitudes> {
        let mut months: Vec<MonthMagnitudes> = (1..=12)
            .map(|month| MonthMagnitudes {
                month,
                magnitudes: Vec::new(),
            })
            .collect();
        for record in records {
            if let Some(m) = record.magnitude {
                months[(record.month() - 1) as usize].magnitudes.push(m);
            }
        }
        months
    }

    /// Count and share of measured records per band.
    ///
    /// Percentages are relative to the records that fell in some band, so
    /// they sum to 100 unless no record matched, in which case all are 0.
    pub fn count_by_band<'a>(
        records: impl IntoIterator<Item = &'a SeismicRecord>,
        bands: &[MagnitudeBand],
    ) -> Vec<BandBucket> {
        let mut counts = vec![0u64; bands.len()];
        for magnitude in records.into_iter().filter_map(|r| r.magnitude) {
            if let Some(idx) = bands.iter().position(|b| b.contains(magnitude)) {
                counts[idx] += 1;
            }
        }

        let total: u64 = counts.iter().sum();
        bands
            .iter()
            .zip(counts)
            .map(|(band, count)| BandBucket {
                band: band.clone(),
                count,
                percentage: percentage(count, total, BAND_PERCENT_DECIMALS),
            })
            .collect()
    }

    /// The `n` strongest measured records of every year in `first..=last`.
    ///
    /// Ties keep input order. Years with fewer than `n` records return what
    /// they have; years with none return an empty list.
    pub fn top_n_per_year<'a>(
        records: impl IntoIterator<Item = &'a SeismicRecord>,
        first: i32,
        last: i32,
        n: usize,
    ) -> Vec<YearTop> {
        let mut by_year: BTreeMap<i32, Vec<&SeismicRecord>> = BTreeMap::new();
        for record in records {
            if record.magnitude.is_some() && (first..=last).contains(&record.year()) {
                by_year.entry(record.year()).or_default().push(record);
            }
        }

        (first..=last)
            .map(|year| {
                let mut year_records = by_year.remove(&year).unwrap_or_default();
                year_records.sort_by(|a, b| descending_magnitude(a, b));
                YearTop {
                    year,
                    records: year_records.into_iter().take(n).cloned().collect(),
                }
            })
            .collect()
    }

    /// Weight 1 for every boundary polygon, independent of the catalog.
    pub fn geo_presence(boundaries: &BoundarySet) -> Vec<RegionWeight> {
        boundaries
            .iter()
            .map(|b| RegionWeight {
                code: b.code.clone(),
                weight: 1,
            })
            .collect()
    }
}

/// `(first_year, last_year)` of the records, or `None` when empty.
pub fn observed_year_span<'a>(
    records: impl IntoIterator<Item = &'a SeismicRecord>,
) -> Option<(i32, i32)> {
    records.into_iter().fold(None, |span, record| {
        let year = record.year();
        Some(match span {
            None => (year, year),
            Some((lo, hi)) => (lo.min(year), hi.max(year)),
        })
    })
}

fn descending_magnitude(a: &SeismicRecord, b: &SeismicRecord) -> Ordering {
    let a = a.magnitude.unwrap_or(f64::NEG_INFINITY);
    let b = b.magnitude.unwrap_or(f64::NEG_INFINITY);
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
