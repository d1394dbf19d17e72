//! Record selection shared by every chart job.

use sismo_core::models::{Jurisdiction, SeismicRecord};

/// A conjunction of optional record predicates.
///
/// Any magnitude constraint implies that the record must have a measured
/// magnitude. Jurisdiction matching is exact against the catalog code, so
/// records whose derived jurisdiction is not a known code never match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    /// Inclusive lower magnitude bound.
    pub min_magnitude: Option<f64>,
    /// Exclusive upper magnitude bound.
    pub max_magnitude: Option<f64>,
    pub jurisdiction: Option<Jurisdiction>,
    pub measured_only: bool,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measured(mut self) -> Self {
        self.measured_only = true;
        self
    }

    pub fn from_year(mut self, year: i32) -> Self {
        self.first_year = Some(year);
        self
    }

    pub fn years(mut self, first: i32, last: i32) -> Self {
        self.first_year = Some(first);
        self.last_year = Some(last);
        self
    }

    pub fn min_magnitude(mut self, min: f64) -> Self {
        self.min_magnitude = Some(min);
        self
    }

    /// Half-open magnitude range `[min, max)`.
    pub fn magnitude_range(mut self, min: f64, max: f64) -> Self {
        self.min_magnitude = Some(min);
        self.max_magnitude = Some(max);
        self
    }

    pub fn in_jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.jurisdiction = Some(jurisdiction);
        self
    }

    pub fn matches(&self, record: &SeismicRecord) -> bool {
        let year = record.year();
        if self.first_year.is_some_and(|first| year < first) {
            return false;
        }
        if self.last_year.is_some_and(|last| year > last) {
            return false;
        }

        let needs_magnitude =
            self.measured_only || self.min_magnitude.is_some() || self.max_magnitude.is_some();
        match record.magnitude {
            None if needs_magnitude => return false,
            Some(m) => {
                if self.min_magnitude.is_some_and(|min| m < min) {
                    return false;
                }
                if self.max_magnitude.is_some_and(|max| m >= max) {
                    return false;
                }
            }
            None => {}
        }

        match self.jurisdiction {
            Some(wanted) => record.jurisdiction == wanted.code(),
            None => true,
        }
    }

    /// Matching records in input order.
    pub fn apply<'a>(&self, records: &'a [SeismicRecord]) -> Vec<&'a SeismicRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
