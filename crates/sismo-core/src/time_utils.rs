use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

// ── Catalog timestamps ────────────────────────────────────────────────────────

/// Parse the catalog date column, optionally combined with a separate time
/// column.
///
/// * `date` may be a bare date (`2024-09-02`, `02/09/2024`) or a full
///   date-time (`2024-09-02 07:15:33`).
/// * `time`, when given and non-empty, overrides the time-of-day of a bare
///   date. A date without any time resolves to midnight.
///
/// Returns `None` when either part is unparseable.
pub fn parse_catalog_timestamp(date: &str, time: Option<&str>) -> Option<NaiveDateTime> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date, fmt) {
            return Some(dt);
        }
    }

    let day = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())?;

    match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => {
            let tod = parse_time_of_day(t)?;
            Some(day.and_time(tod))
        }
        None => day.and_hms_opt(0, 0, 0),
    }
}

fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let parsed = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok());
    if parsed.is_none() {
        debug!("could not parse time of day \"{}\"", s);
    }
    parsed
}

// ── Source-date annotations ───────────────────────────────────────────────────

/// Format a date the way chart footers cite their source: `dd/mm/yyyy`.
///
/// ```
/// use chrono::NaiveDate;
/// use sismo_core::time_utils::format_source_date;
///
/// let d = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
/// assert_eq!(format_source_date(d), "02/09/2024");
/// ```
pub fn format_source_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse a `dd/mm/yyyy` source date (also accepts ISO `yyyy-mm-dd`).
pub fn parse_source_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
