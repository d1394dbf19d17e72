//! CSV loading and normalisation for the SSN earthquake catalog.
//!
//! Reads the catalog export and converts each row into a [`SeismicRecord`].
//! The file is trusted: any unparseable required field aborts the whole load.

use std::io::Read;
use std::path::Path;

use sismo_core::error::{Result, SismoError};
use sismo_core::models::SeismicRecord;
use sismo_core::time_utils::parse_catalog_timestamp;
use tracing::debug;

/// Literal the catalog uses in place of a magnitude it could not compute.
pub const UNMEASURED_SENTINEL: &str = "no calculable";

/// Depth literal for very shallow events.
const SHALLOW_DEPTH_SENTINEL: &str = "menos de 1";

pub const COL_DATE: &str = "Fecha";
pub const COL_TIME: &str = "Hora";
pub const COL_LATITUDE: &str = "Latitud";
pub const COL_LONGITUDE: &str = "Longitud";
pub const COL_MAGNITUDE: &str = "Magnitud";
pub const COL_DEPTH: &str = "Profundidad";
pub const COL_LOCATION: &str = "Referencia de localizacion";

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the catalog at `path`.
///
/// Fails with [`SismoError::InputNotFound`] when the file does not exist and
/// with [`SismoError::MalformedInput`] on the first row that cannot be
/// normalised.
pub fn load_catalog(path: &Path) -> Result<Vec<SeismicRecord>> {
    if !path.exists() {
        return Err(SismoError::InputNotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|source| SismoError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_catalog(std::io::BufReader::new(file))?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse catalog rows from any reader. Records keep file order.
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<SeismicRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        let row = row?;
        records.push(columns.normalise(&row, i as u64 + 1)?);
    }

    Ok(records)
}

/// Derive the jurisdiction from a free-text location: the text after the
/// last comma, trimmed. A location without commas yields the whole text
/// trimmed.
///
/// ```
/// use sismo_data::reader::extract_jurisdiction;
///
/// assert_eq!(extract_jurisdiction("Some text, CDMX"), "CDMX");
/// assert_eq!(extract_jurisdiction("Some text,   JAL  "), "JAL");
/// ```
pub fn extract_jurisdiction(location: &str) -> String {
    location.rsplit(',').next().unwrap_or("").trim().to_string()
}

/// Interpret a magnitude cell. The sentinel yields `Ok(None)`; anything else
/// must be a non-negative float.
pub fn parse_magnitude(raw: &str) -> std::result::Result<Option<f64>, String> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case(UNMEASURED_SENTINEL) {
        return Ok(None);
    }
    let magnitude: f64 = value
        .parse()
        .map_err(|_| format!("expected a number or \"{UNMEASURED_SENTINEL}\", got \"{value}\""))?;
    if !magnitude.is_finite() || magnitude < 0.0 {
        return Err(format!("magnitude must be a non-negative number, got {value}"));
    }
    Ok(Some(magnitude))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the columns we read, resolved once from the header row.
struct ColumnIndex {
    date: usize,
    time: Option<usize>,
    latitude: usize,
    longitude: usize,
    magnitude: usize,
    depth: Option<usize>,
    location: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| SismoError::malformed(0, name, "required column is missing"))
        };

        Ok(Self {
            date: require(COL_DATE)?,
            time: find(COL_TIME),
            latitude: require(COL_LATITUDE)?,
            longitude: require(COL_LONGITUDE)?,
            magnitude: require(COL_MAGNITUDE)?,
            depth: find(COL_DEPTH),
            location: require(COL_LOCATION)?,
        })
    }

    fn normalise(&self, row: &csv::StringRecord, row_number: u64) -> Result<SeismicRecord> {
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let date_raw = field(self.date);
        let time_raw = self.time.map(field);
        let occurred_at = parse_catalog_timestamp(date_raw, time_raw).ok_or_else(|| {
            let shown = match time_raw {
                Some(t) if !t.trim().is_empty() => format!("{} {}", date_raw.trim(), t.trim()),
                _ => date_raw.trim().to_string(),
            };
            SismoError::malformed(row_number, COL_DATE, format!("unparseable timestamp \"{shown}\""))
        })?;

        let magnitude = parse_magnitude(field(self.magnitude))
            .map_err(|reason| SismoError::malformed(row_number, COL_MAGNITUDE, reason))?;

        let latitude = parse_coordinate(field(self.latitude), row_number, COL_LATITUDE)?;
        let longitude = parse_coordinate(field(self.longitude), row_number, COL_LONGITUDE)?;

        let depth_km = match self.depth {
            Some(idx) => parse_depth(field(idx), row_number)?,
            None => None,
        };

        let location_reference = field(self.location).to_string();
        let jurisdiction = extract_jurisdiction(&location_reference);

        Ok(SeismicRecord {
            occurred_at,
            latitude,
            longitude,
            magnitude,
            depth_km,
            location_reference,
            jurisdiction,
        })
    }
}

fn parse_coordinate(raw: &str, row: u64, column: &str) -> Result<f64> {
    let value = raw.trim();
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SismoError::malformed(row, column, format!("invalid coordinate \"{value}\"")))
}

fn parse_depth(raw: &str, row: u64) -> Result<Option<f64>> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.eq_ignore_ascii_case(SHALLOW_DEPTH_SENTINEL) {
        return Ok(Some(0.0));
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| SismoError::malformed(row, COL_DEPTH, format!("invalid depth \"{value}\"")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str =
        "Fecha,Hora,Magnitud,Latitud,Longitud,Profundidad,Referencia de localizacion";

    fn catalog(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    // ── extract_jurisdiction ──────────────────────────────────────────────────

    #[test]
    fn test_extract_jurisdiction_trims() {
        assert_eq!(extract_jurisdiction("Some text, CDMX"), "CDMX");
        assert_eq!(extract_jurisdiction("Some text,   JAL  "), "JAL");
    }

    #[test]
    fn test_extract_jurisdiction_uses_last_comma() {
        assert_eq!(
            extract_jurisdiction("25 km al SUR de PINOTEPA, NACIONAL, OAX"),
            "OAX"
        );
    }

    #[test]
    fn test_extract_jurisdiction_without_comma() {
        assert_eq!(extract_jurisdiction("  GOLFO DE CALIFORNIA "), "GOLFO DE CALIFORNIA");
    }

    // ── parse_magnitude ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_magnitude_sentinel() {
        assert_eq!(parse_magnitude("no calculable"), Ok(None));
        assert_eq!(parse_magnitude(" No Calculable "), Ok(None));
    }

    #[test]
    fn test_parse_magnitude_number() {
        assert_eq!(parse_magnitude("7.1"), Ok(Some(7.1)));
    }

    #[test]
    fn test_parse_magnitude_rejects_text_and_negative() {
        assert!(parse_magnitude("fuerte").is_err());
        assert!(parse_magnitude("-1.0").is_err());
        assert!(parse_magnitude("").is_err());
    }

    // ── read_catalog ──────────────────────────────────────────────────────────

    #[test]
    fn test_read_catalog_basic() {
        let csv = catalog(&[
            "2017-09-19,13:14:40,7.1,18.40,-98.72,57,\"12 km al NOROESTE de CHIAUTLA DE TAPIA, PUE\"",
            "2020-06-23,10:29:02,no calculable,15.80,-96.12,menos de 1,\"23 km al SUR de CRUCECITA, OAX\"",
        ]);
        let records = read_catalog(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year(), 2017);
        assert_eq!(records[0].magnitude, Some(7.1));
        assert_eq!(records[0].depth_km, Some(57.0));
        assert_eq!(records[0].jurisdiction, "PUE");
        assert!((records[0].longitude + 98.72).abs() < 1e-9);
        assert_eq!(records[1].magnitude, None);
        assert_eq!(records[1].depth_km, Some(0.0));
        assert_eq!(records[1].jurisdiction, "OAX");
    }

    #[test]
    fn test_read_catalog_minimal_columns() {
        let csv = "Fecha,Latitud,Longitud,Magnitud,Referencia de localizacion\n\
                   2021-09-07,16.82,-99.93,7.1,\"11 km al SURESTE de ACAPULCO, GRO\"\n";
        let records = read_catalog(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].occurred_at.format("%H:%M").to_string(), "00:00");
        assert_eq!(records[0].depth_km, None);
    }

    #[test]
    fn test_read_catalog_keeps_file_order() {
        let csv = catalog(&[
            "2021-01-02,00:00:00,4.0,1,1,10,\"a, GRO\"",
            "2020-01-01,00:00:00,5.0,1,1,10,\"b, OAX\"",
        ]);
        let records = read_catalog(csv.as_bytes()).unwrap();
        assert_eq!(records[0].jurisdiction, "GRO");
        assert_eq!(records[1].jurisdiction, "OAX");
    }

    #[test]
    fn test_read_catalog_bad_timestamp_is_malformed() {
        let csv = catalog(&[
            "2021-01-02,00:00:00,4.0,1,1,10,\"a, GRO\"",
            "mañana,00:00:00,4.0,1,1,10,\"b, GRO\"",
        ]);
        let err = read_catalog(csv.as_bytes()).unwrap_err();
        match err {
            SismoError::MalformedInput { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, COL_DATE);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_catalog_bad_magnitude_is_malformed() {
        let csv = catalog(&["2021-01-02,00:00:00,fuerte,1,1,10,\"a, GRO\""]);
        let err = read_catalog(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SismoError::MalformedInput { row: 1, ref field, .. } if field == COL_MAGNITUDE
        ));
    }

    #[test]
    fn test_read_catalog_bad_latitude_is_malformed() {
        let csv = catalog(&["2021-01-02,00:00:00,4.2,norte,1,10,\"a, GRO\""]);
        let err = read_catalog(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SismoError::MalformedInput { ref field, .. } if field == COL_LATITUDE
        ));
    }

    #[test]
    fn test_read_catalog_missing_required_column() {
        let csv = "Fecha,Latitud,Longitud,Referencia de localizacion\n2021-01-02,1,1,\"a, GRO\"\n";
        let err = read_catalog(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SismoError::MalformedInput { row: 0, ref field, .. } if field == COL_MAGNITUDE
        ));
    }

    #[test]
    fn test_read_catalog_header_only() {
        let records = read_catalog(catalog(&[]).as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    // ── load_catalog ──────────────────────────────────────────────────────────

    #[test]
    fn test_load_catalog_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "data.csv",
            &catalog(&["2022-09-19,13:05:09,7.7,18.24,-103.29,15,\"63 km al SUR de COALCOMAN, MICH\""]),
        );

        let records = load_catalog(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].jurisdiction, "MICH");
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, SismoError::InputNotFound(p) if p == path));
    }
}
