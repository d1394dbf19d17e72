use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// One row of the seismic catalog after normalisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicRecord {
    /// Local date and time of the event as published by the catalog.
    pub occurred_at: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    /// `None` when the catalog marks the magnitude as not computable.
    pub magnitude: Option<f64>,
    /// Depth in kilometres, when the catalog carries one.
    #[serde(default)]
    pub depth_km: Option<f64>,
    /// Free-text location, e.g. `"12 km al SUR de CD HIDALGO, CHIS"`.
    pub location_reference: String,
    /// Trimmed text after the last comma of `location_reference`.
    pub jurisdiction: String,
}

impl SeismicRecord {
    pub fn year(&self) -> i32 {
        self.occurred_at.year()
    }

    /// Calendar month, `1..=12`.
    pub fn month(&self) -> u32 {
        self.occurred_at.month()
    }

    pub fn is_measured(&self) -> bool {
        self.magnitude.is_some()
    }

    /// The derived jurisdiction parsed as a known code, if it is one.
    pub fn jurisdiction_code(&self) -> Option<Jurisdiction> {
        self.jurisdiction.parse().ok()
    }
}

// ── Jurisdiction ──────────────────────────────────────────────────────────────

/// The 32 federal entities of Mexico as abbreviated by the SSN catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Jurisdiction {
    Ags,
    Bc,
    Bcs,
    Camp,
    Coah,
    Col,
    Chis,
    Chih,
    Cdmx,
    Dgo,
    Gto,
    Gro,
    Hgo,
    Jal,
    Mex,
    Mich,
    Mor,
    Nay,
    Nl,
    Oax,
    Pue,
    Qro,
    Qr,
    Slp,
    Sin,
    Son,
    Tab,
    Tams,
    Tlax,
    Ver,
    Yuc,
    Zac,
}

/// Abbreviation and default display color for every jurisdiction.
const JURISDICTION_TABLE: [(Jurisdiction, &str, Rgb); 32] = [
    (Jurisdiction::Ags, "AGS", Rgb::from_u32(0xf44336)),
    (Jurisdiction::Bc, "BC", Rgb::from_u32(0xd50000)),
    (Jurisdiction::Bcs, "BCS", Rgb::from_u32(0x455a64)),
    (Jurisdiction::Camp, "CAMP", Rgb::from_u32(0xe91e63)),
    (Jurisdiction::Coah, "COAH", Rgb::from_u32(0xc51162)),
    (Jurisdiction::Col, "COL", Rgb::from_u32(0x880e4f)),
    (Jurisdiction::Chis, "CHIS", Rgb::from_u32(0x9c27b0)),
    (Jurisdiction::Chih, "CHIH", Rgb::from_u32(0x4a148c)),
    (Jurisdiction::Cdmx, "CDMX", Rgb::from_u32(0xaa00ff)),
    (Jurisdiction::Dgo, "DGO", Rgb::from_u32(0xd500f9)),
    (Jurisdiction::Gto, "GTO", Rgb::from_u32(0x673ab7)),
    (Jurisdiction::Gro, "GRO", Rgb::from_u32(0x6200ea)),
    (Jurisdiction::Hgo, "HGO", Rgb::from_u32(0x311b92)),
    (Jurisdiction::Jal, "JAL", Rgb::from_u32(0x3f51b5)),
    (Jurisdiction::Mex, "MEX", Rgb::from_u32(0x304ffe)),
    (Jurisdiction::Mich, "MICH", Rgb::from_u32(0x1a237e)),
    (Jurisdiction::Mor, "MOR", Rgb::from_u32(0x0d47a1)),
    (Jurisdiction::Nay, "NAY", Rgb::from_u32(0x1976d2)),
    (Jurisdiction::Nl, "NL", Rgb::from_u32(0x00838f)),
    (Jurisdiction::Oax, "OAX", Rgb::from_u32(0x00796b)),
    (Jurisdiction::Pue, "PUE", Rgb::from_u32(0x004d40)),
    (Jurisdiction::Qro, "QRO", Rgb::from_u32(0x616161)),
    (Jurisdiction::Qr, "QR", Rgb::from_u32(0xd32f2f)),
    (Jurisdiction::Slp, "SLP", Rgb::from_u32(0x4e342e)),
    (Jurisdiction::Sin, "SIN", Rgb::from_u32(0x795548)),
    (Jurisdiction::Son, "SON", Rgb::from_u32(0xff3d00)),
    (Jurisdiction::Tab, "TAB", Rgb::from_u32(0xef6c00)),
    (Jurisdiction::Tams, "TAMS", Rgb::from_u32(0x827717)),
    (Jurisdiction::Tlax, "TLAX", Rgb::from_u32(0x689f38)),
    (Jurisdiction::Ver, "VER", Rgb::from_u32(0x33691e)),
    (Jurisdiction::Yuc, "YUC", Rgb::from_u32(0x388e3c)),
    (Jurisdiction::Zac, "ZAC", Rgb::from_u32(0x1b5e20)),
];

impl Jurisdiction {
    /// Every jurisdiction in catalog order.
    pub fn all() -> impl Iterator<Item = Jurisdiction> {
        JURISDICTION_TABLE.iter().map(|(j, _, _)| *j)
    }

    /// Catalog abbreviation, e.g. `"CDMX"`.
    pub fn code(self) -> &'static str {
        JURISDICTION_TABLE[self as usize].1
    }

    /// Default display color.
    pub fn default_color(self) -> Rgb {
        JURISDICTION_TABLE[self as usize].2
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Jurisdiction {
    type Err = String;

    /// Exact match on the catalog abbreviation (after trimming).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        JURISDICTION_TABLE
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(j, _, _)| *j)
            .ok_or_else(|| format!("unknown jurisdiction: {code}"))
    }
}

/// Immutable jurisdiction → color mapping handed to the series formatter.
#[derive(Debug, Clone)]
pub struct JurisdictionColors {
    colors: BTreeMap<Jurisdiction, Rgb>,
}

impl JurisdictionColors {
    pub fn new(colors: BTreeMap<Jurisdiction, Rgb>) -> Self {
        Self { colors }
    }

    /// Color for a known jurisdiction.
    pub fn get(&self, jurisdiction: Jurisdiction) -> Option<Rgb> {
        self.colors.get(&jurisdiction).copied()
    }

    /// Color for a raw derived jurisdiction string. Unknown codes yield `None`.
    pub fn lookup(&self, raw: &str) -> Option<Rgb> {
        raw.parse::<Jurisdiction>().ok().and_then(|j| self.get(j))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for JurisdictionColors {
    fn default() -> Self {
        Self::new(
            JURISDICTION_TABLE
                .iter()
                .map(|(j, _, color)| (*j, *color))
                .collect(),
        )
    }
}

// ── MagnitudeBand ─────────────────────────────────────────────────────────────

/// A half-open magnitude range `[lower, upper)` with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeBand {
    pub lower: f64,
    /// `None` means unbounded above.
    pub upper: Option<f64>,
    pub label: String,
    pub color: Rgb,
}

impl MagnitudeBand {
    pub fn new(lower: f64, upper: Option<f64>, label: impl Into<String>, color: Rgb) -> Self {
        Self {
            lower,
            upper,
            label: label.into(),
            color,
        }
    }

    pub fn contains(&self, magnitude: f64) -> bool {
        magnitude >= self.lower && self.upper.map_or(true, |upper| magnitude < upper)
    }

    /// The four one-unit bands from 5.0 to 9.0 used by the monthly bar charts.
    pub fn strong_bands() -> Vec<MagnitudeBand> {
        [5.0_f64, 6.0, 7.0, 8.0]
            .iter()
            .map(|&low| {
                MagnitudeBand::new(
                    low,
                    Some(low + 1.0),
                    format!("{:.1}-{:.1}", low, low + 0.9),
                    Rgb::WHITE,
                )
            })
            .collect()
    }

    /// Bands used by the city map, covering every non-negative magnitude.
    pub fn local_bands() -> Vec<MagnitudeBand> {
        vec![
            MagnitudeBand::new(0.0, Some(1.0), "< 1.0", Rgb::from_u32(0xea80fc)),
            MagnitudeBand::new(1.0, Some(2.0), "De 1.0 a 1.9", Rgb::from_u32(0x00e5ff)),
            MagnitudeBand::new(2.0, Some(3.0), "De 2.0 a 2.9", Rgb::from_u32(0xfdd835)),
            MagnitudeBand::new(3.0, None, "≥ 3.0", Rgb::from_u32(0xffa500)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(location: &str, jurisdiction: &str) -> SeismicRecord {
        SeismicRecord {
            occurred_at: NaiveDate::from_ymd_opt(2017, 9, 19)
                .unwrap()
                .and_hms_opt(13, 14, 40)
                .unwrap(),
            latitude: 18.40,
            longitude: -98.72,
            magnitude: Some(7.1),
            depth_km: Some(57.0),
            location_reference: location.to_string(),
            jurisdiction: jurisdiction.to_string(),
        }
    }

    #[test]
    fn test_record_calendar_accessors() {
        let r = record("12 km al NOROESTE de CHIAUTLA DE TAPIA, PUE", "PUE");
        assert_eq!(r.year(), 2017);
        assert_eq!(r.month(), 9);
        assert!(r.is_measured());
        assert_eq!(r.jurisdiction_code(), Some(Jurisdiction::Pue));
    }

    #[test]
    fn test_record_unknown_jurisdiction_code() {
        let r = record("100 km al SUR de X, GUATEMALA", "GUATEMALA");
        assert_eq!(r.jurisdiction_code(), None);
    }

    #[test]
    fn test_jurisdiction_table_has_32_entries() {
        assert_eq!(Jurisdiction::all().count(), 32);
        assert_eq!(JurisdictionColors::default().len(), 32);
    }

    #[test]
    fn test_jurisdiction_code_matches_variant_order() {
        for j in Jurisdiction::all() {
            assert_eq!(j.code().parse::<Jurisdiction>(), Ok(j));
        }
    }

    #[test]
    fn test_jurisdiction_from_str_trims() {
        assert_eq!(" CDMX ".parse::<Jurisdiction>(), Ok(Jurisdiction::Cdmx));
        assert!("cdmx".parse::<Jurisdiction>().is_err());
    }

    #[test]
    fn test_jurisdiction_colors_lookup() {
        let colors = JurisdictionColors::default();
        assert_eq!(colors.lookup("CDMX"), Some(Rgb::from_u32(0xaa00ff)));
        assert_eq!(colors.lookup("OAX"), Some(Rgb::from_u32(0x00796b)));
        assert_eq!(colors.lookup("ATLANTICO"), None);
    }

    #[test]
    fn test_band_is_half_open() {
        let band = MagnitudeBand::new(5.0, Some(6.0), "5.0-5.9", Rgb::WHITE);
        assert!(band.contains(5.0));
        assert!(band.contains(5.9));
        assert!(!band.contains(6.0));
        assert!(!band.contains(4.99));
    }

    #[test]
    fn test_unbounded_band() {
        let band = MagnitudeBand::new(3.0, None, "≥ 3.0", Rgb::WHITE);
        assert!(band.contains(3.0));
        assert!(band.contains(9.5));
        assert!(!band.contains(2.9));
    }

    #[test]
    fn test_strong_bands_labels() {
        let labels: Vec<String> = MagnitudeBand::strong_bands()
            .into_iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(labels, vec!["5.0-5.9", "6.0-6.9", "7.0-7.9", "8.0-8.9"]);
    }

    #[test]
    fn test_local_bands_do_not_overlap() {
        let bands = MagnitudeBand::local_bands();
        for m in [0.0, 0.5, 1.0, 1.99, 2.0, 3.0, 7.4] {
            let hits = bands.iter().filter(|b| b.contains(m)).count();
            assert_eq!(hits, 1, "magnitude {m} matched {hits} bands");
        }
    }
}
