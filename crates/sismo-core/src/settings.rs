use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::{Result, SismoError};
use crate::time_utils;

// ── Chart selection ────────────────────────────────────────────────────────────

/// Which chart (or charts) a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartSelection {
    /// Monthly bar charts for four magnitude bands, plus their composite
    Magnitude,
    /// Strip plot of M ≥ 6.0 events per month
    Strip,
    /// Top 10 events per year, 2011-2023
    Top10,
    /// Top 8 events per year, 2007-2022
    Top8,
    /// Mexico City map of local events since 2010
    Cdmx,
    /// Every image chart
    All,
    /// Print aggregation summary as JSON instead of drawing
    Summary,
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Render static charts from the SSN earthquake catalog
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sismo",
    about = "Render static charts from the SSN earthquake catalog",
    version
)]
pub struct Settings {
    /// Chart to render
    #[arg(long, value_enum, default_value_t = ChartSelection::All)]
    pub chart: ChartSelection,

    /// Catalog CSV exported from the SSN
    #[arg(long, env = "SISMO_DATA", default_value = "data.csv")]
    pub data: PathBuf,

    /// GeoJSON with the Mexico City borough boundaries
    #[arg(long, default_value = "assets/Ciudad de México.json")]
    pub boundaries: PathBuf,

    /// Property of each boundary feature holding its region code
    #[arg(long, default_value = "CVEGEO")]
    pub boundary_key: String,

    /// Directory where images are written
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Date of the catalog download cited in the footer (dd/mm/yyyy, defaults to today)
    #[arg(long)]
    pub source_date: Option<String>,

    /// Attribution tag shown in the footer
    #[arg(long, default_value = "🧁 @lapanquecita")]
    pub attribution: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The catalog download date cited in footers.
    pub fn source_date(&self) -> Result<NaiveDate> {
        match &self.source_date {
            None => Ok(time_utils::today()),
            Some(raw) => time_utils::parse_source_date(raw).ok_or_else(|| {
                SismoError::Config(format!("invalid --source-date \"{raw}\", expected dd/mm/yyyy"))
            }),
        }
    }

    /// Footer text citing the catalog, e.g. `"Fuente: SSN (02/09/2024)"`.
    pub fn source_note(&self) -> Result<String> {
        let date = self.source_date()?;
        Ok(format!("Fuente: SSN ({})", time_utils::format_source_date(date)))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["sismo"]);

        assert_eq!(settings.chart, ChartSelection::All);
        assert_eq!(settings.data, PathBuf::from("data.csv"));
        assert_eq!(
            settings.boundaries,
            PathBuf::from("assets/Ciudad de México.json")
        );
        assert_eq!(settings.boundary_key, "CVEGEO");
        assert_eq!(settings.output_dir, PathBuf::from("."));
        assert!(settings.source_date.is_none());
        assert_eq!(settings.attribution, "🧁 @lapanquecita");
        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_chart() {
        let settings = Settings::parse_from(["sismo", "--chart", "top8"]);
        assert_eq!(settings.chart, ChartSelection::Top8);
    }

    #[test]
    fn test_settings_cli_rejects_unknown_chart() {
        let parsed = Settings::try_parse_from(["sismo", "--chart", "pie"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings = Settings::load_from_args(["sismo", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_source_note_explicit_date() {
        let settings = Settings::parse_from(["sismo", "--source-date", "02/09/2024"]);
        assert_eq!(settings.source_note().unwrap(), "Fuente: SSN (02/09/2024)");
    }

    #[test]
    fn test_source_date_invalid_is_config_error() {
        let settings = Settings::parse_from(["sismo", "--source-date", "septiembre"]);
        let err = settings.source_date().unwrap_err();
        assert!(matches!(err, SismoError::Config(_)));
    }

    #[test]
    fn test_source_date_defaults_to_today() {
        let settings = Settings::parse_from(["sismo"]);
        assert_eq!(settings.source_date().unwrap(), time_utils::today());
    }
}
