//! Sequential chart orchestrator.
//!
//! Loads the catalog once, then runs each [`ChartJob`] in turn: select the
//! records, aggregate them, format the series and render the images. Every
//! run is a pure function of the input files.

use std::path::{Path, PathBuf};

use sismo_charts::bar_chart::render_bar_chart;
use sismo_charts::choropleth::render_city_map;
use sismo_charts::circle_grid::render_circle_grid;
use sismo_charts::components::annotations::ChartAnnotations;
use sismo_charts::composite::stack_vertically;
use sismo_charts::series::{circle_grid, map_series, monthly_bars, strip_columns};
use sismo_charts::strip_chart::render_strip_chart;
use sismo_core::error::Result;
use sismo_core::models::{Jurisdiction, JurisdictionColors, MagnitudeBand, SeismicRecord};
use sismo_core::settings::Settings;
use sismo_data::aggregator::{observed_year_span, CatalogAggregator};
use sismo_data::analysis::{analyze_catalog, CatalogAnalysis};
use sismo_data::boundaries::load_boundaries;
use sismo_data::filter::RecordFilter;

use crate::jobs::{ChartJob, TopPreset, CITY_MAP_FILE, COMPOSITE_FILE, STRIP_FILE};
use crate::summary::CatalogSummary;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything a job needs besides the catalog itself.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub output_dir: PathBuf,
    pub boundaries: PathBuf,
    pub boundary_key: String,
    /// Footer citing the catalog, e.g. `"Fuente: SSN (02/09/2024)"`.
    pub source_note: String,
    pub attribution: String,
    pub colors: JurisdictionColors,
}

impl JobContext {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            output_dir: settings.output_dir.clone(),
            boundaries: settings.boundaries.clone(),
            boundary_key: settings.boundary_key.clone(),
            source_note: settings.source_note()?,
            attribution: settings.attribution.clone(),
            colors: JurisdictionColors::default(),
        })
    }

    fn annotations(&self, title: impl Into<String>, caption: impl Into<String>) -> ChartAnnotations {
        ChartAnnotations::new(title, caption, &self.source_note, &self.attribution)
    }

    fn output(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

/// Result of one orchestrator run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Image files written, in job order.
    pub written: Vec<PathBuf>,
    /// Present when a summary job ran.
    pub summary: Option<CatalogSummary>,
}

// ── ChartOrchestrator ─────────────────────────────────────────────────────────

pub struct ChartOrchestrator {
    context: JobContext,
}

impl ChartOrchestrator {
    pub fn new(context: JobContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &JobContext {
        &self.context
    }

    /// Load the catalog at `data` and run `jobs` in order. Stops at the first
    /// failing job.
    pub fn run(&self, data: &Path, jobs: &[ChartJob]) -> Result<RunReport> {
        let analysis = analyze_catalog(data)?;
        self.run_with(&analysis, jobs)
    }

    /// Run `jobs` over an already loaded catalog.
    pub fn run_with(&self, analysis: &CatalogAnalysis, jobs: &[ChartJob]) -> Result<RunReport> {
        let mut report = RunReport::default();
        for job in jobs {
            tracing::debug!(job = job.name(), "running chart job");
            match job {
                ChartJob::Summary => {
                    report.summary = Some(CatalogSummary::from_analysis(analysis));
                }
                _ => {
                    let written = self.render(analysis, job)?;
                    tracing::info!(job = job.name(), files = written.len(), "chart job finished");
                    report.written.extend(written);
                }
            }
        }
        Ok(report)
    }

    fn render(&self, analysis: &CatalogAnalysis, job: &ChartJob) -> Result<Vec<PathBuf>> {
        let records = &analysis.records;
        match job {
            ChartJob::MagnitudeByMonth { bands } => self.magnitude_by_month(records, bands),
            ChartJob::StripByMonth { min_magnitude } => self.strip_by_month(records, *min_magnitude),
            ChartJob::TopPerYear(preset) => self.top_per_year(records, preset),
            ChartJob::CityMap {
                min_year,
                jurisdiction,
            } => self.city_map(records, *min_year, *jurisdiction),
            ChartJob::Summary => Ok(Vec::new()),
        }
    }

    // ── Jobs ──────────────────────────────────────────────────────────────────

    fn magnitude_by_month(
        &self,
        records: &[SeismicRecord],
        bands: &[MagnitudeBand],
    ) -> Result<Vec<PathBuf>> {
        let span = span_label(observed_year_span(records));
        let mut written = Vec::with_capacity(bands.len() + 1);

        for (i, band) in bands.iter().enumerate() {
            let filter = match band.upper {
                Some(upper) => RecordFilter::new().magnitude_range(band.lower, upper),
                None => RecordFilter::new().min_magnitude(band.lower),
            };
            let selected = filter.apply(records);
            tracing::debug!(band = %band.label, records = selected.len(), "band selected");

            let buckets = CatalogAggregator::count_by_month(selected);
            let notes = self.context.annotations(
                format!(
                    "Eventos sísmicos de magnitud {} por mes de ocurrencia en México {span}",
                    band.label
                ),
                "Mes de ocurrencia",
            );
            let path = self.context.output(&format!("{}.png", i + 1));
            render_bar_chart(&path, &monthly_bars(&buckets), &notes)?;
            written.push(path);
        }

        let composite = self.context.output(COMPOSITE_FILE);
        stack_vertically(&written, &composite)?;
        written.push(composite);
        Ok(written)
    }

    fn strip_by_month(&self, records: &[SeismicRecord], min_magnitude: f64) -> Result<Vec<PathBuf>> {
        let span = span_label(observed_year_span(records));
        let selected = RecordFilter::new().min_magnitude(min_magnitude).apply(records);
        let months = CatalogAggregator::magnitudes_by_month(selected);

        let notes = self.context.annotations(
            format!(
                "Distribución de eventos sísmicos de magnitud ≥ {min_magnitude:.1} por mes de ocurrencia en México {span}"
            ),
            "Mes de ocurrencia (total de registros)",
        );
        let path = self.context.output(STRIP_FILE);
        render_strip_chart(&path, &strip_columns(&months), &notes)?;
        Ok(vec![path])
    }

    fn top_per_year(&self, records: &[SeismicRecord], preset: &TopPreset) -> Result<Vec<PathBuf>> {
        let tops =
            CatalogAggregator::top_n_per_year(records, preset.first_year, preset.last_year, preset.n);
        let grid = circle_grid(&tops, preset.n, &self.context.colors, preset.date_style);
        if grid.uncolored > 0 {
            tracing::warn!(
                cells = grid.uncolored,
                "top events with an unrecognized jurisdiction drawn without color"
            );
        }

        let notes = self
            .context
            .annotations(preset.full_title(), "Magnitud, ubicación y fecha de ocurrencia");
        let path = self.context.output(preset.file_name);
        render_circle_grid(&path, &preset.theme(), preset.layout(), &grid, &notes)?;
        Ok(vec![path])
    }

    fn city_map(
        &self,
        records: &[SeismicRecord],
        min_year: i32,
        jurisdiction: Jurisdiction,
    ) -> Result<Vec<PathBuf>> {
        let boundaries = load_boundaries(&self.context.boundaries, &self.context.boundary_key)?;
        let selected = RecordFilter::new()
            .measured()
            .from_year(min_year)
            .in_jurisdiction(jurisdiction)
            .apply(records);
        tracing::debug!(%jurisdiction, records = selected.len(), "map records selected");

        let bands = MagnitudeBand::local_bands();
        let band_counts = CatalogAggregator::count_by_band(selected.iter().copied(), &bands);
        let per_year = CatalogAggregator::count_by_year_dense_observed(selected.iter().copied());
        let series = map_series(&selected, &band_counts, &per_year);
        let regions = CatalogAggregator::geo_presence(&boundaries);

        let span = span_label(observed_year_span(selected.iter().copied()));
        let notes = self.context.annotations(
            format!("Sismos registrados con epicentro cerca o dentro de la Ciudad de México {span}"),
            series.subtitle.clone(),
        );
        let path = self.context.output(CITY_MAP_FILE);
        render_city_map(&path, &boundaries, &regions, &series, &notes)?;
        Ok(vec![path])
    }
}

/// `"(1900-2024)"` for a year span, empty when there is none.
pub fn span_label(span: Option<(i32, i32)>) -> String {
    match span {
        Some((first, last)) if first == last => format!("({first})"),
        Some((first, last)) => format!("({first}-{last})"),
        None => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str =
        "Fecha,Hora,Magnitud,Latitud,Longitud,Profundidad,Referencia de localizacion";

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"CVEGEO": "09015"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-99.2, 19.5], [-99.0, 19.5], [-99.0, 19.3], [-99.2, 19.3], [-99.2, 19.5]]]
            }
        }]
    }"#;

    fn fixture(dir: &Path) -> (PathBuf, JobContext) {
        let data = dir.join("data.csv");
        let mut file = std::fs::File::create(&data).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in [
            r#"2017-09-07,23:49:17,8.2,14.76,-94.1,50,"137 km al SUROESTE de PIJIJIAPAN, CHIS""#,
            r#"2017-09-19,13:14:40,7.1,18.4,-98.72,57,"12 km al SURESTE de AXOCHIAPAN, MOR""#,
            r#"2019-05-01,10:00:00,no calculable,19.4,-99.1,5,"2 km al N de X, CDMX""#,
            r#"2019-06-01,10:00:00,1.4,19.4,-99.1,menos de 1,"2 km al N de X, CDMX""#,
            r#"2021-07-01,10:00:00,2.3,19.35,-99.15,3,"3 km al S de Y, CDMX""#,
            r#"2022-09-19,13:05:09,7.7,18.24,-103.29,15,"63 km al SUR de COALCOMAN, MICH""#,
        ] {
            writeln!(file, "{row}").unwrap();
        }

        let boundaries = dir.join("cdmx.json");
        std::fs::write(&boundaries, BOUNDARIES).unwrap();

        let out = dir.join("out");
        std::fs::create_dir_all(&out).unwrap();

        let context = JobContext {
            output_dir: out,
            boundaries,
            boundary_key: "CVEGEO".to_string(),
            source_note: "Fuente: SSN (02/09/2024)".to_string(),
            attribution: "🧁 @lapanquecita".to_string(),
            colors: JurisdictionColors::default(),
        };
        (data, context)
    }

    // ── span_label ────────────────────────────────────────────────────────────

    #[test]
    fn test_span_label() {
        assert_eq!(span_label(Some((1900, 2024))), "(1900-2024)");
        assert_eq!(span_label(Some((2024, 2024))), "(2024)");
        assert_eq!(span_label(None), "");
    }

    // ── run ───────────────────────────────────────────────────────────────────

    #[test]
    fn test_run_magnitude_writes_bands_and_composite() {
        let dir = TempDir::new().unwrap();
        let (data, context) = fixture(dir.path());
        let orchestrator = ChartOrchestrator::new(context);

        let report = orchestrator
            .run(&data, &[ChartJob::magnitude_by_month()])
            .unwrap();

        let names: Vec<String> = report
            .written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["1.png", "2.png", "3.png", "4.png", "final.png"]);
        let composite = orchestrator.context().output("final.png");
        assert_eq!(image::image_dimensions(composite).unwrap(), (1280, 720 * 4));
    }

    #[test]
    fn test_run_every_image_job() {
        let dir = TempDir::new().unwrap();
        let (data, context) = fixture(dir.path());
        let orchestrator = ChartOrchestrator::new(context);
        let jobs = ChartJob::for_selection(sismo_core::settings::ChartSelection::All);

        let report = orchestrator.run(&data, &jobs).unwrap();

        for file in ["strip_chart.png", "top10.png", "top8.png", "cdmx.png"] {
            assert!(orchestrator.context().output(file).exists(), "{file} missing");
        }
        assert_eq!(report.written.len(), 9);
        assert!(report.summary.is_none());
    }

    #[test]
    fn test_run_summary_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let (data, context) = fixture(dir.path());
        let out = context.output_dir.clone();
        let report = ChartOrchestrator::new(context)
            .run(&data, &[ChartJob::Summary])
            .unwrap();

        assert!(report.written.is_empty());
        let summary = report.summary.unwrap();
        assert_eq!(summary.rows_loaded, 6);
        assert_eq!(summary.unmeasured, 1);
        assert_eq!(std::fs::read_dir(out).unwrap().count(), 0);
    }

    #[test]
    fn test_city_map_missing_boundaries() {
        let dir = TempDir::new().unwrap();
        let (data, mut context) = fixture(dir.path());
        context.boundaries = dir.path().join("missing.json");

        let err = ChartOrchestrator::new(context)
            .run(&data, &[ChartJob::city_map()])
            .unwrap_err();
        assert!(matches!(err, sismo_core::error::SismoError::InputNotFound(_)));
    }

    #[test]
    fn test_context_from_settings() {
        let settings = Settings::load_from_args([
            "sismo",
            "--output-dir",
            "/tmp/charts",
            "--source-date",
            "29/02/2024",
        ]);
        let context = JobContext::from_settings(&settings).unwrap();
        assert_eq!(context.output_dir, PathBuf::from("/tmp/charts"));
        assert_eq!(context.source_note, "Fuente: SSN (29/02/2024)");
        assert_eq!(context.colors.len(), 32);
    }
}
