//! Chart job definitions.
//!
//! Each [`ChartJob`] describes one chart of the catalog: which records it
//! selects, how it groups them and which files it writes. The
//! [`ChartOrchestrator`](crate::orchestrator::ChartOrchestrator) executes them.

use sismo_charts::circle_grid::GridLayout;
use sismo_charts::series::DateStyle;
use sismo_charts::themes::ChartTheme;
use sismo_core::models::{Jurisdiction, MagnitudeBand};
use sismo_core::settings::ChartSelection;

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Lower magnitude bound of the strip plot.
pub const STRIP_MIN_MAGNITUDE: f64 = 6.0;

/// First year shown on the city map.
pub const CITY_MAP_FIRST_YEAR: i32 = 2010;

pub const COMPOSITE_FILE: &str = "final.png";
pub const STRIP_FILE: &str = "strip_chart.png";
pub const CITY_MAP_FILE: &str = "cdmx.png";

// ── TopPreset ─────────────────────────────────────────────────────────────────

/// How a preset title cites its year window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearWindowStyle {
    /// `"... (2011-2023)"`
    Parenthesized,
    /// `"... del 2007 al 2022"`
    Spelled,
}

impl YearWindowStyle {
    pub fn format(self, first: i32, last: i32) -> String {
        match self {
            YearWindowStyle::Parenthesized => format!("({first}-{last})"),
            YearWindowStyle::Spelled => format!("del {first} al {last}"),
        }
    }
}

/// Parameters of a top-N-per-year circle grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopPreset {
    pub first_year: i32,
    pub last_year: i32,
    pub n: usize,
    pub date_style: DateStyle,
    pub file_name: &'static str,
    pub title: &'static str,
    pub window_style: YearWindowStyle,
}

impl TopPreset {
    pub const TOP10: TopPreset = TopPreset {
        first_year: 2011,
        last_year: 2023,
        n: 10,
        date_style: DateStyle::Slash,
        file_name: "top10.png",
        title: "Los 10 eventos sísmicos con mayor magnitud\nregistrados en México por año",
        window_style: YearWindowStyle::Parenthesized,
    };

    pub const TOP8: TopPreset = TopPreset {
        first_year: 2007,
        last_year: 2022,
        n: 8,
        date_style: DateStyle::Dash,
        file_name: "top8.png",
        title: "Los eventos sísmicos con mayor magnitud\nregistrados en México",
        window_style: YearWindowStyle::Spelled,
    };

    pub fn theme(&self) -> ChartTheme {
        if self.n > 8 {
            ChartTheme::top10()
        } else {
            ChartTheme::top8()
        }
    }

    pub fn layout(&self) -> GridLayout {
        if self.n > 8 {
            GridLayout::TOP10
        } else {
            GridLayout::TOP8
        }
    }

    /// Title with the year window appended.
    pub fn full_title(&self) -> String {
        format!(
            "{} {}",
            self.title,
            self.window_style.format(self.first_year, self.last_year)
        )
    }
}

// ── ChartJob ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ChartJob {
    /// One bar chart per band (`1.png`, `2.png`, ...) plus their composite.
    MagnitudeByMonth { bands: Vec<MagnitudeBand> },
    /// Strip plot of events at or above `min_magnitude`.
    StripByMonth { min_magnitude: f64 },
    /// Circle grid of the strongest events per year.
    TopPerYear(TopPreset),
    /// Epicenter map of one jurisdiction since `min_year`.
    CityMap {
        min_year: i32,
        jurisdiction: Jurisdiction,
    },
    /// JSON summary of the aggregations, no image.
    Summary,
}

impl ChartJob {
    pub fn magnitude_by_month() -> Self {
        ChartJob::MagnitudeByMonth {
            bands: MagnitudeBand::strong_bands(),
        }
    }

    pub fn strip_by_month() -> Self {
        ChartJob::StripByMonth {
            min_magnitude: STRIP_MIN_MAGNITUDE,
        }
    }

    pub fn city_map() -> Self {
        ChartJob::CityMap {
            min_year: CITY_MAP_FIRST_YEAR,
            jurisdiction: Jurisdiction::Cdmx,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ChartJob::MagnitudeByMonth { .. } => "magnitude",
            ChartJob::StripByMonth { .. } => "strip",
            ChartJob::TopPerYear(preset) if preset.n > 8 => "top10",
            ChartJob::TopPerYear(_) => "top8",
            ChartJob::CityMap { .. } => "cdmx",
            ChartJob::Summary => "summary",
        }
    }

    /// Files the job writes, relative to the output directory.
    pub fn output_files(&self) -> Vec<String> {
        match self {
            ChartJob::MagnitudeByMonth { bands } => (1..=bands.len())
                .map(|i| format!("{i}.png"))
                .chain(std::iter::once(COMPOSITE_FILE.to_string()))
                .collect(),
            ChartJob::StripByMonth { .. } => vec![STRIP_FILE.to_string()],
            ChartJob::TopPerYear(preset) => vec![preset.file_name.to_string()],
            ChartJob::CityMap { .. } => vec![CITY_MAP_FILE.to_string()],
            ChartJob::Summary => Vec::new(),
        }
    }

    /// Jobs to run for a command-line selection, in execution order.
    pub fn for_selection(selection: ChartSelection) -> Vec<ChartJob> {
        match selection {
            ChartSelection::Magnitude => vec![ChartJob::magnitude_by_month()],
            ChartSelection::Strip => vec![ChartJob::strip_by_month()],
            ChartSelection::Top10 => vec![ChartJob::TopPerYear(TopPreset::TOP10)],
            ChartSelection::Top8 => vec![ChartJob::TopPerYear(TopPreset::TOP8)],
            ChartSelection::Cdmx => vec![ChartJob::city_map()],
            ChartSelection::Summary => vec![ChartJob::Summary],
            ChartSelection::All => vec![
                ChartJob::magnitude_by_month(),
                ChartJob::strip_by_month(),
                ChartJob::TopPerYear(TopPreset::TOP10),
                ChartJob::TopPerYear(TopPreset::TOP8),
                ChartJob::city_map(),
            ],
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selection_covers_every_image() {
        let jobs = ChartJob::for_selection(ChartSelection::All);
        let names: Vec<&str> = jobs.iter().map(|j| j.name()).collect();
        assert_eq!(names, vec!["magnitude", "strip", "top10", "top8", "cdmx"]);
        assert!(!jobs.contains(&ChartJob::Summary));
    }

    #[test]
    fn test_magnitude_outputs() {
        let files = ChartJob::magnitude_by_month().output_files();
        assert_eq!(files, vec!["1.png", "2.png", "3.png", "4.png", "final.png"]);
    }

    #[test]
    fn test_top_presets() {
        assert_eq!(TopPreset::TOP10.n, 10);
        assert_eq!(TopPreset::TOP10.theme().height, 1600);
        assert_eq!(TopPreset::TOP10.layout(), GridLayout::TOP10);
        assert_eq!(TopPreset::TOP8.theme().width, 1080);
        assert_eq!(TopPreset::TOP8.date_style, DateStyle::Dash);
        assert_eq!(
            TopPreset::TOP10.full_title(),
            "Los 10 eventos sísmicos con mayor magnitud\nregistrados en México por año (2011-2023)"
        );
    }

    #[test]
    fn test_top8_title_spells_out_years() {
        assert_eq!(
            TopPreset::TOP8.full_title(),
            "Los eventos sísmicos con mayor magnitud\nregistrados en México del 2007 al 2022"
        );
        assert_eq!(YearWindowStyle::Spelled.format(2010, 2024), "del 2010 al 2024");
    }

    #[test]
    fn test_single_selections() {
        assert_eq!(
            ChartJob::for_selection(ChartSelection::Top8),
            vec![ChartJob::TopPerYear(TopPreset::TOP8)]
        );
        assert_eq!(
            ChartJob::for_selection(ChartSelection::Cdmx)[0].output_files(),
            vec!["cdmx.png"]
        );
        assert!(ChartJob::Summary.output_files().is_empty());
    }
}
