//! Circle grid: one row per year, one labelled circle per top event.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use sismo_core::color::Rgb;
use sismo_core::error::Result;

use crate::components::annotations::ChartAnnotations;
use crate::export::{render_error, render_png};
use crate::series::CircleGrid;
use crate::themes::{rgb, ChartTheme};

pub const Y_AXIS_TITLE: &str = "Año del evento sísmico";
/// Fill for cells whose jurisdiction has no color.
pub const FALLBACK_FILL: Rgb = Rgb::from_u32(0x9e9e9e);

/// Marker size and axis padding of one grid preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub marker_radius: i32,
    /// Extra room around the outermost rows and columns, in cell units.
    pub padding: f64,
}

impl GridLayout {
    pub const TOP10: GridLayout = GridLayout {
        marker_radius: 48,
        padding: 0.6,
    };

    pub const TOP8: GridLayout = GridLayout {
        marker_radius: 45,
        padding: 0.75,
    };
}

pub fn render_circle_grid(
    path: &Path,
    theme: &ChartTheme,
    layout: GridLayout,
    grid: &CircleGrid,
    notes: &ChartAnnotations,
) -> Result<()> {
    render_png(path, theme.width, theme.height, |root| {
        draw_circle_grid(root, theme, layout, grid, notes)
    })
}

pub fn draw_circle_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    theme: &ChartTheme,
    layout: GridLayout,
    grid: &CircleGrid,
    notes: &ChartAnnotations,
) -> Result<()> {
    root.fill(&rgb(theme.paper)).map_err(render_error)?;

    let columns = grid.columns.max(1) as f64;
    let rows = grid.rows.len().max(1) as f64;
    let x_range = -layout.padding..columns - 1.0 + layout.padding;
    let y_range = -layout.padding..rows - 1.0 + layout.padding;

    let mut chart = ChartBuilder::on(root)
        .margin_top(theme.top_margin)
        .margin_bottom(theme.bottom_margin)
        .margin_left(20)
        .margin_right(theme.side_margin / 3)
        .y_label_area_size(theme.side_margin - 20)
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(render_error)?;

    chart
        .plotting_area()
        .fill(&rgb(theme.plot))
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|_| String::new())
        .y_desc(Y_AXIS_TITLE)
        .axis_desc_style(theme.text(theme.body_size + 6.0))
        .axis_style(rgb(theme.axis).stroke_width(2))
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(x_range.start, y_range.start), (x_range.end, y_range.end)],
            rgb(theme.axis).stroke_width(2),
        )))
        .map_err(render_error)?;

    let line_height = (theme.marker_text_size * 1.15) as i32;
    let plain = theme
        .text(theme.marker_text_size)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let bold = theme
        .bold(theme.marker_text_size)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (row_index, row) in grid.rows.iter().enumerate() {
        let y = row_index as f64;
        chart
            .draw_series(row.cells.iter().enumerate().map(|(col, cell)| {
                let fill = cell.color.unwrap_or(FALLBACK_FILL);
                EmptyElement::at((col as f64, y))
                    + Circle::new((0, 0), layout.marker_radius, rgb(fill).filled())
                    + Text::new(cell.magnitude.clone(), (0, -line_height), plain.clone())
                    + Text::new(cell.jurisdiction.clone(), (0, 0), bold.clone())
                    + Text::new(cell.date.clone(), (0, line_height), plain.clone())
            }))
            .map_err(render_error)?;
    }

    let tick_style = theme
        .text(theme.tick_size)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (row_index, row) in grid.rows.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(x_range.start, row_index as f64));
        root.draw(&Text::new(row.label.as_str(), (x - 14, y), tick_style.clone()))
            .map_err(render_error)?;
    }

    notes.draw(root, theme)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{circle_grid, DateStyle};
    use chrono::NaiveDate;
    use sismo_core::models::{JurisdictionColors, SeismicRecord};
    use sismo_data::aggregator::CatalogAggregator;
    use tempfile::TempDir;

    fn records() -> Vec<SeismicRecord> {
        let rows = [
            ("2017-09-07", 8.2, "CHIS"),
            ("2017-09-19", 7.1, "MOR"),
            ("2018-02-16", 7.2, "OAX"),
            ("2019-03-01", 5.1, "GUAT"),
        ];
        rows.iter()
            .map(|&(date, m, j)| SeismicRecord {
                occurred_at: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                latitude: 15.0,
                longitude: -94.0,
                magnitude: Some(m),
                depth_km: Some(10.0),
                location_reference: format!("x, {j}"),
                jurisdiction: j.to_string(),
            })
            .collect()
    }

    fn notes() -> ChartAnnotations {
        ChartAnnotations::new(
            "Los eventos sísmicos con mayor magnitud\nregistrados en México",
            "Magnitud, ubicación y fecha de ocurrencia",
            "Fuente: SSN",
            "🧁 @lapanquecita",
        )
    }

    #[test]
    fn test_render_top10_grid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top10.png");
        let tops = CatalogAggregator::top_n_per_year(&records(), 2016, 2019, 10);
        let grid = circle_grid(&tops, 10, &JurisdictionColors::default(), DateStyle::Slash);

        render_circle_grid(&path, &ChartTheme::top10(), GridLayout::TOP10, &grid, &notes())
            .unwrap();
        assert_eq!(image::image_dimensions(&path).unwrap(), (1280, 1600));
    }

    #[test]
    fn test_render_top8_grid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top8.png");
        let tops = CatalogAggregator::top_n_per_year(&records(), 2007, 2022, 8);
        let grid = circle_grid(&tops, 8, &JurisdictionColors::default(), DateStyle::Dash);

        render_circle_grid(&path, &ChartTheme::top8(), GridLayout::TOP8, &grid, &notes())
            .unwrap();
        assert_eq!(image::image_dimensions(&path).unwrap(), (1080, 1920));
    }
}
