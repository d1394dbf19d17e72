//! Monthly bar chart with value labels above each bar.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use sismo_core::error::Result;
use sismo_core::formatting::format_count;

use crate::components::annotations::ChartAnnotations;
use crate::export::{render_error, render_png};
use crate::series::BarSeries;
use crate::themes::{rgb, ChartTheme};

pub const Y_AXIS_TITLE: &str = "Total de registros";
const X_LABEL_AREA: u32 = 40;
const BAR_HALF_WIDTH: f64 = 0.4;

/// Render `bars` to a PNG at `path` using the bar theme.
pub fn render_bar_chart(path: &Path, bars: &BarSeries, notes: &ChartAnnotations) -> Result<()> {
    let theme = ChartTheme::bars();
    render_png(path, theme.width, theme.height, |root| {
        draw_bar_chart(root, &theme, bars, notes)
    })
}

/// Upper bound of the y axis: 10 % headroom for the value labels.
pub fn y_axis_max(max_value: u64) -> f64 {
    if max_value == 0 {
        1.0
    } else {
        max_value as f64 * 1.1
    }
}

pub fn draw_bar_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    theme: &ChartTheme,
    bars: &BarSeries,
    notes: &ChartAnnotations,
) -> Result<()> {
    root.fill(&rgb(theme.paper)).map_err(render_error)?;

    let columns = bars.values.len().max(1) as f64;
    let mut chart = ChartBuilder::on(root)
        .margin_top(theme.top_margin)
        .margin_bottom(theme.bottom_margin - X_LABEL_AREA)
        .margin_left(20)
        .margin_right(theme.side_margin / 2)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(theme.side_margin - 20)
        .build_cartesian_2d(-0.5..columns - 0.5, 0.0..y_axis_max(bars.max_value()))
        .map_err(render_error)?;

    chart
        .plotting_area()
        .fill(&rgb(theme.plot))
        .map_err(render_error)?;

    let grid = theme.grid.unwrap_or(theme.plot);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|v: &f64| format_count(v.round() as u64))
        .y_desc(Y_AXIS_TITLE)
        .label_style(theme.text(theme.tick_size))
        .axis_desc_style(theme.text(theme.body_size))
        .axis_style(rgb(theme.axis).stroke_width(2))
        .bold_line_style(rgb(grid).stroke_width(1))
        .light_line_style(rgb(theme.plot))
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(bars.values.iter().zip(&bars.colors).enumerate().map(
            |(i, (&value, &color))| {
                let x = i as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, value as f64)],
                    rgb(color).filled(),
                )
            },
        ))
        .map_err(render_error)?;

    let value_style = theme
        .text(theme.marker_text_size)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(bars.values.iter().zip(&bars.value_labels).enumerate().map(
            |(i, (&value, label))| {
                EmptyElement::at((i as f64, value as f64))
                    + Text::new(label.clone(), (0, -6), value_style.clone())
            },
        ))
        .map_err(render_error)?;

    let tick_style = theme
        .text(theme.body_size)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, label) in bars.labels.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(i as f64, 0.0));
        root.draw(&Text::new(label.as_str(), (x, y + 10), tick_style.clone()))
            .map_err(render_error)?;
    }

    notes.draw(root, theme)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::monthly_bars;
    use sismo_data::aggregator::AggregationBucket;
    use tempfile::TempDir;

    fn notes() -> ChartAnnotations {
        ChartAnnotations::new(
            "Eventos sísmicos de magnitud 6.0-6.9 por mes de ocurrencia en México (1900-2024)",
            "Mes de ocurrencia",
            "Fuente: SSN (02/09/2024)",
            "🧁 @lapanquecita",
        )
    }

    #[test]
    fn test_y_axis_max_headroom() {
        assert_eq!(y_axis_max(0), 1.0);
        assert!((y_axis_max(100) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_bar_chart_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("1.png");
        let buckets: Vec<AggregationBucket<u32>> = (1..=12)
            .map(|m| AggregationBucket {
                key: m,
                count: (m as u64 * 37) % 90,
            })
            .collect();

        render_bar_chart(&path, &monthly_bars(&buckets), &notes()).unwrap();
        assert_eq!(image::image_dimensions(&path).unwrap(), (1280, 720));
    }

    #[test]
    fn test_render_bar_chart_all_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("4.png");
        let buckets: Vec<AggregationBucket<u32>> = (1..=12)
            .map(|m| AggregationBucket { key: m, count: 0 })
            .collect();

        render_bar_chart(&path, &monthly_bars(&buckets), &notes()).unwrap();
        assert!(path.exists());
    }
}
