//! Strip plot: one jittered column of open circles per month.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use sismo_core::error::Result;

use crate::components::annotations::ChartAnnotations;
use crate::export::{render_error, render_png};
use crate::series::StripColumn;
use crate::themes::{rgb, ChartTheme};

pub const Y_AXIS_TITLE: &str = "Magnitud del sismo";
/// Fixed magnitude window of the y axis.
pub const Y_RANGE: (f64, f64) = (5.8, 8.4);
const X_LABEL_AREA: u32 = 40;
const MARKER_RADIUS: i32 = 7;
/// Half the horizontal spread of a column, in category units.
const JITTER_SPREAD: f64 = 0.35;

pub fn render_strip_chart(
    path: &Path,
    columns: &[StripColumn],
    notes: &ChartAnnotations,
) -> Result<()> {
    let theme = ChartTheme::strip();
    render_png(path, theme.width, theme.height, |root| {
        draw_strip_chart(root, &theme, columns, notes)
    })
}

/// Horizontal offset of the `index`-th point of a column.
///
/// A golden-ratio sequence spreads points evenly without randomness, so the
/// same catalog always draws the same image.
pub fn jitter(index: usize) -> f64 {
    const GOLDEN: f64 = 0.618_033_988_749_895;
    ((index as f64 * GOLDEN).fract() - 0.5) * 2.0 * JITTER_SPREAD
}

pub fn draw_strip_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    theme: &ChartTheme,
    columns: &[StripColumn],
    notes: &ChartAnnotations,
) -> Result<()> {
    root.fill(&rgb(theme.paper)).map_err(render_error)?;

    let count = columns.len().max(1) as f64;
    let mut chart = ChartBuilder::on(root)
        .margin_top(theme.top_margin)
        .margin_bottom(theme.bottom_margin - X_LABEL_AREA)
        .margin_left(20)
        .margin_right(theme.side_margin / 2)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(theme.side_margin - 20)
        .build_cartesian_2d(-0.5..count - 0.5, Y_RANGE.0..Y_RANGE.1)
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
        .y_label_formatter(&|v: &f64| format!("{v:.1}"))
        .y_desc(Y_AXIS_TITLE)
        .label_style(theme.text(theme.tick_size))
        .axis_desc_style(theme.text(theme.body_size))
        .axis_style(rgb(theme.axis).stroke_width(2))
        .bold_line_style(rgb(grid).stroke_width(1))
        .light_line_style(rgb(theme.plot))
        .draw()
        .map_err(render_error)?;

    for (i, column) in columns.iter().enumerate() {
        let style = rgb(column.color).stroke_width(2);
        chart
            .draw_series(
                column
                    .magnitudes
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| (Y_RANGE.0..=Y_RANGE.1).contains(*m))
                    .map(|(j, &m)| Circle::new((i as f64 + jitter(j), m), MARKER_RADIUS, style)),
            )
            .map_err(render_error)?;
    }

    let tick_style = theme
        .text(theme.tick_size)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, column) in columns.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(i as f64, Y_RANGE.0));
        root.draw(&Text::new(column.label.as_str(), (x, y + 10), tick_style.clone()))
            .map_err(render_error)?;
    }

    notes.draw(root, theme)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
