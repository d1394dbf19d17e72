//! City map: borough outlines with epicenters as open circles.

use std::f64::consts::FRAC_PI_4;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use sismo_core::color::Rgb;
use sismo_core::error::Result;
use sismo_data::aggregator::RegionWeight;
use geo::{coord, Coord, Rect};
use sismo_data::boundaries::{padded, BoundarySet};

use crate::components::annotations::ChartAnnotations;
use crate::components::legend::{Anchor, Legend, TextBox};
use crate::export::{render_error, render_png};
use crate::series::MapSeries;
use crate::themes::{rgb, ChartTheme};

pub const LEGEND_TITLE: &str = "Magnitud del sismo";
/// Region fill for weight 1 (every region drawn).
const REGION_FILL: Rgb = Rgb::BLACK;
const REGION_OUTLINE: Rgb = Rgb::WHITE;

// ── Projection ────────────────────────────────────────────────────────────────

/// Mercator projection fitted to a pixel rectangle, aspect preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    scale: f64,
    origin_x: f64,
    origin_y: f64,
    min_x: f64,
    max_y: f64,
    frame: (i32, i32, i32, i32),
}

/// Longitude/latitude in degrees to Mercator x/y in radians.
fn mercator(c: Coord<f64>) -> Coord<f64> {
    coord! {
        x: c.x.to_radians(),
        y: (FRAC_PI_4 + c.y.to_radians() / 2.0).tan().ln(),
    }
}

impl MapProjection {
    /// Fit `bbox` inside `frame` = `(left, top, right, bottom)` in pixels,
    /// centered on both axes.
    pub fn fit(bbox: Rect<f64>, frame: (i32, i32, i32, i32)) -> Self {
        let Coord { x: min_x, y: min_y } = mercator(bbox.min());
        let Coord { x: max_x, y: max_y } = mercator(bbox.max());
        let (left, top, right, bottom) = frame;
        let frame_w = (right - left) as f64;
        let frame_h = (bottom - top) as f64;

        let span_x = (max_x - min_x).max(f64::EPSILON);
        let span_y = (max_y - min_y).max(f64::EPSILON);
        let scale = (frame_w / span_x).min(frame_h / span_y);

        Self {
            scale,
            origin_x: left as f64 + (frame_w - span_x * scale) / 2.0,
            origin_y: top as f64 + (frame_h - span_y * scale) / 2.0,
            min_x,
            max_y,
            frame,
        }
    }

    pub fn project(&self, c: Coord<f64>) -> (i32, i32) {
        let Coord { x, y } = mercator(c);
        (
            (self.origin_x + (x - self.min_x) * self.scale).round() as i32,
            (self.origin_y + (self.max_y - y) * self.scale).round() as i32,
        )
    }

    /// Whether a projected point falls inside the frame.
    pub fn in_frame(&self, (x, y): (i32, i32)) -> bool {
        let (left, top, right, bottom) = self.frame;
        (left..=right).contains(&x) && (top..=bottom).contains(&y)
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Map frame for a theme: the canvas minus margins, symmetric horizontally.
pub fn map_frame(theme: &ChartTheme) -> (i32, i32, i32, i32) {
    (
        theme.side_margin as i32,
        theme.top_margin as i32,
        (theme.width - theme.side_margin) as i32,
        (theme.height - theme.bottom_margin) as i32,
    )
}

pub fn render_city_map(
    path: &Path,
    boundaries: &BoundarySet,
    regions: &[RegionWeight],
    series: &MapSeries,
    notes: &ChartAnnotations,
) -> Result<()> {
    let theme = ChartTheme::city_map();
    render_png(path, theme.width, theme.height, |root| {
        draw_city_map(root, &theme, boundaries, regions, series, notes)
    })
}

pub fn draw_city_map<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    theme: &ChartTheme,
    boundaries: &BoundarySet,
    regions: &[RegionWeight],
    series: &MapSeries,
    notes: &ChartAnnotations,
) -> Result<()> {
    root.fill(&rgb(theme.paper)).map_err(render_error)?;

    let frame = map_frame(theme);
    let (left, top, right, bottom) = frame;
    root.draw(&Rectangle::new([(left, top), (right, bottom)], rgb(theme.plot).filled()))
        .map_err(render_error)?;

    if let Some(bbox) = boundaries.bounding_box() {
        let projection = MapProjection::fit(padded(bbox, 0.02), frame);

        for boundary in boundaries.iter() {
            let weight = regions
                .iter()
                .find(|r| r.code == boundary.code)
                .map_or(0, |r| r.weight);
            for ring in boundary.rings() {
                let points: Vec<(i32, i32)> =
                    ring.coords().map(|&c| projection.project(c)).collect();
                if weight > 0 {
                    root.draw(&Polygon::new(points.clone(), rgb(REGION_FILL).filled()))
                        .map_err(render_error)?;
                }
                root.draw(&PathElement::new(points, rgb(REGION_OUTLINE).stroke_width(2)))
                    .map_err(render_error)?;
            }
        }

        for layer in &series.layers {
            let style = rgb(layer.color).stroke_width(2);
            for point in &layer.points {
                let center =
                    projection.project(coord! { x: point.longitude, y: point.latitude });
                if !projection.in_frame(center) {
                    continue;
                }
                let radius = (point.size / 2.0).round().max(1.0) as i32;
                root.draw(&Circle::new(center, radius, style))
                    .map_err(render_error)?;
            }
        }
    }

    root.draw(&Rectangle::new([(left, top), (right, bottom)], rgb(theme.axis).stroke_width(2)))
        .map_err(render_error)?;

    let w = theme.width as f64;
    let h = theme.height as f64;
    let entries = series
        .layers
        .iter()
        .map(|l| (l.legend.clone(), l.color))
        .collect();
    Legend::new(LEGEND_TITLE, entries, theme).draw(
        root,
        Anchor::BottomLeft(left + (w * 0.03) as i32, bottom - (h * 0.02) as i32),
    )?;
    TextBox::new(&series.year_heading, &series.year_lines, theme).draw(
        root,
        Anchor::TopRight((w * 0.94) as i32, top + (h * 0.02) as i32),
    )?;

    notes.draw(root, theme)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
