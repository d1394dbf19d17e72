use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use sismo_core::color::Rgb;
use sismo_core::error::Result;

use crate::export::render_error;
use crate::themes::{rgb, ChartTheme};

const PADDING: i32 = 12;
const MARKER_RADIUS: i32 = 8;

/// Where a boxed overlay is pinned on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    BottomLeft(i32, i32),
    TopRight(i32, i32),
}

impl Anchor {
    /// Top-left corner of a `w`×`h` box pinned here.
    fn origin(self, w: i32, h: i32) -> (i32, i32) {
        match self {
            Anchor::BottomLeft(x, y) => (x, y - h),
            Anchor::TopRight(x, y) => (x - w, y),
        }
    }
}

/// A bordered box listing colored open-circle markers with labels.
pub struct Legend<'a> {
    pub title: &'a str,
    pub entries: Vec<(String, Rgb)>,
    pub theme: &'a ChartTheme,
}

impl<'a> Legend<'a> {
    pub fn new(title: &'a str, entries: Vec<(String, Rgb)>, theme: &'a ChartTheme) -> Self {
        Self {
            title,
            entries,
            theme,
        }
    }

    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, at: Anchor) -> Result<()> {
        let title_style = self.theme.bold(self.theme.body_size);
        let entry_style = self.theme.text(self.theme.body_size);
        let line_height = (self.theme.body_size * 1.5) as i32;

        let mut width = text_width(root, self.title, &title_style)?;
        for (label, _) in &self.entries {
            width = width.max(text_width(root, label, &entry_style)? + MARKER_RADIUS * 2 + 10);
        }
        let width = width + PADDING * 2;
        let height = line_height * (self.entries.len() as i32 + 1) + PADDING * 2;
        let (x0, y0) = at.origin(width, height);

        draw_box(root, self.theme, (x0, y0), (width, height))?;

        root.draw(&Text::new(
            self.title,
            (x0 + width / 2, y0 + PADDING),
            title_style.pos(Pos::new(HPos::Center, VPos::Top)),
        ))
        .map_err(render_error)?;

        for (i, (label, color)) in self.entries.iter().enumerate() {
            let cy = y0 + PADDING + line_height * (i as i32 + 1) + line_height / 2;
            let marker_x = x0 + PADDING + MARKER_RADIUS;
            root.draw(&Circle::new(
                (marker_x, cy),
                MARKER_RADIUS,
                rgb(*color).stroke_width(2),
            ))
            .map_err(render_error)?;
            root.draw(&Text::new(
                label.as_str(),
                (marker_x + MARKER_RADIUS + 10, cy),
                entry_style.pos(Pos::new(HPos::Left, VPos::Center)),
            ))
            .map_err(render_error)?;
        }
        Ok(())
    }
}

/// A bordered box with a bold heading followed by plain lines.
pub struct TextBox<'a> {
    pub heading: &'a str,
    pub lines: &'a [String],
    pub theme: &'a ChartTheme,
}

impl<'a> TextBox<'a> {
    pub fn new(heading: &'a str, lines: &'a [String], theme: &'a ChartTheme) -> Self {
        Self {
            heading,
            lines,
            theme,
        }
    }

    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, at: Anchor) -> Result<()> {
        let heading_style = self.theme.bold(self.theme.body_size);
        let line_style = self.theme.text(self.theme.body_size);
        let line_height = (self.theme.body_size * 1.3) as i32;

        let mut width = text_width(root, self.heading, &heading_style)?;
        for line in self.lines {
            width = width.max(text_width(root, line, &line_style)?);
        }
        let width = width + PADDING * 2;
        let height = line_height * (self.lines.len() as i32 + 1) + PADDING * 2;
        let (x0, y0) = at.origin(width, height);

        draw_box(root, self.theme, (x0, y0), (width, height))?;

        let left = x0 + PADDING;
        root.draw(&Text::new(
            self.heading,
            (left, y0 + PADDING),
            heading_style.pos(Pos::new(HPos::Left, VPos::Top)),
        ))
        .map_err(render_error)?;
        for (i, line) in self.lines.iter().enumerate() {
            root.draw(&Text::new(
                line.as_str(),
                (left, y0 + PADDING + line_height * (i as i32 + 1)),
                line_style.pos(Pos::new(HPos::Left, VPos::Top)),
            ))
            .map_err(render_error)?;
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn text_width<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    text: &str,
    style: &TextStyle,
) -> Result<i32> {
    let (w, _) = root.estimate_text_size(text, style).map_err(render_error)?;
    Ok(w as i32)
}

fn draw_box<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    theme: &ChartTheme,
    (x0, y0): (i32, i32),
    (w, h): (i32, i32),
) -> Result<()> {
    root.draw(&Rectangle::new([(x0, y0), (x0 + w, y0 + h)], rgb(theme.paper).filled()))
        .map_err(render_error)?;
    root.draw(&Rectangle::new([(x0, y0), (x0 + w, y0 + h)], rgb(theme.axis).stroke_width(1)))
        .map_err(render_error)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
