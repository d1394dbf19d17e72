use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use sismo_core::error::Result;

use crate::export::render_error;
use crate::themes::ChartTheme;

/// Text drawn around every chart: a centered title, and a footer row with
/// the source note on the left, a caption in the middle and the attribution
/// tag on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartAnnotations {
    /// May span several lines separated by `\n`.
    pub title: String,
    pub caption: String,
    pub source_note: String,
    pub attribution: String,
}

impl ChartAnnotations {
    pub fn new(
        title: impl Into<String>,
        caption: impl Into<String>,
        source_note: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            caption: caption.into(),
            source_note: source_note.into(),
            attribution: attribution.into(),
        }
    }

    pub fn title_lines(&self) -> Vec<&str> {
        self.title.lines().filter(|l| !l.trim().is_empty()).collect()
    }

    /// Draw the title and footer row onto the full canvas.
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        theme: &ChartTheme,
    ) -> Result<()> {
        let center_x = theme.width as i32 / 2;
        let title_style = theme
            .bold(theme.title_size)
            .pos(Pos::new(HPos::Center, VPos::Top));
        let line_height = (theme.title_size * 1.3) as i32;
        for (i, line) in self.title_lines().into_iter().enumerate() {
            root.draw(&Text::new(
                line,
                (center_x, 18 + i as i32 * line_height),
                title_style.clone(),
            ))
            .map_err(render_error)?;
        }

        let [left, middle, right] = footer_anchors(theme);
        let footer = |h: HPos| theme.text(theme.body_size).pos(Pos::new(h, VPos::Center));
        root.draw(&Text::new(self.source_note.as_str(), left, footer(HPos::Left)))
            .map_err(render_error)?;
        root.draw(&Text::new(self.caption.as_str(), middle, footer(HPos::Center)))
            .map_err(render_error)?;
        root.draw(&Text::new(self.attribution.as_str(), right, footer(HPos::Right)))
            .map_err(render_error)?;
        Ok(())
    }
}

/// Pixel anchors of the left, centered and right footer texts.
pub fn footer_anchors(theme: &ChartTheme) -> [(i32, i32); 3] {
    let w = theme.width as f64;
    let y = theme.height as i32 - (theme.bottom_margin as i32 / 3).max(20);
    [
        ((w * 0.04) as i32, y),
        ((w * 0.5) as i32, y),
        ((w * 0.96) as i32, y),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
