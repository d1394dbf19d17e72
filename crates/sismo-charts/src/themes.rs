use plotters::style::{FontDesc, FontFamily, FontStyle, RGBColor, TextStyle};
use sismo_core::color::Rgb;

/// Convert a core [`Rgb`] into the plotters color type.
pub fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Canvas size, colors and type sizes of one chart kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub width: u32,
    pub height: u32,

    // ── Colors ───────────────────────────────────────────────────────────────
    /// Canvas background outside the plot area.
    pub paper: Rgb,
    /// Plot area background.
    pub plot: Rgb,
    pub font: Rgb,
    /// Axis lines and borders.
    pub axis: Rgb,
    /// Horizontal grid lines, drawn only when set.
    pub grid: Option<Rgb>,

    // ── Type sizes (px) ──────────────────────────────────────────────────────
    pub title_size: f64,
    pub body_size: f64,
    pub tick_size: f64,
    /// Text inside markers or above bars.
    pub marker_text_size: f64,

    // ── Layout (px) ──────────────────────────────────────────────────────────
    /// Space reserved above the plot area for the title.
    pub top_margin: u32,
    /// Space reserved below the plot area for the axis caption and footers.
    pub bottom_margin: u32,
    pub side_margin: u32,
}

impl ChartTheme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Monthly magnitude bars, 1280×720.
    pub fn bars() -> Self {
        Self {
            width: 1280,
            height: 720,
            paper: Rgb::from_u32(0x20252f),
            plot: Rgb::from_u32(0x1e1e1e),
            font: Rgb::WHITE,
            axis: Rgb::WHITE,
            grid: Some(Rgb::from_u32(0x3a3f4b)),
            title_size: 24.0,
            body_size: 18.0,
            tick_size: 14.0,
            marker_text_size: 28.0,
            top_margin: 80,
            bottom_margin: 110,
            side_margin: 100,
        }
    }

    /// Strip plot of strong events per month, 1280×720.
    pub fn strip() -> Self {
        Self {
            paper: Rgb::from_u32(0x1e1e1e),
            plot: Rgb::from_u32(0x20252f),
            marker_text_size: 14.0,
            ..Self::bars()
        }
    }

    /// Top-10 circle grid, 1280×1600.
    pub fn top10() -> Self {
        Self {
            width: 1280,
            height: 1600,
            paper: Rgb::from_u32(0x331d2c),
            plot: Rgb::from_u32(0x331d2c),
            font: Rgb::WHITE,
            axis: Rgb::WHITE,
            grid: None,
            title_size: 30.0,
            body_size: 22.0,
            tick_size: 22.0,
            marker_text_size: 20.0,
            top_margin: 130,
            bottom_margin: 110,
            side_margin: 110,
        }
    }

    /// Top-8 circle grid, 1080×1920.
    pub fn top8() -> Self {
        Self {
            width: 1080,
            height: 1920,
            paper: Rgb::from_u32(0x541212),
            plot: Rgb::from_u32(0x0f0e0e),
            marker_text_size: 18.0,
            title_size: 28.0,
            ..Self::top10()
        }
    }

    /// Mexico City epicenter map, 1280×1280.
    pub fn city_map() -> Self {
        Self {
            width: 1280,
            height: 1280,
            paper: Rgb::from_u32(0x16213e),
            plot: Rgb::from_u32(0x1a1a2e),
            font: Rgb::WHITE,
            axis: Rgb::WHITE,
            grid: None,
            title_size: 24.0,
            body_size: 18.0,
            tick_size: 14.0,
            marker_text_size: 16.0,
            top_margin: 90,
            bottom_margin: 90,
            side_margin: 40,
        }
    }

    // ── Fonts ────────────────────────────────────────────────────────────────

    pub fn text(&self, size: f64) -> TextStyle<'static> {
        FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal).color(&rgb(self.font))
    }

    pub fn bold(&self, size: f64) -> TextStyle<'static> {
        FontDesc::new(FontFamily::SansSerif, size, FontStyle::Bold).color(&rgb(self.font))
    }

    // ── Layout ───────────────────────────────────────────────────────────────

    /// Pixel rectangle `(left, top, right, bottom)` of the plot area.
    pub fn plot_rect(&self) -> (i32, i32, i32, i32) {
        (
            self.side_margin as i32,
            self.top_margin as i32,
            (self.width - self.side_margin / 2) as i32,
            (self.height - self.bottom_margin) as i32,
        )
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
