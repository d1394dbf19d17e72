//! Off-screen drawing and PNG export.
//!
//! Charts are drawn into an in-memory RGB buffer, encoded as PNG next to the
//! destination and renamed into place, so a failed run never leaves a
//! truncated image behind.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use sismo_core::error::{Result, SismoError};
use tracing::{debug, info};

/// Wrap any plotters error as [`SismoError::Render`].
pub fn render_error<E: Display>(err: E) -> SismoError {
    SismoError::Render(err.to_string())
}

/// Draw a `width`×`height` image with `draw` and write it to `path` as PNG.
pub fn render_png<F>(path: &Path, width: u32, height: u32, draw: F) -> Result<()>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
{
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw(&root)?;
        root.present().map_err(render_error)?;
    }

    let image = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| SismoError::Image(format!("buffer does not fit {width}x{height}")))?;
    save_atomically(&image, path)?;
    info!("Wrote {} ({width}x{height})", path.display());
    Ok(())
}

/// Encode `image` to a sibling temporary file, then rename it over `path`.
pub(crate) fn save_atomically(image: &RgbImage, path: &Path) -> Result<()> {
    let temp = temp_path(path);
    debug!("Encoding {}", temp.display());

    if let Err(err) = image.save_with_format(&temp, ImageFormat::Png) {
        let _ = std::fs::remove_file(&temp);
        return Err(SismoError::Image(format!("{}: {err}", path.display())));
    }
    if let Err(err) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(err.into());
    }
    Ok(())
}

/// `dir/.name.png.tmp` for `dir/name.png`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chart.png".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
