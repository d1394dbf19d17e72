//! Vertical stacking of rendered PNGs into one tall image.

use std::path::{Path, PathBuf};

use image::RgbImage;
use sismo_core::error::{Result, SismoError};
use tracing::info;

use crate::export::save_atomically;

/// Concatenate `inputs` top to bottom into `output`.
///
/// Every input must have the same width; nothing is scaled or cropped. The
/// output height is the sum of the input heights.
pub fn stack_vertically(inputs: &[PathBuf], output: &Path) -> Result<()> {
    if inputs.is_empty() {
        return Err(SismoError::EmptyComposite);
    }

    let images = inputs
        .iter()
        .map(|path| open_rgb(path))
        .collect::<Result<Vec<_>>>()?;

    let width = images[0].width();
    for (path, img) in inputs.iter().zip(&images) {
        if img.width() != width {
            return Err(SismoError::ImageWidthMismatch {
                path: path.clone(),
                expected: width,
                found: img.width(),
            });
        }
    }

    let height = images.iter().map(|img| img.height()).sum();
    let mut canvas = RgbImage::new(width, height);
    let mut y = 0i64;
    for img in &images {
        image::imageops::replace(&mut canvas, img, 0, y);
        y += img.height() as i64;
    }

    save_atomically(&canvas, output)?;
    info!(
        "Stacked {} images into {} ({width}x{height})",
        inputs.len(),
        output.display()
    );
    Ok(())
}

fn open_rgb(path: &Path) -> Result<RgbImage> {
    if !path.exists() {
        return Err(SismoError::InputNotFound(path.to_path_buf()));
    }
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|err| SismoError::Image(format!("{}: {err}", path.display())))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
