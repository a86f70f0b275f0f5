//! PNG output for rendered buffers.

use anyhow::{Context, Result};
use image::RgbImage;
use lume_render::ImageBuffer;

/// Write `image` as an 8-bit gamma-encoded PNG.
pub fn save_png(image: &ImageBuffer, path: &str) -> Result<()> {
    let bytes = image.to_rgb8();
    let png = RgbImage::from_raw(image.width, image.height, bytes)
        .context("image dimensions do not match the pixel buffer")?;
    png.save(path)
        .with_context(|| format!("failed to write {path}"))?;
    Ok(())
}
