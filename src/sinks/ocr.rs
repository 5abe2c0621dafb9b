//! OCR through the system tesseract binary, driven by rusty-tesseract.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use rusty_tesseract::{Args, Image};

/// Tesseract struggles with text under ~10px tall, so small crops get enlarged first.
pub fn upscale_factor(width: u32, height: u32) -> u32 {
    match width.min(height) {
        0..=99 => 4,
        100..=199 => 2,
        _ => 1,
    }
}

pub fn extract_text(img: &RgbaImage, lang: &str) -> Result<String> {
    let factor = upscale_factor(img.width(), img.height());
    let prepared = if factor > 1 {
        log::debug!("upscaling {}x{} image {}x for OCR", img.width(), img.height(), factor);
        image::imageops::resize(
            img,
            img.width() * factor,
            img.height() * factor,
            FilterType::Lanczos3,
        )
    } else {
        img.clone()
    };

    // rusty-tesseract reads from disk; keep the file alive until it has run
    let file = tempfile::Builder::new()
        .prefix("cloudshot-ocr-")
        .suffix(".png")
        .tempfile()
        .context("failed to create temporary OCR image")?;
    prepared
        .save_with_format(file.path(), image::ImageFormat::Png)
        .context("failed to encode OCR image")?;

    let tess_img = Image::from_path(file.path())
        .map_err(|e| anyhow::anyhow!("failed to load OCR image: {}", e))?;
    let dpi = if factor > 1 { 300 } else { 150 };
    let args = Args {
        lang: lang.to_string(),
        dpi: Some(dpi),
        ..Args::default()
    };

    log::info!("running tesseract ({}) on {}x{} image", lang, prepared.width(), prepared.height());
    let text = rusty_tesseract::image_to_string(&tess_img, &args)
        .map_err(|e| anyhow::anyhow!("tesseract failed: {}", e))?;
    Ok(text.trim().to_string())
}
