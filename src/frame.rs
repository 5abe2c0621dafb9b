use anyhow::{Context, Result};
//  image v0.24.9
use image::{ImageBuffer, RgbaImage};
use xcap::Monitor;

use crate::error::CaptureError;
use crate::selection_logic::CropRegion;

/// The one snapshot taken at startup. Every crop reads from it; nothing writes to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    image: RgbaImage,
    /// Physical pixels per logical unit of the captured monitor.
    scale_factor: f64,
}

impl CapturedFrame {
    pub fn capture_primary() -> Result<Self> {
        let mons = Monitor::all().context("failed to enumerate monitors")?;
        let mon = mons.first().ok_or(CaptureError::NoMonitor)?;
        let scale_factor = match mon.scale_factor() {
            Ok(f) if f > 0.0 => f as f64,
            Ok(_) => 1.0,
            Err(e) => {
                log::warn!("monitor scale factor unavailable, assuming 1.0: {}", e);
                1.0
            }
        };
        let img = mon.capture_image().context("failed to capture monitor")?;
        let (w, h) = (img.width(), img.height());
        // xcap links its own image version, go through raw bytes
        let raw = img.into_raw();
        let buf = ImageBuffer::from_raw(w, h, raw).ok_or(CaptureError::FrameConversion)?;
        log::info!("captured {}x{} frame at scale {}", w, h, scale_factor);
        Ok(Self::with_scale(buf, scale_factor))
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        Self::with_scale(image, 1.0)
    }

    pub fn with_scale(image: RgbaImage, scale_factor: f64) -> Self {
        CapturedFrame { image, scale_factor }
    }

    /// Size of the monitor in logical units, i.e. the overlay window size.
    pub fn logical_size(&self) -> (f64, f64) {
        (
            self.width() as f64 / self.scale_factor,
            self.height() as f64 / self.scale_factor,
        )
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    /// Copies `region` out of the frame, clamped to the frame bounds.
    pub fn crop(&self, region: &CropRegion) -> RgbaImage {
        image::imageops::crop_imm(&self.image, region.x, region.y, region.width, region.height)
            .to_image()
    }
}
