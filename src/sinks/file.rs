use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use image::RgbaImage;

pub fn default_file_name(now: DateTime<Local>) -> String {
    now.format("cloudshot_%d-%m-%Y_%H-%M-%S.png").to_string()
}

/// Asks for a destination and writes a PNG there. Returns `false` when the dialog was cancelled.
pub fn save_with_dialog(image: &RgbaImage) -> Result<bool> {
    let picked = rfd::FileDialog::new()
        .set_title("Save Screenshot")
        .set_file_name(default_file_name(Local::now()))
        .add_filter("PNG files", &["png"])
        .add_filter("All Files", &["*"])
        .save_file();
    match picked {
        Some(path) => {
            save_png(image, &path)?;
            Ok(true)
        }
        None => {
            log::info!("save dialog cancelled");
            Ok(false)
        }
    }
}

pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("saved screenshot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use image::Rgba;

    #[test]
    fn default_name_carries_timestamp() {
        let now = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(default_file_name(now), "cloudshot_07-03-2024_09-05-01.png");
    }

    #[test]
    fn png_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));

        save_png(&img, &path).unwrap();
        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back, img);
    }
}
