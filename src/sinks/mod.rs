//! Destinations for the captured region.

pub mod clipboard;
pub mod file;
pub mod ocr;
pub mod upload;

use anyhow::Result;
use image::RgbaImage;

use crate::config::Config;
use crate::shortcuts::Action;

/// Sends `image` to the sink behind `action`. Non-terminal actions are a no-op.
pub fn dispatch(action: Action, image: &RgbaImage, config: &Config) -> Result<()> {
    log::info!("dispatching {:?} for {}x{} image", action, image.width(), image.height());
    match action {
        Action::CopyImage => clipboard::copy_image(image),
        Action::SaveFile => file::save_with_dialog(image).map(|_| ()),
        Action::CopyText => {
            let text = ocr::extract_text(image, &config.ocr_lang)?;
            clipboard::copy_text(&text)
        }
        Action::Upload => {
            let link = upload::upload(image, config)?;
            clipboard::copy_text(&link)
        }
        Action::ToggleAnnotate | Action::Quit => Ok(()),
    }
}
