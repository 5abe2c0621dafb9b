// Clipboard helpers
use anyhow::{Context, Result};
use arboard::{Clipboard, ImageData};
use image::RgbaImage;

/// On X11/Wayland the selection dies with its owner. The process exits right
/// after copying, so keep serving it until a clipboard manager (or another
/// copy) takes over, or this much time has passed.
#[cfg(target_os = "linux")]
const LINUX_HOLD: std::time::Duration = std::time::Duration::from_secs(30);

pub fn copy_image(image: &RgbaImage) -> Result<()> {
    let mut clipboard = Clipboard::new().context("failed to open clipboard")?;
    let image_data = ImageData {
        width: image.width() as usize,
        height: image.height() as usize,
        bytes: image.as_raw().into(),
    };
    set_image(&mut clipboard, image_data)?;
    log::info!("copied {}x{} image to clipboard", image.width(), image.height());
    Ok(())
}

pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("failed to open clipboard")?;
    set_text(&mut clipboard, text)?;
    log::info!("copied {} chars to clipboard", text.chars().count());
    Ok(())
}

#[cfg(target_os = "linux")]
fn set_image(clipboard: &mut Clipboard, data: ImageData<'_>) -> Result<()> {
    use arboard::SetExtLinux;
    let deadline = std::time::Instant::now() + LINUX_HOLD;
    clipboard.set().wait_until(deadline).image(data)?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn set_image(clipboard: &mut Clipboard, data: ImageData<'_>) -> Result<()> {
    clipboard.set_image(data)?;
    Ok(())
}

#[cfg(target_os = "linux")]
fn set_text(clipboard: &mut Clipboard, text: &str) -> Result<()> {
    use arboard::SetExtLinux;
    let deadline = std::time::Instant::now() + LINUX_HOLD;
    clipboard.set().wait_until(deadline).text(text)?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn set_text(clipboard: &mut Clipboard, text: &str) -> Result<()> {
    clipboard.set_text(text)?;
    Ok(())
}
