//! Hands a temporary PNG to an external transfer command and builds the public link.

use std::process::Command;

use anyhow::{Context, Result};
use image::RgbaImage;

use crate::config::Config;
use crate::error::CaptureError;

/// Expands `{file}` and `{name}` in `template`. Without a `{file}` placeholder the
/// quoted path is appended as the last argument.
pub fn expand_command(template: &str, path: &str, name: &str) -> String {
    let quoted = shell_quote(path);
    if template.contains("{file}") {
        template.replace("{file}", &quoted).replace("{name}", name)
    } else {
        format!("{} {}", template.replace("{name}", name), quoted)
    }
}

pub fn share_link(base_url: &str, name: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), name)
}

#[cfg(not(windows))]
fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

#[cfg(windows)]
fn shell_quote(arg: &str) -> String {
    format!("\"{}\"", arg)
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Runs the configured transfer command on a temporary copy of `image` and
/// returns the shareable link. The temporary file is gone when this returns.
pub fn upload(image: &RgbaImage, config: &Config) -> Result<String> {
    let template = config.upload_command()?;
    let base_url = config.base_url()?;

    let file = tempfile::Builder::new()
        .prefix("cloudshot_")
        .suffix(".png")
        .tempfile()
        .context("failed to create temporary upload file")?;
    image
        .save_with_format(file.path(), image::ImageFormat::Png)
        .context("failed to encode upload image")?;

    let name = file
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("temporary file has no name")?;
    let command = expand_command(template, &file.path().to_string_lossy(), &name);
    log::info!("running transfer command: {}", command);

    let status = shell(&command)
        .status()
        .with_context(|| format!("failed to spawn transfer command `{}`", command))?;
    if !status.success() {
        return Err(CaptureError::TransferFailed { status }.into());
    }
    file.close().context("failed to remove temporary upload file")?;

    let link = share_link(base_url, &name);
    log::info!("uploaded as {}", link);
    Ok(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn file_placeholder_is_replaced() {
        assert_eq!(
            expand_command("scp {file} host:/srv/{name}", "/tmp/cloudshot_ab.png", "cloudshot_ab.png"),
            "scp '/tmp/cloudshot_ab.png' host:/srv/cloudshot_ab.png"
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn path_is_appended_without_placeholder() {
        assert_eq!(
            expand_command("rclone copy", "/tmp/x.png", "x.png"),
            "rclone copy '/tmp/x.png'"
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn quotes_in_paths_are_escaped() {
        assert_eq!(shell_quote("/tmp/it's.png"), r"'/tmp/it'\''s.png'");
    }

    #[test]
    fn link_joins_base_and_name() {
        assert_eq!(share_link("https://s.example.com/", "a.png"), "https://s.example.com/a.png");
        assert_eq!(share_link("https://s.example.com/shots", "a.png"), "https://s.example.com/shots/a.png");
    }

    #[cfg(not(windows))]
    #[test]
    fn failing_command_is_an_error() {
        let config = Config::from_lookup(|key| match key {
            crate::config::UPLOAD_CMD_VAR => Some("test -f {file} && false".to_string()),
            crate::config::BASE_URL_VAR => Some("https://s.example.com".to_string()),
            _ => None,
        });
        let img = RgbaImage::new(2, 2);
        let err = upload(&img, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CaptureError>(),
            Some(CaptureError::TransferFailed { .. })
        ));
    }

    #[cfg(not(windows))]
    #[test]
    fn successful_command_yields_link() {
        let config = Config::from_lookup(|key| match key {
            crate::config::UPLOAD_CMD_VAR => Some("test -f {file}".to_string()),
            crate::config::BASE_URL_VAR => Some("https://s.example.com/".to_string()),
            _ => None,
        });
        let link = upload(&RgbaImage::new(2, 2), &config).unwrap();
        assert!(link.starts_with("https://s.example.com/cloudshot_"));
        assert!(link.ends_with(".png"));
    }
}
