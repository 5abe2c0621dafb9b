#![windows_subsystem = "windows"]

use anyhow::Result;
use druid::{AppLauncher, WindowDesc};

mod annotation;
mod config;
mod error;
mod frame;
mod overlay;
mod render;
mod selection_logic;
mod shortcuts;
mod sinks;

use config::Config;
use frame::CapturedFrame;
use overlay::{AppState, OverlayWidget};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env();
    let frame = CapturedFrame::capture_primary()?;
    let logical = frame.logical_size();

    let init = AppState::new(frame, config);
    let window = WindowDesc::new(OverlayWidget::new())
        .title("ScreenShot")
        .window_size(logical)
        .set_position((0.0, 0.0))
        .show_titlebar(false)
        .resizable(false)
        .set_always_on_top(true);
    AppLauncher::with_window(window).launch(init)?;
    Ok(())
}
