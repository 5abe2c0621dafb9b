use std::sync::Arc;

use anyhow::Result;
use druid::kurbo::Line;
use druid::piet::{ImageFormat, InterpolationMode, PietImage};
use druid::{
    BoxConstraints, Color, Cursor, Data, Env, Event, EventCtx, LayoutCtx, LifeCycle, LifeCycleCtx,
    PaintCtx, Point, Rect, RenderContext, Size, UpdateCtx, Widget, WindowState,
};
use image::RgbaImage;
use rfd::MessageDialog;

use crate::annotation::Strokes;
use crate::config::Config;
use crate::error::CaptureError;
use crate::frame::CapturedFrame;
use crate::render::{self, STROKE_WIDTH};
use crate::selection_logic::{Pos, Selection};
use crate::shortcuts::{self, Action};
use crate::sinks;

const OUTLINE_WIDTH: f64 = 3.0;

/// What the overlay does after a shortcut.
#[derive(Debug)]
pub enum Step {
    Redraw,
    Quit,
    /// Hand the output (or the reason there is none) to a sink, then quit.
    Deliver(Result<RgbaImage>),
}

#[derive(Clone, Data)]
pub struct AppState {
    frame: Arc<CapturedFrame>,
    config: Arc<Config>,
    #[data(same_fn = "PartialEq::eq")]
    pub selection: Selection,
    #[data(same_fn = "PartialEq::eq")]
    pub strokes: Strokes,
    pub annotating: bool,
    dragging: bool,
}

impl AppState {
    pub fn new(frame: CapturedFrame, config: Config) -> Self {
        AppState {
            frame: Arc::new(frame),
            config: Arc::new(config),
            selection: Selection::new(),
            strokes: Strokes::new(),
            annotating: false,
            dragging: false,
        }
    }

    pub fn toggle_annotating(&mut self) {
        self.annotating = !self.annotating;
        self.strokes.toggle_separator();
        log::debug!("annotation mode {}", if self.annotating { "on" } else { "off" });
    }

    pub fn pointer_down(&mut self, p: Pos) {
        self.dragging = true;
        if self.annotating {
            self.strokes.add_point(p);
        } else {
            self.selection.press(p);
        }
    }

    pub fn pointer_move(&mut self, p: Pos) {
        if !self.dragging {
            return;
        }
        if self.annotating {
            self.strokes.add_point(p);
        } else {
            self.selection.drag(p);
        }
    }

    pub fn pointer_up(&mut self, p: Pos) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        if self.annotating {
            self.strokes.add_point(p);
            self.strokes.end_stroke();
        } else {
            self.selection.release(p);
            log::debug!("selection {:?}", self.selection.crop_region());
        }
    }

    pub fn apply(&mut self, action: Action) -> Step {
        if !action.is_terminal() {
            self.toggle_annotating();
            return Step::Redraw;
        }
        if action == Action::Quit {
            return Step::Quit;
        }
        Step::Deliver(self.render_output())
    }

    /// Crops the frame to the selection and burns the strokes into the copy.
    pub fn render_output(&self) -> Result<RgbaImage> {
        let region = self.selection.crop_region().ok_or(CaptureError::EmptySelection)?;
        let mut img = self.frame.crop(&region);
        render::draw_strokes(&mut img, &self.strokes, (region.x, region.y));
        Ok(img)
    }
}

/// Frame pixels per logical window unit, per axis.
pub fn frame_scale(size: Size, frame_w: u32, frame_h: u32) -> (f64, f64) {
    let axis = |px: u32, logical: f64| if logical > 0.0 { px as f64 / logical } else { 1.0 };
    (axis(frame_w, size.width), axis(frame_h, size.height))
}

pub fn to_frame_pos(pos: Point, scale: (f64, f64)) -> Pos {
    ((pos.x * scale.0).round() as i32, (pos.y * scale.1).round() as i32)
}

fn to_logical(p: Pos, scale: (f64, f64)) -> Point {
    Point::new(p.0 as f64 / scale.0, p.1 as f64 / scale.1)
}

fn report(err: &anyhow::Error) {
    log::error!("{:#}", err);
    MessageDialog::new()
        .set_title("cloudshot")
        .set_description(format!("{:#}", err))
        .show();
}

// Widget implementation
pub struct OverlayWidget {
    cached_image: Option<PietImage>,
}

impl OverlayWidget {
    pub fn new() -> Self {
        OverlayWidget { cached_image: None }
    }

    fn run(&self, ctx: &mut EventCtx, data: &mut AppState, action: Action) {
        match data.apply(action) {
            Step::Redraw => {
                ctx.request_paint();
                return;
            }
            Step::Quit => {}
            Step::Deliver(Ok(img)) => {
                // the clipboard hand-off may block, get the overlay out of the way first
                ctx.window().clone().set_window_state(WindowState::Minimized);
                if let Err(e) = sinks::dispatch(action, &img, &data.config) {
                    report(&e);
                }
            }
            Step::Deliver(Err(e)) => report(&e),
        }
        ctx.submit_command(druid::commands::QUIT_APP);
    }
}

impl Widget<AppState> for OverlayWidget {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        let scale = frame_scale(ctx.size(), data.frame.width(), data.frame.height());
        match event {
            Event::WindowConnected => ctx.request_focus(),
            Event::MouseDown(e) if e.button.is_left() => {
                ctx.set_active(true);
                data.pointer_down(to_frame_pos(e.pos, scale));
                ctx.request_paint();
            }
            Event::MouseMove(e) => {
                ctx.set_cursor(&Cursor::Crosshair);
                if data.dragging {
                    data.pointer_move(to_frame_pos(e.pos, scale));
                    ctx.request_paint();
                }
            }
            Event::MouseUp(e) if e.button.is_left() => {
                ctx.set_active(false);
                data.pointer_up(to_frame_pos(e.pos, scale));
                ctx.request_paint();
            }
            Event::KeyDown(k) => {
                if let Some(action) = shortcuts::handle_key_event(&k.key, k.mods) {
                    self.run(ctx, data, action);
                }
            }
            _ => {}
        }
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, _data: &AppState, _env: &Env) {
        if let LifeCycle::WidgetAdded = event {
            ctx.register_for_focus();
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old: &AppState, data: &AppState, _env: &Env) {
        if !Arc::ptr_eq(&old.frame, &data.frame) {
            self.cached_image = None;
        }
        if !old.same(data) {
            ctx.request_paint();
        }
    }

    fn layout(&mut self, _ctx: &mut LayoutCtx, bc: &BoxConstraints, data: &AppState, _env: &Env) -> Size {
        bc.constrain(Size::new(data.frame.width() as f64, data.frame.height() as f64))
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState, _env: &Env) {
        let size = ctx.size();
        let full_rect = size.to_rect();
        let scale = frame_scale(size, data.frame.width(), data.frame.height());

        if self.cached_image.is_none() {
            let (w, h) = (data.frame.width(), data.frame.height());
            self.cached_image = ctx
                .make_image(w as usize, h as usize, data.frame.as_rgba().as_raw(), ImageFormat::RgbaSeparate)
                .ok();
        }
        if let Some(img) = &self.cached_image {
            ctx.draw_image(img, full_rect, InterpolationMode::NearestNeighbor);
        }
        ctx.fill(full_rect, &Color::rgba8(0, 0, 0, 100));

        if !data.selection.is_empty() {
            let (x0, y0, x1, y1) = data.selection.outline();
            let src = Rect::new(x0 as f64, y0 as f64, x1 as f64, y1 as f64);
            let dst = Rect::from_points(to_logical((x0, y0), scale), to_logical((x1, y1), scale));
            if let Some(img) = &self.cached_image {
                ctx.draw_image_area(img, src, dst, InterpolationMode::NearestNeighbor);
            }
            ctx.stroke(dst, &Color::WHITE, OUTLINE_WIDTH);
        }

        for (a, b) in data.strokes.iter_segments() {
            let line = Line::new(to_logical(a, scale), to_logical(b, scale));
            ctx.stroke(line, &Color::RED, STROKE_WIDTH as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn state() -> AppState {
        let frame = RgbaImage::from_pixel(100, 80, Rgba([10, 20, 30, 255]));
        AppState::new(CapturedFrame::from_rgba(frame), Config::from_lookup(|_| None))
    }

    #[test]
    fn drag_defines_output_size() {
        let mut s = state();
        s.pointer_down((10, 10));
        s.pointer_move((30, 20));
        s.pointer_up((60, 50));
        let img = s.render_output().unwrap();
        assert_eq!(img.dimensions(), (48, 38));
    }

    #[test]
    fn click_without_drag_is_empty() {
        let mut s = state();
        s.pointer_down((10, 10));
        s.pointer_up((10, 10));
        let err = s.render_output().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CaptureError>(),
            Some(CaptureError::EmptySelection)
        ));
    }

    #[test]
    fn annotating_draws_instead_of_selecting() {
        let mut s = state();
        s.pointer_down((0, 0));
        s.pointer_up((90, 70));
        let selection = s.selection;

        s.toggle_annotating();
        s.pointer_down((20, 20));
        s.pointer_move((40, 20));
        s.pointer_up((60, 20));

        assert_eq!(s.selection, selection);
        assert_eq!(s.strokes.iter_segments().count(), 2);
        assert!(s.strokes.lines().last().unwrap().is_empty());

        let img = s.render_output().unwrap();
        // frame (40, 20) lands at (38, 18) after the 2px inset
        let hit = img.get_pixel(38, 18);
        assert!(hit[0] > 240 && hit[1] < 30 && hit[2] < 40, "{:?}", hit);
        assert_eq!(*img.get_pixel(38, 40), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn toggling_mode_adds_separator() {
        let mut s = state();
        let before = s.strokes.lines().len();
        s.toggle_annotating();
        s.toggle_annotating();
        assert!(!s.annotating);
        assert_eq!(s.strokes.lines().len(), before + 2);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut s = state();
        s.pointer_move((5, 5));
        s.pointer_up((50, 50));
        assert!(s.selection.is_empty());
    }

    #[test]
    fn output_leaves_frame_untouched() {
        let mut s = state();
        s.pointer_down((0, 0));
        s.pointer_up((50, 50));
        s.toggle_annotating();
        s.pointer_down((10, 10));
        s.pointer_up((30, 30));

        let before = s.frame.as_rgba().clone();
        let first = s.render_output().unwrap();
        let second = s.render_output().unwrap();
        assert_eq!(first, second);
        assert_eq!(*s.frame.as_rgba(), before);
    }

    #[test]
    fn every_sink_action_ends_in_delivery() {
        let mut s = state();
        for action in [Action::CopyImage, Action::SaveFile, Action::CopyText, Action::Upload] {
            assert!(matches!(s.apply(action), Step::Deliver(Err(_))));
        }
        s.pointer_down((0, 0));
        s.pointer_up((40, 40));
        match s.apply(Action::CopyImage) {
            Step::Deliver(Ok(img)) => assert_eq!(img.dimensions(), (38, 38)),
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn empty_selection_still_leads_to_exit() {
        let mut s = state();
        match s.apply(Action::SaveFile) {
            Step::Deliver(Err(e)) => assert!(matches!(
                e.downcast_ref::<CaptureError>(),
                Some(CaptureError::EmptySelection)
            )),
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn toggle_and_quit_steps() {
        let mut s = state();
        assert!(matches!(s.apply(Action::ToggleAnnotate), Step::Redraw));
        assert!(s.annotating);
        assert!(matches!(s.apply(Action::Quit), Step::Quit));
    }

    #[test]
    fn hidpi_drag_crops_physical_pixels() {
        let frame = CapturedFrame::with_scale(RgbaImage::new(400, 300), 2.0);
        let (lw, lh) = frame.logical_size();
        let scale = frame_scale(Size::new(lw, lh), frame.width(), frame.height());
        assert_eq!(scale, (2.0, 2.0));

        let mut s = AppState::new(frame, Config::from_lookup(|_| None));
        s.pointer_down(to_frame_pos(Point::new(10.0, 10.0), scale));
        s.pointer_move(to_frame_pos(Point::new(60.0, 40.0), scale));
        s.pointer_up(to_frame_pos(Point::new(110.0, 60.0), scale));

        assert_eq!(s.selection.outline(), (20, 20, 220, 120));
        let img = s.render_output().unwrap();
        assert_eq!(img.dimensions(), (198, 98));
    }

    #[test]
    fn pointer_is_scaled_to_frame_pixels() {
        let scale = frame_scale(Size::new(960.0, 540.0), 1920, 1080);
        assert_eq!(scale, (2.0, 2.0));
        assert_eq!(to_frame_pos(Point::new(10.4, 20.0), scale), (21, 40));
        assert_eq!(frame_scale(Size::ZERO, 10, 10), (1.0, 1.0));
    }
}
