//! Burns annotation strokes into a cropped image using tiny-skia.

use image::RgbaImage;
use tiny_skia::{IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::annotation::Strokes;

pub const STROKE_WIDTH: f32 = 3.0;
pub const STROKE_RGBA: [u8; 4] = [255, 0, 0, 255];

/// Draws `strokes` onto `img`. Stroke points are in frame pixels; `origin` is
/// the frame position of the image's top-left pixel.
pub fn draw_strokes(img: &mut RgbaImage, strokes: &Strokes, origin: (u32, u32)) {
    if strokes.iter_segments().next().is_none() {
        return;
    }
    let Some(size) = IntSize::from_wh(img.width(), img.height()) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    let (ox, oy) = (origin.0 as f32, origin.1 as f32);
    let mut paint = Paint::default();
    let [r, g, b, a] = STROKE_RGBA;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    let stroke = Stroke {
        width: STROKE_WIDTH,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };

    for line in strokes.lines().iter().filter(|l| l.len() > 1) {
        let mut pb = PathBuilder::new();
        let (x, y) = line[0];
        pb.move_to(x as f32 - ox, y as f32 - oy);
        for &(x, y) in &line[1..] {
            pb.line_to(x as f32 - ox, y as f32 - oy);
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    img.copy_from_slice(pixmap.data());
}
