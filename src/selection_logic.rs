// src/selection_logic.rs
// Pure selection state, no GUI types here.

/// Pixels trimmed from every side of the dragged rectangle so the white outline is not captured.
pub const BORDER: i32 = 2;

/// A point in frame pixel coordinates.
pub type Pos = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// 裁剪区域 (frame pixels)
pub struct CropRegion { pub x: u32, pub y: u32, pub width: u32, pub height: u32 }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: Pos,
    pub end: Pos,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn press(&mut self, p: Pos) {
        self.start = p;
        self.end = p;
    }

    pub fn drag(&mut self, p: Pos) {
        self.end = p;
    }

    pub fn release(&mut self, p: Pos) {
        self.end = p;
    }

    /// Nothing has been dragged yet, so nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Normalised `(x0, y0, x1, y1)` of the rectangle between the two points.
    pub fn outline(&self) -> (i32, i32, i32, i32) {
        let (sx, sy) = self.start;
        let (ex, ey) = self.end;
        (sx.min(ex), sy.min(ey), sx.max(ex), sy.max(ey))
    }

    /// Region to cut out of the frame, or `None` when the inset leaves no pixels.
    /// A corner left of or above the frame is clipped, the far edges stay put.
    pub fn crop_region(&self) -> Option<CropRegion> {
        let (x0, y0, x1, y1) = self.outline();
        let left = (x0 + BORDER).max(0);
        let top = (y0 + BORDER).max(0);
        let width = x1 - left;
        let height = y1 - top;
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(CropRegion {
            x: left as u32,
            y: top as u32,
            width: width as u32,
            height: height as u32,
        })
    }
}
