//! Freehand strokes drawn over the selection.

use crate::selection_logic::Pos;

/// Ordered point-lists. The last list is the one being drawn into; an empty
/// list separates strokes so their ends are never joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strokes {
    lines: Vec<Vec<Pos>>,
}

impl Default for Strokes {
    fn default() -> Self {
        Self::new()
    }
}

impl Strokes {
    pub fn new() -> Self {
        Strokes { lines: vec![Vec::new()] }
    }

    /// Called whenever annotation mode flips on or off.
    pub fn toggle_separator(&mut self) {
        self.lines.push(Vec::new());
    }

    pub fn add_point(&mut self, p: Pos) {
        match self.lines.last_mut() {
            Some(line) => line.push(p),
            None => self.lines.push(vec![p]),
        }
    }

    pub fn end_stroke(&mut self) {
        self.lines.push(Vec::new());
    }

    pub fn lines(&self) -> &[Vec<Pos>] {
        &self.lines
    }

    /// Consecutive point pairs of every stroke.
    pub fn iter_segments(&self) -> impl Iterator<Item = (Pos, Pos)> + '_ {
        self.lines
            .iter()
            .flat_map(|line| line.windows(2).map(|w| (w[0], w[1])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_appends_one_empty_list() {
        let mut strokes = Strokes::new();
        strokes.add_point((1, 1));
        strokes.add_point((2, 2));
        for _ in 0..3 {
            let before = strokes.lines().len();
            strokes.toggle_separator();
            assert_eq!(strokes.lines().len(), before + 1);
            assert!(strokes.lines().last().unwrap().is_empty());
        }
    }

    #[test]
    fn segments_never_cross_stroke_boundaries() {
        let mut strokes = Strokes::new();
        strokes.add_point((0, 0));
        strokes.add_point((10, 0));
        strokes.end_stroke();
        strokes.add_point((50, 50));
        strokes.add_point((60, 60));
        strokes.add_point((70, 50));

        let segments: Vec<_> = strokes.iter_segments().collect();
        assert_eq!(
            segments,
            vec![
                ((0, 0), (10, 0)),
                ((50, 50), (60, 60)),
                ((60, 60), (70, 50)),
            ]
        );
    }

    #[test]
    fn single_points_have_no_segments() {
        let mut strokes = Strokes::new();
        strokes.add_point((4, 4));
        strokes.end_stroke();
        assert_eq!(strokes.lines(), &[vec![(4, 4)], vec![]]);
        assert_eq!(strokes.iter_segments().count(), 0);
    }
}
