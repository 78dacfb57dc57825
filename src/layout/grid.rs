use std::collections::{HashMap, HashSet};

use super::types::Rect;

/// Spatial index for fast overlap queries during packing. Cells are keyed by
/// floor-divided coordinates; a rect registers in every cell it touches.
pub struct SlotGrid {
    cell: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl SlotGrid {
    pub fn new(cell: f32) -> Self {
        Self {
            cell: cell.max(16.0),
            cells: HashMap::new(),
        }
    }

    fn cell_span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let x0 = (rect.x / self.cell).floor() as i32;
        let y0 = (rect.y / self.cell).floor() as i32;
        let x1 = (rect.right() / self.cell).floor() as i32;
        let y1 = (rect.bottom() / self.cell).floor() as i32;
        (x0, y0, x1, y1)
    }

    pub fn insert(&mut self, idx: usize, rect: &Rect) {
        let (x0, y0, x1, y1) = self.cell_span(rect);
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                self.cells.entry((ix, iy)).or_default().push(idx);
            }
        }
    }

    /// Indices of previously inserted rects that could conflict with `rect`.
    /// Query with the margin-inflated candidate so margin-range neighbours in
    /// adjacent cells are always visited.
    pub fn query(&self, rect: &Rect) -> impl Iterator<Item = usize> + '_ {
        let (x0, y0, x1, y1) = self.cell_span(rect);
        let mut seen = HashSet::new();
        (x0..=x1)
            .flat_map(move |ix| (y0..=y1).map(move |iy| (ix, iy)))
            .flat_map(move |key| {
                self.cells
                    .get(&key)
                    .map(|v| v.as_slice())
                    .unwrap_or(&[])
                    .iter()
                    .copied()
            })
            .filter(move |idx| seen.insert(*idx))
    }
}
