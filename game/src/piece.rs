//! Tetromino shapes.
//!
//! A piece is a small row-major grid of cell colors. Non-rectangular shapes pad their bounding
//! box with empty cells (alpha 0), which never collide and never render.

use engine::graphics::{Color, Rect};
use serde::{Deserialize, Serialize};

pub const EMPTY: Color = [0, 0, 0, 0];
pub const MAX_PIECE_CELLS: usize = 6;

/// Occupancy is carried by the alpha channel.
pub const fn is_filled(cell: Color) -> bool {
    cell[3] > 0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    #[default]
    None,
    Stick,
    Box,
    LeftL,
    RightL,
    LeftZ,
    RightZ,
    T,
}

impl PieceKind {
    /// Every spawnable kind.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Stick,
        PieceKind::Box,
        PieceKind::LeftL,
        PieceKind::RightL,
        PieceKind::LeftZ,
        PieceKind::RightZ,
        PieceKind::T,
    ];

    /// Indexes into [`PieceKind::ALL`]; anything out of range is `None`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(PieceKind::None)
    }

    pub const fn color(self) -> Color {
        match self {
            PieceKind::None => EMPTY,
            PieceKind::Stick => [0, 229, 255, 255],
            PieceKind::Box => [255, 215, 0, 255],
            PieceKind::LeftL => [41, 98, 255, 255],
            PieceKind::RightL => [255, 145, 0, 255],
            PieceKind::LeftZ => [255, 23, 68, 255],
            PieceKind::RightZ => [0, 200, 83, 255],
            PieceKind::T => [170, 0, 255, 255],
        }
    }

    /// `(width, height, mask)` of the spawn orientation, mask row-major from the top-left.
    const fn shape(self) -> (usize, usize, &'static [u8]) {
        match self {
            PieceKind::None => (0, 0, &[]),
            PieceKind::Stick => (1, 4, &[1, 1, 1, 1]),
            PieceKind::Box => (2, 2, &[1, 1, 1, 1]),
            PieceKind::LeftL => (2, 3, &[0, 1, 0, 1, 1, 1]),
            PieceKind::RightL => (2, 3, &[1, 0, 1, 0, 1, 1]),
            PieceKind::LeftZ => (2, 3, &[0, 1, 1, 1, 1, 0]),
            PieceKind::RightZ => (2, 3, &[1, 0, 1, 1, 0, 1]),
            PieceKind::T => (2, 3, &[1, 0, 1, 1, 1, 0]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    width: usize,
    height: usize,
    cells: [Color; MAX_PIECE_CELLS],
}

impl Piece {
    pub fn make(kind: PieceKind) -> Self {
        let (width, height, mask) = kind.shape();
        let color = kind.color();
        let mut cells = [EMPTY; MAX_PIECE_CELLS];
        for (cell, &bit) in cells.iter_mut().zip(mask) {
            if bit != 0 {
                *cell = color;
            }
        }
        Self {
            kind,
            width,
            height,
            cells,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Panics if `(x, y)` is outside the bounding box.
    pub fn cell(&self, x: usize, y: usize) -> Color {
        assert!(
            x < self.width && y < self.height,
            "piece cell ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        self.cells[x + y * self.width]
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        is_filled(self.cell(x, y))
    }

    /// Occupied cells as `(x, y, color)`, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| {
                let color = self.cells[x + y * self.width];
                is_filled(color).then_some((x, y, color))
            })
        })
    }

    /// Rotates 90 degrees clockwise in place. No collision check.
    pub fn rotate(&mut self) {
        let (old_w, old_h) = (self.width, self.height);
        let mut rotated = [EMPTY; MAX_PIECE_CELLS];
        // new(x, y) = old(y, old_h - 1 - x), with new width = old_h.
        for y in 0..old_w {
            for x in 0..old_h {
                rotated[x + y * old_h] = self.cells[y + (old_h - 1 - x) * old_w];
            }
        }
        self.cells = rotated;
        self.width = old_h;
        self.height = old_w;
    }

    /// Emits one rect per occupied cell, `cell_size - 2` square, at `origin + (x, y) * cell_size`.
    pub fn render<F>(&self, origin: (i32, i32), cell_size: u32, mut draw: F)
    where
        F: FnMut(Rect, Color),
    {
        let inner = cell_size.saturating_sub(2);
        let step = cell_size as i32;
        for (x, y, color) in self.occupied_cells() {
            let rect = Rect::new(
                origin.0 + x as i32 * step,
                origin.1 + y as i32 * step,
                inner,
                inner,
            );
            draw(rect, color);
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::make(PieceKind::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(piece: &Piece) -> Vec<String> {
        (0..piece.height())
            .map(|y| {
                (0..piece.width())
                    .map(|x| if piece.is_occupied(x, y) { 'X' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn every_kind_has_four_cells() {
        for kind in PieceKind::ALL {
            let piece = Piece::make(kind);
            assert_eq!(piece.occupied_cells().count(), 4, "{kind:?}");
            assert!(piece.width() * piece.height() <= MAX_PIECE_CELLS);
        }
    }

    #[test]
    fn none_is_zero_sized() {
        let piece = Piece::make(PieceKind::None);
        assert_eq!((piece.width(), piece.height()), (0, 0));
        assert_eq!(piece.occupied_cells().count(), 0);
        assert_eq!(PieceKind::from_index(99), PieceKind::None);
    }

    #[test]
    fn rotating_stick_lays_it_flat() {
        let mut piece = Piece::make(PieceKind::Stick);
        piece.rotate();
        assert_eq!((piece.width(), piece.height()), (4, 1));
        assert_eq!(pattern(&piece), vec!["XXXX"]);
    }

    #[test]
    fn rotation_is_clockwise() {
        let mut piece = Piece::make(PieceKind::RightL);
        assert_eq!(pattern(&piece), vec!["X.", "X.", "XX"]);
        piece.rotate();
        assert_eq!(pattern(&piece), vec!["XXX", "X.."]);
    }

    #[test]
    fn render_uses_gutter_and_skips_holes() {
        let piece = Piece::make(PieceKind::LeftL);
        let mut rects = Vec::new();
        piece.render((100, 50), 10, |rect, color| rects.push((rect, color)));

        assert_eq!(rects.len(), 4);
        assert!(rects.iter().all(|(r, _)| r.w == 8 && r.h == 8));
        assert!(rects.iter().all(|(_, c)| *c == PieceKind::LeftL.color()));
        assert_eq!(rects[0].0, Rect::new(110, 50, 8, 8));
        assert_eq!(rects[2].0, Rect::new(100, 70, 8, 8));
    }
}
