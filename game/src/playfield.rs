use engine::graphics::Color;

use crate::piece::{EMPTY, Piece, is_filled};

/// Grid of locked cells, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl Playfield {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "field cell ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        x + y * self.width
    }

    pub fn cell(&self, x: usize, y: usize) -> Color {
        self.cells[self.index(x, y)]
    }

    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        is_filled(self.cell(x, y))
    }

    pub fn set_cell(&mut self, x: usize, y: usize, color: Color) {
        let i = self.index(x, y);
        self.cells[i] = color;
    }

    pub fn row(&self, y: usize) -> &[Color] {
        let start = self.index(0, y);
        &self.cells[start..start + self.width]
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.width > 0 && self.row(y).iter().all(|&c| is_filled(c))
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| is_filled(c))
    }

    /// True if `piece` at `(x, y)` would cross the left, right or bottom edge, or overlap a
    /// filled cell. Rows above the field (`y < 0`) are open.
    pub fn collides(&self, piece: &Piece, x: i32, y: i32) -> bool {
        if x < 0
            || x + piece.width() as i32 > self.width as i32
            || y + piece.height() as i32 > self.height as i32
        {
            return true;
        }
        piece.occupied_cells().any(|(px, py, _)| {
            let fy = y + py as i32;
            fy >= 0 && self.is_filled(x as usize + px, fy as usize)
        })
    }

    /// Copies the piece's occupied cells into the field. Cells above row 0 are dropped; callers
    /// treat a piece that still reaches above the field as game over before getting here.
    pub fn lock(&mut self, piece: &Piece, x: i32, y: i32) {
        for (px, py, color) in piece.occupied_cells() {
            let fx = x + px as i32;
            let fy = y + py as i32;
            if fx < 0 || fy < 0 || fx as usize >= self.width || fy as usize >= self.height {
                continue;
            }
            self.set_cell(fx as usize, fy as usize, color);
        }
    }

    /// Removes every full row, shifting the rows above it down. Returns how many were removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = 0;
        while y < self.height {
            if !self.is_row_full(y) {
                y += 1;
                continue;
            }
            // Rows 0..y move down by one; row 0 becomes empty. Re-check row y afterwards.
            self.cells.copy_within(0..y * self.width, self.width);
            self.cells[..self.width].fill(EMPTY);
            cleared += 1;
        }
        cleared
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}
