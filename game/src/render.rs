use engine::graphics::{Color, Rect, Renderer2d};
use engine::surface::SurfaceSize;

use crate::session::GameSession;

pub const BACKGROUND: Color = [20, 40, 205, 255];
pub const FIELD_CELL: Color = [12, 14, 32, 255];
pub const HUD_TEXT: Color = [255, 255, 255, 255];
pub const HUD_TEXT_SCALE: u32 = 3;

/// Where the field lands on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub origin: (i32, i32),
    pub cell_size: u32,
    pub columns: usize,
    pub rows: usize,
}

impl FieldLayout {
    /// Centers a `columns` x `rows` grid of `cell_size` cells on the surface. The origin may go
    /// negative when the surface is too small.
    pub fn centered(surface: SurfaceSize, columns: usize, rows: usize, cell_size: u32) -> Self {
        let field_w = columns as i64 * cell_size as i64;
        let field_h = rows as i64 * cell_size as i64;
        let x = (surface.width as i64 - field_w) / 2;
        let y = (surface.height as i64 - field_h) / 2;
        Self {
            origin: (x as i32, y as i32),
            cell_size,
            columns,
            rows,
        }
    }

    pub fn cell_origin(&self, x: i32, y: i32) -> (i32, i32) {
        let step = self.cell_size as i32;
        (self.origin.0 + x * step, self.origin.1 + y * step)
    }

    pub fn cell_rect(&self, x: i32, y: i32) -> Rect {
        let (px, py) = self.cell_origin(x, y);
        let inner = self.cell_size.saturating_sub(2);
        Rect::new(px, py, inner, inner)
    }

    pub fn right(&self) -> i32 {
        self.origin.0 + (self.columns as u32 * self.cell_size) as i32
    }
}

/// Draws one frame: clear, per-cell background, locked cells, the active piece, and the line
/// counter to the right of the field.
pub fn draw_session(gfx: &mut dyn Renderer2d, session: &GameSession, cell_size: u32) {
    gfx.clear(BACKGROUND);

    let field = session.field();
    let layout = FieldLayout::centered(gfx.size(), field.width(), field.height(), cell_size);

    for y in 0..field.height() {
        for x in 0..field.width() {
            let rect = layout.cell_rect(x as i32, y as i32);
            gfx.fill_rect(rect, FIELD_CELL);
            if field.is_filled(x, y) {
                gfx.fill_rect(rect, field.cell(x, y));
            }
        }
    }

    let (px, py) = session.piece_position();
    session
        .piece()
        .render(layout.cell_origin(px, py), cell_size, |rect, color| {
            gfx.fill_rect(rect, color)
        });

    gfx.draw_text_scaled(
        layout.right() + cell_size as i32,
        layout.origin.1,
        &format!("LINES {}", session.lines()),
        HUD_TEXT,
        HUD_TEXT_SCALE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_centers_field() {
        let layout = FieldLayout::centered(SurfaceSize::new(800, 600), 10, 20, 25);
        assert_eq!(layout.origin, (275, 50));
        assert_eq!(layout.right(), 525);
        assert_eq!(layout.cell_rect(1, 2), Rect::new(300, 100, 23, 23));
    }

    #[test]
    fn layout_origin_goes_negative_on_tiny_surface() {
        let layout = FieldLayout::centered(SurfaceSize::new(10, 10), 10, 20, 10);
        assert_eq!(layout.origin, (-45, -95));
    }
}
