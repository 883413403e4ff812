use crate::surface::SurfaceSize;

/// RGBA, 8 bits per channel.
pub type Color = [u8; 4];

pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

/// Axis-aligned rectangle in surface pixels. The origin may sit off-surface; drawing clips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && (px as i64) < self.right() && py >= self.y && (py as i64) < self.bottom()
    }

    /// Pixel span `[x0, x1) x [y0, y1)` of this rect inside a surface, or `None` if nothing is
    /// visible.
    fn clip_to(&self, size: SurfaceSize) -> Option<(usize, usize, usize, usize)> {
        let x0 = (self.x as i64).max(0);
        let y0 = (self.y as i64).max(0);
        let x1 = self.right().min(size.width as i64);
        let y1 = self.bottom().min(size.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

/// Everything the game needs from a 2D backend. Rects are filled opaquely; alpha is written
/// through as-is.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }

    /// Block-font text, one `scale`x`scale` square per lit glyph pixel. Lowercase is drawn as
    /// uppercase; unknown characters render as blanks.
    fn draw_text_scaled(&mut self, x: i32, y: i32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let mut pen_x = x;
        let mut pen_y = y;
        for ch in text.chars() {
            if ch == '\n' {
                pen_x = x;
                pen_y = pen_y.saturating_add(line_advance_y(scale) as i32);
                continue;
            }
            let bits = glyph(ch);
            for row in 0..GLYPH_H {
                for col in 0..GLYPH_W {
                    if glyph_lit(bits, row, col) {
                        self.fill_rect(
                            Rect::new(
                                pen_x.saturating_add((col * scale) as i32),
                                pen_y.saturating_add((row * scale) as i32),
                                scale,
                                scale,
                            ),
                            color,
                        );
                    }
                }
            }
            pen_x = pen_x.saturating_add(glyph_advance_x(scale) as i32);
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }
}

pub fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

pub fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel width of a single line of text.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    chars * glyph_advance_x(scale) - scale.max(1)
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if self.frame.len() < self.size.rgba_len() {
            return;
        }
        let Some((x0, y0, x1, y1)) = rect.clip_to(self.size) else {
            return;
        };

        let stride = self.size.width as usize * 4;
        for y in y0..y1 {
            let row = &mut self.frame[y * stride + x0 * 4..y * stride + x1 * 4];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }
}

/// A draw command captured by [`DrawList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCmd {
    Clear(Color),
    FillRect(Rect, Color),
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
        scale: u32,
    },
}

/// Records draw calls instead of rasterizing them. Handy for asserting on what a frame contains.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    size: SurfaceSize,
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            cmds: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.cmds.iter().filter_map(|cmd| match cmd {
            DrawCmd::FillRect(rect, color) => Some((*rect, *color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.cmds.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer2d for DrawList {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
        self.cmds.clear();
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.cmds.push(DrawCmd::FillRect(rect, color));
    }

    fn clear(&mut self, color: Color) {
        self.cmds.push(DrawCmd::Clear(color));
    }

    fn draw_text_scaled(&mut self, x: i32, y: i32, text: &str, color: Color, scale: u32) {
        self.cmds.push(DrawCmd::Text {
            x,
            y,
            text: text.to_string(),
            color,
            scale,
        });
    }
}

fn glyph_lit(bits: u16, row: u32, col: u32) -> bool {
    let shift = (GLYPH_H - 1 - row) * GLYPH_W + (GLYPH_W - 1 - col);
    bits >> shift & 1 == 1
}

/// 3x5 glyphs packed row-major, top row in the high bits.
const fn glyph(ch: char) -> u16 {
    match ch.to_ascii_uppercase() {
        '0' => 0b111_101_101_101_111,
        '1' => 0b010_110_010_010_111,
        '2' => 0b111_001_111_100_111,
        '3' => 0b111_001_111_001_111,
        '4' => 0b101_101_111_001_001,
        '5' => 0b111_100_111_001_111,
        '6' => 0b111_100_111_101_111,
        '7' => 0b111_001_010_010_010,
        '8' => 0b111_101_111_101_111,
        '9' => 0b111_101_111_001_111,
        'A' => 0b010_101_111_101_101,
        'B' => 0b110_101_110_101_110,
        'C' => 0b011_100_100_100_011,
        'D' => 0b110_101_101_101_110,
        'E' => 0b111_100_110_100_111,
        'F' => 0b111_100_110_100_100,
        'G' => 0b011_100_101_101_011,
        'H' => 0b101_101_111_101_101,
        'I' => 0b111_010_010_010_111,
        'J' => 0b001_001_001_101_010,
        'K' => 0b101_101_110_101_101,
        'L' => 0b100_100_100_100_111,
        'M' => 0b101_111_111_101_101,
        'N' => 0b110_101_101_101_101,
        'O' => 0b010_101_101_101_010,
        'P' => 0b110_101_110_100_100,
        'Q' => 0b010_101_101_110_011,
        'R' => 0b110_101_110_101_101,
        'S' => 0b011_100_010_001_110,
        'T' => 0b111_010_010_010_010,
        'U' => 0b101_101_101_101_111,
        'V' => 0b101_101_101_101_010,
        'W' => 0b101_101_111_111_101,
        'X' => 0b101_101_010_101_101,
        'Y' => 0b101_101_010_010_010,
        'Z' => 0b111_001_010_100_111,
        ':' => 0b000_010_000_010_000,
        '-' => 0b000_000_111_000_000,
        '.' => 0b000_000_000_000_010,
        '/' => 0b001_001_010_100_100,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], size: SurfaceSize, x: u32, y: u32) -> Color {
        let i = ((y * size.width + x) * 4) as usize;
        [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
    }

    #[test]
    fn fill_rect_clips_negative_origin() {
        let size = SurfaceSize::new(4, 4);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.fill_rect(Rect::new(-2, -2, 3, 3), [9, 9, 9, 255]);

        assert_eq!(pixel(&frame, size, 0, 0), [9, 9, 9, 255]);
        assert_eq!(pixel(&frame, size, 1, 0), [0, 0, 0, 0]);
        assert_eq!(pixel(&frame, size, 0, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn fill_rect_entirely_offscreen_is_a_noop() {
        let size = SurfaceSize::new(4, 4);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.fill_rect(Rect::new(10, 0, 3, 3), [1, 2, 3, 4]);
        gfx.fill_rect(Rect::new(0, -5, 3, 3), [1, 2, 3, 4]);
        assert!(frame.iter().all(|&b| b == 0));
    }

    #[test]
    fn glyph_bits_are_read_top_row_first() {
        let one = glyph('1');
        assert!(glyph_lit(one, 0, 1));
        assert!(!glyph_lit(one, 0, 0));
        assert!(glyph_lit(one, 4, 0) && glyph_lit(one, 4, 2));
    }

    #[test]
    fn text_width_excludes_trailing_gap() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("AB", 1), 7);
    }
}
