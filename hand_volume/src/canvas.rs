//! Software framebuffer and drawing primitives.
//!
//! Pixels are `0xAARRGGBB`, row-major, the layout `minifb` expects.  All
//! drawing clips silently at the edges.

use crate::source::Image;

pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Canvas { width, height, buf: vec![fill; width * height] }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn pixels(&self) -> &[u32] { &self.buf }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    /// Bresenham line, `thickness` pixels wide.
    pub fn draw_line(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), thickness: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        let r = thickness / 2;
        loop {
            for oy in -r..=r {
                for ox in -r..=r {
                    self.set_pixel(x + ox, y + oy, color);
                }
            }
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Filled disc of radius `r`.
    pub fn draw_dot(&mut self, (cx, cy): (i32, i32), r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Nearest-neighbour stretch of `image` over the whole canvas.
    pub fn blit_scaled(&mut self, image: &Image) {
        if image.width == 0 || image.height == 0 || image.pixels.len() < image.width * image.height {
            return;
        }
        for row in 0..self.height {
            let sy = row * image.height / self.height;
            for col in 0..self.width {
                let sx = col * image.width / self.width;
                self.buf[row * self.width + col] = image.pixels[sy * image.width + sx];
            }
        }
    }

    /// Text in the 3×5 bitmap font, each font pixel drawn as a
    /// `scale`×`scale` block.  Returns the x just past the last glyph.
    pub fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) -> usize {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            if cx + 3 * scale > self.width { break; }
            for (row, &bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
        }
        cx
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const BG: u32 = 0xFF00_0000;
    const FG: u32 = 0xFFFF_FFFF;

    fn lit(c: &Canvas) -> usize {
        c.pixels().iter().filter(|&&p| p == FG).count()
    }

    #[test]
    fn drawing_clips_at_edges() {
        let mut c = Canvas::new(10, 10, BG);
        c.set_pixel(-1, 3, FG);
        c.set_pixel(3, 10, FG);
        c.fill_rect(8, 8, 5, 5, FG);
        assert_eq!(lit(&c), 4);
        c.draw_dot((0, 0), 2, FG);
        assert_eq!(c.pixel(0, 0), Some(FG));
        assert_eq!(c.pixel(10, 0), None);
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut c = Canvas::new(20, 20, BG);
        c.draw_line((2, 3), (15, 11), 1, FG);
        assert_eq!(c.pixel(2, 3), Some(FG));
        assert_eq!(c.pixel(15, 11), Some(FG));
        // Bresenham lights one pixel per step along the major axis.
        assert_eq!(lit(&c), 14);
    }

    #[test]
    fn text_scales_and_advances() {
        let mut c = Canvas::new(100, 20, BG);
        let end = c.draw_text("1", 0, 0, 1, FG);
        assert_eq!(end, 4);
        assert_eq!(lit(&c), 8);

        c.clear(BG);
        let end = c.draw_text("1", 0, 0, 2, FG);
        assert_eq!(end, 8);
        assert_eq!(lit(&c), 32);
    }

    #[test]
    fn text_stops_at_right_edge() {
        let mut c = Canvas::new(10, 10, BG);
        let end = c.draw_text("8888", 0, 0, 1, FG);
        assert_eq!(end, 8);
    }

    #[test]
    fn blit_stretches_nearest_neighbour() {
        let img = Image { width: 2, height: 1, pixels: vec![0xFF11_1111, 0xFF22_2222] };
        let mut c = Canvas::new(4, 2, BG);
        c.blit_scaled(&img);
        assert_eq!(c.pixels(), &[
            0xFF11_1111, 0xFF11_1111, 0xFF22_2222, 0xFF22_2222,
            0xFF11_1111, 0xFF11_1111, 0xFF22_2222, 0xFF22_2222,
        ]);
    }

    #[test]
    fn short_image_is_ignored() {
        let img = Image { width: 4, height: 4, pixels: vec![FG; 3] };
        let mut c = Canvas::new(4, 4, BG);
        c.blit_scaled(&img);
        assert_eq!(lit(&c), 0);
    }
}
