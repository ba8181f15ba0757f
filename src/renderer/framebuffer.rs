//! Pixel buffer with half-block rendering
//!
//! Each terminal cell shows two vertically stacked pixels using the upper
//! half block glyph: foreground is the top pixel, background the bottom.
//! Text is overlaid per cell on top of the pixels.

use std::io::{self, Write};

use crossterm::style::{self, Color};
use crossterm::{cursor, queue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Halve the brightness
    pub const fn dim(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }

    fn to_color(self) -> Color {
        Color::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Rgb,
}

#[derive(Debug, Clone)]
pub struct PixelBuf {
    w: usize,
    /// Pixel height = terminal rows * 2
    h: usize,
    px: Vec<Rgb>,
    text: Vec<Option<Glyph>>,
}

impl PixelBuf {
    /// Buffer covering a terminal of `columns` x `rows` cells
    pub fn for_terminal(columns: u16, rows: u16) -> Self {
        let w = columns as usize;
        let h = rows as usize * 2;
        Self {
            w,
            h,
            px: vec![Rgb::BLACK; w * h],
            text: vec![None; w * (h / 2)],
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        *self = Self::for_terminal(columns, rows);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn rows(&self) -> usize {
        self.h / 2
    }

    pub fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
        self.text.fill(None);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.w as i32);
        let y1 = (y + h).min(self.h as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.px[py as usize * self.w + px as usize] = c;
            }
        }
    }

    /// Dim every pixel, e.g. behind a modal panel
    pub fn dim(&mut self) {
        for p in self.px.iter_mut() {
            *p = p.dim();
        }
    }

    /// Write text starting at a terminal cell; clipped at the right edge
    pub fn put_text(&mut self, column: i32, row: i32, text: &str, fg: Rgb) {
        if row < 0 || row as usize >= self.rows() {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let col = column + i as i32;
            if col >= 0 && (col as usize) < self.w {
                self.text[row as usize * self.w + col as usize] = Some(Glyph { ch, fg });
            }
        }
    }

    /// Text horizontally centered on a terminal row
    pub fn put_text_centered(&mut self, center_column: i32, row: i32, text: &str, fg: Rgb) {
        let len = text.chars().count() as i32;
        self.put_text(center_column - len / 2, row, text, fg);
    }

    /// Character and foreground color overlaid on a cell, if any
    pub fn text_at(&self, column: usize, row: usize) -> Option<(char, Rgb)> {
        self.text
            .get(row * self.w + column)
            .copied()
            .flatten()
            .map(|g| (g.ch, g.fg))
    }

    /// Text of a whole terminal row, blanks for cells without text
    pub fn row_text(&self, row: usize) -> String {
        (0..self.w)
            .map(|col| self.text_at(col, row).map(|(ch, _)| ch).unwrap_or(' '))
            .collect()
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.rows();
        let mut prev_fg = Rgb::BLACK;
        let mut prev_bg = Rgb::BLACK;
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                let (ch, fg, bg) = match self.text_at(col, row) {
                    Some((ch, fg)) => (ch, fg, bot),
                    None if top == bot => (' ', prev_fg, top),
                    None => ('\u{2580}', top, bot),
                };

                if ch != ' ' && (need_fg || prev_fg != fg) {
                    queue!(out, style::SetForegroundColor(fg.to_color()))?;
                    prev_fg = fg;
                    need_fg = false;
                }
                if need_bg || prev_bg != bg {
                    queue!(out, style::SetBackgroundColor(bg.to_color()))?;
                    prev_bg = bg;
                    need_bg = false;
                }
                queue!(out, style::Print(ch))?;
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let buf = PixelBuf::for_terminal(10, 4);
        assert_eq!((buf.width(), buf.height(), buf.rows()), (10, 8, 4));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buf = PixelBuf::for_terminal(4, 2);
        buf.fill_rect(-2, -2, 4, 4, Rgb::WHITE);
        assert_eq!(buf.get(0, 0), Rgb::WHITE);
        assert_eq!(buf.get(1, 1), Rgb::WHITE);
        assert_eq!(buf.get(2, 1), Rgb::BLACK);
        assert_eq!(buf.get(0, 2), Rgb::BLACK);
    }

    #[test]
    fn test_text_overlay() {
        let mut buf = PixelBuf::for_terminal(12, 3);
        buf.put_text_centered(6, 1, "Score", Rgb::WHITE);
        assert_eq!(buf.row_text(1), "    Score   ");
        buf.put_text(10, 0, "clip", Rgb::WHITE);
        assert_eq!(buf.row_text(0), "          cl");
        buf.clear(Rgb::BLACK);
        assert_eq!(buf.row_text(1).trim(), "");
    }

    #[test]
    fn test_render_writes_every_row() {
        let mut buf = PixelBuf::for_terminal(3, 2);
        buf.set(0, 0, Rgb::WHITE);
        buf.put_text(2, 1, "x", Rgb::WHITE);
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{2580}'));
        assert!(text.contains('x'));
        assert_eq!(text.matches("\r\n").count(), 1);
    }
}
