//! Terminal rendering module
//!
//! Draws the world into a half-block pixel buffer scaled to the terminal.

pub mod framebuffer;
pub mod scene;
pub mod viewport;

use std::io::Write;

use glam::Vec2;

use crate::error::Result;
use crate::highscores::Leaderboard;
use crate::sim::GameState;
use crate::ui::Layout;

pub use framebuffer::{PixelBuf, Rgb};
pub use scene::{Palette, color_for_name};
pub use viewport::Viewport;

/// Where frames go; the driver only talks to this
pub trait Frontend {
    fn draw_playing(&mut self, state: &GameState, layout: &Layout) -> Result<()>;

    fn draw_menu(&mut self, state: &GameState, layout: &Layout) -> Result<()>;

    fn draw_results(&mut self, leaderboard: &Leaderboard, score: u64) -> Result<()>;

    /// Terminal was resized to `columns` x `rows` cells
    fn resize(&mut self, columns: u16, rows: u16);

    /// World position under a terminal cell
    fn cell_to_world(&self, column: u16, row: u16) -> Option<Vec2>;
}

/// Half-block renderer writing to a terminal
pub struct TerminalRenderer<W: Write> {
    out: W,
    buf: PixelBuf,
    viewport: Viewport,
    palette: Palette,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, columns: u16, rows: u16, world: Vec2, palette: Palette) -> Self {
        let buf = PixelBuf::for_terminal(columns, rows);
        let viewport = Viewport::fit(world, buf.width(), buf.height());
        log::info!(
            "Renderer {}x{} cells, world {}x{} at scale {:.3}",
            columns,
            rows,
            world.x,
            world.y,
            viewport.scale
        );
        Self {
            out,
            buf,
            viewport,
            palette,
        }
    }

    fn present(&mut self) -> Result<()> {
        self.buf.render(&mut self.out)?;
        Ok(())
    }
}

impl<W: Write> Frontend for TerminalRenderer<W> {
    fn draw_playing(&mut self, state: &GameState, layout: &Layout) -> Result<()> {
        scene::draw_game(&mut self.buf, &self.viewport, &self.palette, state, layout);
        self.present()
    }

    fn draw_menu(&mut self, state: &GameState, layout: &Layout) -> Result<()> {
        scene::draw_menu(&mut self.buf, &self.viewport, &self.palette, state, layout);
        self.present()
    }

    fn draw_results(&mut self, leaderboard: &Leaderboard, score: u64) -> Result<()> {
        scene::draw_results(&mut self.buf, leaderboard, score);
        self.present()
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        self.buf.resize(columns, rows);
        self.viewport = Viewport::fit(self.viewport.world, self.buf.width(), self.buf.height());
        log::debug!("Resized to {}x{} cells, scale {:.3}", columns, rows, self.viewport.scale);
    }

    fn cell_to_world(&self, column: u16, row: u16) -> Option<Vec2> {
        self.viewport.cell_to_world(column, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::test_support;

    #[test]
    fn test_terminal_renderer_writes_frames() {
        let state = test_support::state();
        let layout = Layout::new(state.screen_width);
        let mut renderer =
            TerminalRenderer::new(Vec::new(), 80, 30, Vec2::new(800.0, 600.0), Palette::default());
        renderer.draw_playing(&state, &layout).unwrap();
        let first = renderer.out.len();
        assert!(first > 0);
        renderer.draw_menu(&state, &layout).unwrap();
        assert!(renderer.out.len() > first);
    }

    #[test]
    fn test_resize_refits_viewport() {
        let mut renderer =
            TerminalRenderer::new(Vec::new(), 80, 30, Vec2::new(800.0, 600.0), Palette::default());
        let before = renderer.viewport.scale;
        renderer.resize(200, 75);
        assert!(renderer.viewport.scale > before);
        assert_eq!(renderer.cell_to_world(150, 2), Some(Vec2::new(602.0, 20.0)));
    }
}
