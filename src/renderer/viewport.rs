//! Mapping between world coordinates and framebuffer pixels
//!
//! The world (the map image size) is scaled uniformly to fit the
//! framebuffer and centered; the leftover margin is letterboxed.

use glam::Vec2;

use crate::sim::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World size in world units
    pub world: Vec2,
    /// Framebuffer pixels per world unit
    pub scale: f32,
    /// Framebuffer pixel of the world origin
    pub offset: Vec2,
}

impl Viewport {
    pub fn fit(world: Vec2, pixels_w: usize, pixels_h: usize) -> Self {
        let avail = Vec2::new(pixels_w as f32, pixels_h as f32);
        let scale = if world.x > 0.0 && world.y > 0.0 {
            (avail.x / world.x).min(avail.y / world.y)
        } else {
            0.0
        };
        let offset = ((avail - world * scale) / 2.0).floor();
        Self {
            world,
            scale,
            offset,
        }
    }

    pub fn to_pixels(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    /// Pixel span (x, y, w, h) covering a world rectangle, at least one pixel
    pub fn rect_to_pixels(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let min = self.to_pixels(rect.pos).round();
        let max = self.to_pixels(rect.pos + rect.size).round();
        let w = ((max.x - min.x) as i32).max(1);
        let h = ((max.y - min.y) as i32).max(1);
        (min.x as i32, min.y as i32, w, h)
    }

    /// World position of a terminal cell's center, if it lies inside the world
    pub fn cell_to_world(&self, column: u16, row: u16) -> Option<Vec2> {
        if self.scale <= 0.0 {
            return None;
        }
        // A cell spans pixel rows 2*row and 2*row + 1
        let pixel = Vec2::new(column as f32 + 0.5, row as f32 * 2.0 + 1.0);
        let world = (pixel - self.offset) / self.scale;
        let inside = world.x >= 0.0 && world.y >= 0.0 && world.x < self.world.x && world.y < self.world.y;
        inside.then_some(world)
    }

    /// Terminal cell containing a world point
    pub fn world_to_cell(&self, point: Vec2) -> (i32, i32) {
        let pixel = self.to_pixels(point);
        (pixel.x.floor() as i32, (pixel.y / 2.0).floor() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_letterboxes_wide_terminal() {
        // 800x600 world into 200x100 pixels: height limits, scale 1/6
        let vp = Viewport::fit(Vec2::new(800.0, 600.0), 200, 100);
        assert!((vp.scale - 100.0 / 600.0).abs() < 1e-6);
        assert_eq!(vp.offset.y, 0.0);
        assert!(vp.offset.x > 0.0);
    }

    #[test]
    fn test_cell_round_trip() {
        let vp = Viewport::fit(Vec2::new(800.0, 600.0), 200, 150);
        // scale 0.25, no offset
        assert_eq!(vp.offset, Vec2::ZERO);
        let world = vp.cell_to_world(150, 2).unwrap();
        assert_eq!(world, Vec2::new(602.0, 20.0));
        assert_eq!(vp.world_to_cell(world), (150, 2));
    }

    #[test]
    fn test_cells_outside_world() {
        let vp = Viewport::fit(Vec2::new(800.0, 600.0), 240, 150);
        // 20 pixel margin on each side
        assert_eq!(vp.offset.x, 20.0);
        assert!(vp.cell_to_world(5, 10).is_none());
        assert!(vp.cell_to_world(225, 10).is_none());
        assert!(vp.cell_to_world(25, 10).is_some());
    }

    #[test]
    fn test_tiny_rects_stay_visible() {
        let vp = Viewport::fit(Vec2::new(800.0, 600.0), 80, 60);
        let (_, _, w, h) = vp.rect_to_pixels(&Rect::new(10.0, 10.0, 2.0, 2.0));
        assert_eq!((w, h), (1, 1));
    }

    #[test]
    fn test_empty_world() {
        let vp = Viewport::fit(Vec2::ZERO, 80, 60);
        assert!(vp.cell_to_world(1, 1).is_none());
    }
}
