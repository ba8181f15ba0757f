//! Scene drawing: gameplay, pause menu, results
//!
//! Sprites are flat colored rectangles. Each asset handle gets a color from
//! its image name.

use std::collections::HashMap;

use glam::Vec2;

use super::framebuffer::{PixelBuf, Rgb};
use super::viewport::Viewport;
use crate::assets::{AssetHandle, LoadedAsset};
use crate::consts::ROAD_DASH_PERIOD;
use crate::highscores::Leaderboard;
use crate::settings::{FontColor, GameConfig};
use crate::sim::{GameState, Rect};
use crate::ui::Layout;

const LETTERBOX: Rgb = Rgb(12, 12, 16);
const ASPHALT: Rgb = Rgb(70, 70, 76);
const DIVIDER: Rgb = Rgb(235, 235, 220);
const BUTTON: Rgb = Rgb(40, 40, 48);
const PANEL: Rgb = Rgb(30, 34, 44);
const PANEL_EDGE: Rgb = Rgb(200, 200, 210);
const FALLBACK: Rgb = Rgb(220, 60, 60);

/// Known theme colors; anything else is derived from the name
fn named_color(name: &str) -> Option<Rgb> {
    let color = match name {
        "winter" => Rgb(225, 235, 245),
        "summer" => Rgb(80, 160, 60),
        "spring" => Rgb(120, 190, 110),
        "desert" => Rgb(220, 195, 130),
        _ => return None,
    };
    Some(color)
}

/// A stable, reasonably bright color for an arbitrary name (FNV-1a)
pub fn color_for_name(name: &str) -> Rgb {
    if let Some(color) = named_color(name) {
        return color;
    }
    let mut hash: u32 = 0x811c_9dc5;
    for byte in name.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    let channel = |shift: u32| 64 + ((hash >> shift) & 0xff) as u8 % 192;
    Rgb(channel(0), channel(8), channel(16))
}

/// Colors for every loaded asset
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: HashMap<AssetHandle, Rgb>,
    pub background: Rgb,
    pub text: Rgb,
}

impl Palette {
    pub fn for_config(config: &GameConfig) -> Self {
        let mut palette = Self {
            colors: HashMap::new(),
            background: color_for_name(&config.map.name),
            text: match config.font_color {
                FontColor::Black => Rgb::BLACK,
                FontColor::White => Rgb::WHITE,
            },
        };
        for asset in std::iter::once(&config.car)
            .chain(std::iter::once(&config.map))
            .chain(config.obstacles.iter())
        {
            palette.insert(asset);
        }
        palette
    }

    pub fn insert(&mut self, asset: &LoadedAsset) {
        self.colors.insert(asset.handle, color_for_name(&asset.name));
    }

    pub fn color(&self, handle: AssetHandle) -> Rgb {
        self.colors.get(&handle).copied().unwrap_or(FALLBACK)
    }
}

fn fill_world(buf: &mut PixelBuf, vp: &Viewport, rect: &Rect, color: Rgb) {
    let (x, y, w, h) = vp.rect_to_pixels(rect);
    buf.fill_rect(x, y, w, h, color);
}

/// Background, road, car, obstacles, score and the menu button
pub fn draw_game(buf: &mut PixelBuf, vp: &Viewport, palette: &Palette, state: &GameState, layout: &Layout) {
    buf.clear(LETTERBOX);
    let world = Rect {
        pos: Vec2::ZERO,
        size: vp.world,
    };
    fill_world(buf, vp, &world, palette.background);

    fill_world(buf, vp, &state.road.rect(), ASPHALT);
    draw_divider(buf, vp, state);

    fill_world(buf, vp, &state.car.rect(), palette.color(state.car.handle));
    for obstacle in &state.obstacles {
        fill_world(buf, vp, &obstacle.rect(), palette.color(obstacle.handle));
    }

    let (col, row) = vp.world_to_cell(Vec2::new(10.0, 10.0));
    buf.put_text(col, row, &format!("Score: {}", state.score), palette.text);

    fill_world(buf, vp, &layout.button.rect, BUTTON);
    let (col, row) = vp.world_to_cell(layout.button.rect.center());
    buf.put_text(col, row, "\u{2261}", Rgb::WHITE);
}

/// Dashed lane divider scrolling down with the road
fn draw_divider(buf: &mut PixelBuf, vp: &Viewport, state: &GameState) {
    let divider = state.road.divider_rect();
    let dash = ROAD_DASH_PERIOD / 2.0;
    let mut y = state.road_offset - ROAD_DASH_PERIOD;
    while y < divider.bottom() {
        let top = y.max(divider.top());
        let bottom = (y + dash).min(divider.bottom());
        if bottom > top {
            let segment = Rect::new(divider.left(), top, divider.size.x, bottom - top);
            fill_world(buf, vp, &segment, DIVIDER);
        }
        y += ROAD_DASH_PERIOD;
    }
}

/// The frozen scene, dimmed, with the menu items on top
pub fn draw_menu(buf: &mut PixelBuf, vp: &Viewport, palette: &Palette, state: &GameState, layout: &Layout) {
    draw_game(buf, vp, palette, state, layout);
    buf.dim();
    for item in &layout.menu.items {
        fill_world(buf, vp, &item.rect, PANEL_EDGE);
        let inner = Rect {
            pos: item.rect.pos + Vec2::splat(4.0),
            size: item.rect.size - Vec2::splat(8.0),
        };
        fill_world(buf, vp, &inner, PANEL);
        let (col, row) = vp.world_to_cell(item.rect.center());
        buf.put_text_centered(col, row, item.action.label(), Rgb::WHITE);
    }
}

/// Leader board, then the session's own score
pub fn draw_results(buf: &mut PixelBuf, leaderboard: &Leaderboard, score: u64) {
    buf.clear(PANEL);
    let center = buf.width() as i32 / 2;
    let lines = leaderboard.entries.len() as i32 + 3;
    let mut row = (buf.rows() as i32 - lines) / 2;

    buf.put_text_centered(center, row, "Leader board", Rgb::WHITE);
    row += 1;
    for line in leaderboard.lines() {
        buf.put_text_centered(center, row, &line, Rgb::WHITE);
        row += 1;
    }
    row += 1;
    buf.put_text_centered(center, row, &format!("Your result: {}", score), Rgb::WHITE);
}
