//! Car Racing - a two-lane car dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, session state)
//! - `app`: Game loop driver
//! - `ui`: Menu button and pause menu layout
//! - `renderer`: Half-block terminal rendering
//! - `platform`: Terminal input and frame pacing
//! - `persistence`: Leaderboard record storage
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod assets;
pub mod cli;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{AssetError, ConfigError, Error, Result, StoreError};
pub use highscores::Leaderboard;
pub use settings::{Difficulty, GameConfig};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Car and obstacle speed at speed modifier 1 (pixels per tick)
    pub const BASE_SPEED: f32 = 5.0;
    /// Ticks between spawns at speed modifier 1
    pub const SPAWN_BASE_TICKS: u32 = 60;
    /// Distance between the car's top edge and the bottom of the screen
    pub const SPACE_FROM_BOTTOM: u32 = 150;
    /// Width of the dashed line separating the two lanes
    pub const DIVIDER_WIDTH: u32 = 20;
    /// Length of one dash plus gap in the scrolling lane markings
    pub const ROAD_DASH_PERIOD: f32 = 80.0;

    /// Side of the square menu button in the top-right corner
    pub const MENU_BUTTON_SIZE: f32 = 50.0;
    /// Menu item dimensions
    pub const MENU_ITEM_WIDTH: f32 = 300.0;
    pub const MENU_ITEM_HEIGHT: f32 = 100.0;
    /// Top edge of the first menu item and spacing between items
    pub const MENU_FIRST_ITEM_Y: f32 = 100.0;
    pub const MENU_ITEM_SPACING: f32 = 150.0;

    /// Number of leaderboard entries shown on the results screen
    pub const LEADERBOARD_SIZE: usize = 3;
    /// Seconds the results screen stays up before the process exits
    pub const RESULTS_HOLD_SECS: u64 = 5;

    /// Ticks a key stays held after a press when release events are unavailable
    pub const KEY_LATCH_TICKS: u32 = 8;
}

/// Ticks between obstacle spawns for a given speed modifier
///
/// Matches integer floor division: 60 / 1.5 = 40, 60 / 3 = 20.
#[inline]
pub fn spawn_threshold(base_ticks: u32, speed_modifier: f32) -> u32 {
    ((base_ticks as f32 / speed_modifier).floor() as u32).max(1)
}
