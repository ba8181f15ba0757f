//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod motion;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Evaluation, advance_obstacles, evaluate, passed_front_edge};
pub use geometry::Rect;
pub use motion::{clamp_to_road, descend, steer_car};
pub use session::{MenuAction, Transition, apply_menu_action, open_menu, restart};
pub use spawn::{SpawnTimer, roll_obstacle, spawn_if_due};
pub use state::{
    Car, GameEvent, GameState, Obstacle, ObstacleKind, ObstacleKinds, Road, SessionState, Sprite,
    WorldSpec,
};
pub use tick::{TickInput, tick};
