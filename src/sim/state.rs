//! Game state and core simulation types
//!
//! Everything the Game Loop Driver mutates during a tick lives in
//! [`GameState`]; the driver owns it exclusively.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geometry::Rect;
use super::spawn::SpawnTimer;
use crate::assets::AssetHandle;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Session state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Active gameplay
    Playing,
    /// Pause menu is open, simulation frozen
    Menu,
    /// Collision happened, session is over
    GameOver,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new obstacle entered at the top of the road
    ObstacleSpawned { id: u32, kind: usize },
    /// An obstacle crossed the car's front edge (score +1)
    ObstaclePassed { id: u32 },
    /// The car hit an obstacle
    Collision { id: u32 },
    /// An obstacle left the bottom of the screen
    ObstacleCulled { id: u32 },
}

/// The two-lane road, fixed for a session
///
/// Integer geometry so lane bounds match integer division exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Road {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Scroll speed of the lane markings (pixels per tick)
    pub scroll_speed: f32,
    /// Width of the centered divider line
    pub divider_width: i32,
}

impl Road {
    /// Road occupying the middle half of the screen
    pub fn for_screen(screen_width: u32, screen_height: u32, scroll_speed: f32, divider_width: u32) -> Self {
        let width = (screen_width / 2) as i32;
        Self {
            x: (screen_width / 4) as i32,
            y: 0,
            width,
            height: screen_height as i32,
            scroll_speed,
            divider_width: (divider_width as i32).min(width),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }

    /// The divider strip, centered on the road
    pub fn divider_rect(&self) -> Rect {
        Rect::new(
            (self.x + self.width / 2 - self.divider_width / 2) as f32,
            self.y as f32,
            self.divider_width as f32,
            self.height as f32,
        )
    }

    /// Leftmost and rightmost legal X for a car of the given width
    pub fn car_x_bounds(&self, car_width: f32) -> (f32, f32) {
        let min = self.x as f32;
        let max = (self.x + self.width) as f32 - car_width;
        (min, max)
    }

    /// Inclusive spawn X ranges left and right of the divider
    pub fn lane_intervals(&self, obstacle_width: i32) -> [(i32, i32); 2] {
        let half = self.width / 2;
        let half_divider = self.divider_width / 2;
        [
            (self.x, self.x + half - obstacle_width - half_divider),
            (
                self.x + half + half_divider,
                self.x + self.width - obstacle_width,
            ),
        ]
    }

    /// Whether an obstacle of this width has room in both lanes
    pub fn fits_in_lanes(&self, obstacle_width: i32) -> bool {
        self.lane_intervals(obstacle_width)
            .iter()
            .all(|(lo, hi)| lo <= hi)
    }
}

/// The player's car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Car {
    pub pos: Vec2,
    pub size: Vec2,
    /// Lateral speed, also the obstacle closing speed (pixels per tick)
    pub velocity: f32,
    pub handle: AssetHandle,
}

impl Car {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// An image handle with the size it is drawn and collided at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub handle: AssetHandle,
    pub width: u32,
    pub height: u32,
}

/// A configured obstacle variety
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleKind {
    pub name: String,
    pub sprite: Sprite,
}

/// Non-empty set of obstacle kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleKinds(Vec<ObstacleKind>);

impl ObstacleKinds {
    pub fn new(kinds: Vec<ObstacleKind>) -> Result<Self, ConfigError> {
        if kinds.is_empty() {
            return Err(ConfigError::NoObstacleKinds);
        }
        Ok(Self(kinds))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ObstacleKind> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObstacleKind> {
        self.0.iter()
    }
}

/// An obstacle descending the road
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Index into the configured obstacle kinds
    pub kind: usize,
    pub pos: Vec2,
    pub size: Vec2,
    pub handle: AssetHandle,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Everything needed to start a session, already validated
#[derive(Debug, Clone)]
pub struct WorldSpec {
    pub screen_width: u32,
    pub screen_height: u32,
    pub road: Road,
    /// Car at its starting position
    pub car: Car,
    pub obstacle_kinds: ObstacleKinds,
    pub spawn_threshold: u32,
}

impl WorldSpec {
    /// Lay out the road and car for a screen and check every size fits
    pub fn build(
        screen_width: u32,
        screen_height: u32,
        car_sprite: Sprite,
        obstacle_kinds: ObstacleKinds,
        speed_modifier: f32,
        tuning: &Tuning,
    ) -> Result<Self, ConfigError> {
        let velocity = tuning.base_speed * speed_modifier;
        let road = Road::for_screen(screen_width, screen_height, velocity, tuning.divider_width);

        if car_sprite.width as i32 > road.width
            || car_sprite.height > tuning.space_from_bottom
            || tuning.space_from_bottom > screen_height
        {
            return Err(ConfigError::MapTooSmall {
                width: screen_width,
                height: screen_height,
                car_width: car_sprite.width,
                car_height: car_sprite.height,
            });
        }

        let lane_width = road.width / 2 - road.divider_width / 2;
        for kind in obstacle_kinds.iter() {
            if !road.fits_in_lanes(kind.sprite.width as i32) {
                return Err(ConfigError::ObstacleTooWide {
                    name: kind.name.clone(),
                    width: kind.sprite.width,
                    lane_width,
                });
            }
        }

        let car_width = car_sprite.width as f32;
        let (min_x, max_x) = road.car_x_bounds(car_width);
        let start_x = ((screen_width / 2) as f32 - car_width / 2.0).clamp(min_x, max_x);
        let car = Car {
            pos: Vec2::new(start_x, (screen_height - tuning.space_from_bottom) as f32),
            size: Vec2::new(car_width, car_sprite.height as f32),
            velocity,
            handle: car_sprite.handle,
        };

        Ok(Self {
            screen_width,
            screen_height,
            road,
            car,
            obstacle_kinds,
            spawn_threshold: crate::spawn_threshold(tuning.spawn_base_ticks, speed_modifier),
        })
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub road: Road,
    pub car: Car,
    /// Live obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    pub obstacle_kinds: ObstacleKinds,
    pub spawn_timer: SpawnTimer,
    pub score: u64,
    pub session: SessionState,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    /// Lane marking scroll offset, for rendering
    pub road_offset: f32,
    next_id: u32,
}

impl GameState {
    /// Create a new session in the Playing state
    pub fn new(spec: WorldSpec, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen_width: spec.screen_width as f32,
            screen_height: spec.screen_height as f32,
            road: spec.road,
            car: spec.car,
            obstacles: Vec::new(),
            obstacle_kinds: spec.obstacle_kinds,
            spawn_timer: SpawnTimer::new(spec.spawn_threshold),
            score: 0,
            session: SessionState::Playing,
            time_ticks: 0,
            road_offset: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.session == SessionState::GameOver
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// 800x600 screen: road x=200 width=400, divider 20, car 50x50 at y=400
    pub fn spec() -> WorldSpec {
        spec_with_speed(1.0)
    }

    pub fn spec_with_speed(speed_modifier: f32) -> WorldSpec {
        let car = sprite(0, 50, 50);
        let kinds = ObstacleKinds::new(vec![
            kind("cone", sprite(1, 30, 30)),
            kind("truck", sprite(2, 60, 90)),
        ])
        .unwrap();
        let tuning = Tuning {
            space_from_bottom: 200,
            ..Tuning::default()
        };
        WorldSpec::build(800, 600, car, kinds, speed_modifier, &tuning).unwrap()
    }

    pub fn sprite(id: u32, width: u32, height: u32) -> Sprite {
        Sprite {
            handle: AssetHandle::from_id(id),
            width,
            height,
        }
    }

    pub fn kind(name: &str, sprite: Sprite) -> ObstacleKind {
        ObstacleKind {
            name: name.to_string(),
            sprite,
        }
    }

    pub fn state() -> GameState {
        GameState::new(spec(), 12345)
    }

    /// Place an obstacle directly into the live set
    pub fn push_obstacle(state: &mut GameState, x: f32, y: f32, width: f32, height: f32) -> u32 {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: 0,
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            handle: AssetHandle::from_id(1),
        });
        id
    }
}
