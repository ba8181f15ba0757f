//! Obstacle spawning
//!
//! A tick counter drives spawning: once it reaches the threshold a random
//! obstacle kind is placed at a random X inside one of the two lanes.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle, ObstacleKinds, Road};

/// Integer tick counter with a fixed spawn threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTimer {
    pub ticks: u32,
    pub threshold: u32,
}

impl SpawnTimer {
    pub fn new(threshold: u32) -> Self {
        Self {
            ticks: 0,
            threshold,
        }
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn is_due(&self) -> bool {
        self.ticks >= self.threshold
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}

/// Pick a kind and a lane position for a new obstacle at the top of the road
pub fn roll_obstacle<R: Rng>(rng: &mut R, road: &Road, kinds: &ObstacleKinds, id: u32) -> Obstacle {
    let kind_index = rng.random_range(0..kinds.len());
    let Some(kind) = kinds.get(kind_index) else {
        unreachable!("obstacle kind index out of range");
    };
    let sprite = kind.sprite;

    let lanes = road.lane_intervals(sprite.width as i32);
    let (lo, hi) = lanes[rng.random_range(0..lanes.len())];
    debug_assert!(lo <= hi, "lane too narrow for obstacle; checked at startup");
    let x = rng.random_range(lo..=hi);

    Obstacle {
        id,
        kind: kind_index,
        pos: Vec2::new(x as f32, 0.0),
        size: Vec2::new(sprite.width as f32, sprite.height as f32),
        handle: sprite.handle,
    }
}

/// Spawn an obstacle if the timer is due; call after advancing the timer
pub fn spawn_if_due(state: &mut GameState) -> Option<GameEvent> {
    if !state.spawn_timer.is_due() {
        return None;
    }

    let id = state.next_entity_id();
    let obstacle = roll_obstacle(&mut state.rng, &state.road, &state.obstacle_kinds, id);
    let event = GameEvent::ObstacleSpawned {
        id,
        kind: obstacle.kind,
    };
    log::debug!(
        "Spawned obstacle {} (kind {}) at x={}",
        id,
        obstacle.kind,
        obstacle.pos.x
    );
    state.obstacles.push(obstacle);
    state.spawn_timer.reset();
    Some(event)
}
