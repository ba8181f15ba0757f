//! Fixed timestep simulation tick
//!
//! Advances a Playing session by one step: steer, spawn, descend and
//! evaluate. Nothing moves in Menu or GameOver.

use super::collision::advance_obstacles;
use super::motion::steer_car;
use super::spawn::spawn_if_due;
use super::state::{GameEvent, GameState, SessionState};
use crate::consts::ROAD_DASH_PERIOD;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left steering key held
    pub move_left: bool,
    /// Right steering key held
    pub move_right: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.session != SessionState::Playing {
        return events;
    }

    state.time_ticks += 1;
    state.road_offset = (state.road_offset + state.road.scroll_speed).rem_euclid(ROAD_DASH_PERIOD);

    steer_car(&mut state.car, &state.road, input.move_left, input.move_right);

    state.spawn_timer.advance();
    if let Some(event) = spawn_if_due(state) {
        events.push(event);
    }

    advance_obstacles(state, &mut events);
    events
}
