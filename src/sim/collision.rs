//! Collision detection and scoring
//!
//! Each tick every live obstacle descends, is checked for passing the car's
//! front edge and for overlapping the car, and finally obstacles below the
//! screen are culled. Culling happens after the whole set was evaluated so
//! no obstacle is skipped.

use super::geometry::Rect;
use super::motion::descend;
use super::state::{Car, GameEvent, GameState, Obstacle, SessionState};

/// Result of checking one obstacle against the car
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Obstacle crossed the car's front edge this tick
    pub passed: bool,
    /// Obstacle overlaps the car
    pub collided: bool,
}

/// Whether an obstacle at `obstacle_y` crossed the car's front edge within
/// the last tick of travel
///
/// Fires once per obstacle when it moves exactly `velocity` per tick.
#[inline]
pub fn passed_front_edge(obstacle_y: f32, car: &Car) -> bool {
    let gap = obstacle_y - car.pos.y - car.size.y;
    -car.velocity < gap && gap <= 0.0
}

/// Axis-aligned overlap between car and obstacle
#[inline]
pub fn overlaps(car: &Rect, obstacle: &Rect) -> bool {
    car.overlaps(obstacle)
}

/// Evaluate one obstacle at its current position
pub fn evaluate(obstacle: &Obstacle, car: &Car) -> Evaluation {
    Evaluation {
        passed: passed_front_edge(obstacle.pos.y, car),
        collided: overlaps(&car.rect(), &obstacle.rect()),
    }
}

/// Descend every obstacle, score passes, detect collisions, then cull
///
/// A collision ends the session but the remaining obstacles are still
/// evaluated; points scored earlier in the same pass stand.
pub fn advance_obstacles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let car = state.car;

    for obstacle in state.obstacles.iter_mut() {
        descend(obstacle, car.velocity);

        let eval = evaluate(obstacle, &car);
        if eval.passed {
            state.score += 1;
            events.push(GameEvent::ObstaclePassed { id: obstacle.id });
            log::debug!("Obstacle {} passed, score {}", obstacle.id, state.score);
        }
        if eval.collided {
            if state.session != SessionState::GameOver {
                log::info!("Collision with obstacle {} at score {}", obstacle.id, state.score);
            }
            state.session = SessionState::GameOver;
            events.push(GameEvent::Collision { id: obstacle.id });
        }
    }

    let screen_height = state.screen_height;
    state.obstacles.retain(|obstacle| {
        let keep = obstacle.pos.y <= screen_height;
        if !keep {
            events.push(GameEvent::ObstacleCulled { id: obstacle.id });
        }
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::test_support;

    #[test]
    fn test_collision_overlap() {
        // Car at (100, 400) 50x50, obstacle at (110, 420) 30x30
        let car = Rect::new(100.0, 400.0, 50.0, 50.0);
        let obstacle = Rect::new(110.0, 420.0, 30.0, 30.0);
        assert!(overlaps(&car, &obstacle));
    }

    #[test]
    fn test_collision_ends_session() {
        let mut state = test_support::state();
        state.car.pos.x = 250.0;
        // Descends by 5 to y=420, inside the car (y 400..450)
        let id = test_support::push_obstacle(&mut state, 260.0, 415.0, 30.0, 30.0);

        let mut events = Vec::new();
        advance_obstacles(&mut state, &mut events);
        assert_eq!(state.session, SessionState::GameOver);
        assert!(events.contains(&GameEvent::Collision { id }));
    }

    #[test]
    fn test_no_false_collision_outside_x_range() {
        let mut state = test_support::state();
        state.car.pos.x = 250.0;
        test_support::push_obstacle(&mut state, 500.0, 300.0, 30.0, 30.0);

        let mut events = Vec::new();
        for _ in 0..100 {
            advance_obstacles(&mut state, &mut events);
        }
        assert_eq!(state.session, SessionState::Playing);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Collision { .. })));
    }

    #[test]
    fn test_pass_scoring_exactly_once() {
        // car.Y=400, height=50, velocity=5: front edge at 450
        let car = test_support::state().car;
        assert_eq!((car.pos.y, car.size.y, car.velocity), (400.0, 50.0, 5.0));

        let hits: Vec<bool> = [440.0, 445.0, 450.0, 455.0, 460.0]
            .iter()
            .map(|y| passed_front_edge(*y, &car))
            .collect();
        assert_eq!(hits, vec![false, false, true, false, false]);
    }

    #[test]
    fn test_pass_gap_window_is_half_open() {
        let car = test_support::state().car;
        // gap == 0 counts, gap == -velocity does not
        assert!(passed_front_edge(450.0, &car));
        assert!(!passed_front_edge(445.0, &car));
        assert!(passed_front_edge(445.5, &car));
    }

    #[test]
    fn test_descending_obstacle_scores_once() {
        let mut state = test_support::state();
        state.car.pos.x = 200.0;
        // Right lane, never overlaps the car in X
        test_support::push_obstacle(&mut state, 500.0, 0.0, 30.0, 30.0);

        let mut events = Vec::new();
        while !state.obstacles.is_empty() {
            advance_obstacles(&mut state, &mut events);
        }
        assert_eq!(state.score, 1);
        let passes = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
            .count();
        assert_eq!(passes, 1);
    }

    #[test]
    fn test_pass_and_collision_same_tick_keeps_score() {
        let mut state = test_support::state();
        state.car.pos.x = 250.0;
        // A tall obstacle whose top crosses the front edge (gap -2) while overlapping the car
        let id = test_support::push_obstacle(&mut state, 260.0, 443.0, 30.0, 100.0);

        let mut events = Vec::new();
        advance_obstacles(&mut state, &mut events);
        assert_eq!(state.score, 1);
        assert_eq!(state.session, SessionState::GameOver);
        assert_eq!(
            events,
            vec![
                GameEvent::ObstaclePassed { id },
                GameEvent::Collision { id }
            ]
        );
    }

    #[test]
    fn test_cull_keeps_evaluating_remaining_obstacles() {
        let mut state = test_support::state();
        state.car.pos.x = 200.0;
        // Leaves the screen this tick (598 + 5 > 600)
        let gone = test_support::push_obstacle(&mut state, 500.0, 598.0, 30.0, 30.0);
        // Immediately after the culled one: crosses the front edge this tick
        let scorer = test_support::push_obstacle(&mut state, 500.0, 445.0, 30.0, 30.0);
        // Also leaves the screen
        let gone_too = test_support::push_obstacle(&mut state, 300.0, 600.0, 30.0, 30.0);
        // Stays on screen, collides with the car
        let hitter = test_support::push_obstacle(&mut state, 210.0, 380.0, 30.0, 30.0);

        let mut events = Vec::new();
        advance_obstacles(&mut state, &mut events);

        let remaining: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(remaining, vec![scorer, hitter]);
        assert_eq!(state.score, 1);
        assert_eq!(state.session, SessionState::GameOver);
        assert!(events.contains(&GameEvent::ObstacleCulled { id: gone }));
        assert!(events.contains(&GameEvent::ObstacleCulled { id: gone_too }));
        assert!(events.contains(&GameEvent::Collision { id: hitter }));
    }

    #[test]
    fn test_obstacle_at_screen_edge_is_kept() {
        let mut state = test_support::state();
        test_support::push_obstacle(&mut state, 500.0, 595.0, 30.0, 30.0);
        let mut events = Vec::new();
        advance_obstacles(&mut state, &mut events);
        // y == 600 is not past the screen height yet
        assert_eq!(state.obstacles.len(), 1);
        advance_obstacles(&mut state, &mut events);
        assert!(state.obstacles.is_empty());
    }
}
