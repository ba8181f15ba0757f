//! Motion integration: car steering with road clamping, obstacle descent

use super::state::{Car, Obstacle, Road};

/// Clamp a car X so the whole car stays on the road
#[inline]
pub fn clamp_to_road(x: f32, car_width: f32, road: &Road) -> f32 {
    let (min, max) = road.car_x_bounds(car_width);
    x.min(max).max(min)
}

/// Apply held left/right keys, then clamp. Both keys held cancel out.
pub fn steer_car(car: &mut Car, road: &Road, move_left: bool, move_right: bool) {
    let mut x = car.pos.x;
    if move_left {
        x -= car.velocity;
    }
    if move_right {
        x += car.velocity;
    }
    car.pos.x = clamp_to_road(x, car.size.x, road);
}

/// Move an obstacle down by the closing speed
#[inline]
pub fn descend(obstacle: &mut Obstacle, velocity: f32) {
    obstacle.pos.y += velocity;
}
