//! Data-driven game balance
//!
//! Defaults mirror `consts`; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance values that shape a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Car and obstacle speed at speed modifier 1 (pixels per tick)
    pub base_speed: f32,
    /// Ticks between spawns at speed modifier 1
    pub spawn_base_ticks: u32,
    /// Gap between the car and the bottom edge of the screen
    pub space_from_bottom: u32,
    /// Lane divider width
    pub divider_width: u32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Entries shown on the results screen
    pub leaderboard_size: usize,
    /// Seconds the results screen is held
    pub results_hold_secs: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            spawn_base_ticks: SPAWN_BASE_TICKS,
            space_from_bottom: SPACE_FROM_BOTTOM,
            divider_width: DIVIDER_WIDTH,
            tick_rate: TICK_RATE,
            leaderboard_size: LEADERBOARD_SIZE,
            results_hold_secs: RESULTS_HOLD_SECS,
        }
    }
}

impl Tuning {
    /// Load tuning overrides from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Tuning>(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace nonsensical values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.base_speed.is_nan() || self.base_speed <= 0.0 {
            self.base_speed = defaults.base_speed;
        }
        if self.spawn_base_ticks == 0 {
            self.spawn_base_ticks = defaults.spawn_base_ticks;
        }
        if self.tick_rate == 0 {
            self.tick_rate = defaults.tick_rate;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "base_speed": 6.0 }"#).unwrap();
        assert_eq!(tuning.base_speed, 6.0);
        assert_eq!(tuning.spawn_base_ticks, SPAWN_BASE_TICKS);
        assert_eq!(tuning.divider_width, DIVIDER_WIDTH);
    }

    #[test]
    fn test_sanitize_rejects_zero_speed() {
        let tuning = Tuning {
            base_speed: 0.0,
            tick_rate: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.base_speed, BASE_SPEED);
        assert_eq!(tuning.tick_rate, TICK_RATE);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tuning = Tuning::load(Path::new("/definitely/not/here/tuning.json"));
        assert_eq!(tuning, Tuning::default());
    }
}
