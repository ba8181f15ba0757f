//! Frame pacing

use std::time::{Duration, Instant};

/// Blocks the loop between ticks
pub trait Pacer {
    /// Sleep until the next tick boundary
    fn wait_frame(&mut self);

    /// Block for a fixed duration (results screen)
    fn hold(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Sleeps out the remainder of each fixed-length frame
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    frame_start: Instant,
    /// Frames that took longer than the budget
    pub overruns: u64,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            frame: Self::frame_duration(tick_rate),
            frame_start: Instant::now(),
            overruns: 0,
        }
    }

    pub fn frame_duration(tick_rate: u32) -> Duration {
        Duration::from_secs(1) / tick_rate.max(1)
    }
}

impl Pacer for FrameClock {
    fn wait_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        } else {
            self.overruns += 1;
            log::debug!("Frame overran by {:?}", elapsed - self.frame);
        }
        self.frame_start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        assert_eq!(FrameClock::frame_duration(60), Duration::from_nanos(16_666_666));
        assert_eq!(FrameClock::frame_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_frame_fills_the_budget() {
        let mut clock = FrameClock::new(100);
        let start = Instant::now();
        clock.wait_frame();
        clock.wait_frame();
        assert!(start.elapsed() >= Duration::from_millis(19));
    }
}
