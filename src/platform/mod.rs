//! Platform abstraction layer
//!
//! Handles the terminal side of the game:
//! - Input events (keys, mouse clicks, resizes)
//! - Frame pacing at the fixed tick rate
//! - Raw mode / alternate screen setup and teardown

pub mod input;
pub mod terminal;
pub mod time;

pub use input::{Command, HeldKeys, InputSnapshot, InputSource, Steer, TerminalInput, map_key};
pub use terminal::TerminalGuard;
pub use time::{FrameClock, Pacer};
