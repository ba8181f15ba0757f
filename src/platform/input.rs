//! Keyboard and mouse input
//!
//! Terminals report key presses, not key state. When the keyboard
//! enhancement protocol is available we also get release events and track
//! held keys exactly; otherwise every press (or auto-repeat) keeps the key
//! held for a short latch window.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::consts::KEY_LATCH_TICKS;
use crate::error::Result;
use crate::sim::{MenuAction, TickInput};

/// Steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer { dir: Steer, pressed: bool },
    ToggleMenu,
    Choose(MenuAction),
    Quit,
}

/// Translate a key event into a game command
pub fn map_key(key: &KeyEvent) -> Option<Command> {
    let pressed = key.kind != KeyEventKind::Release;
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return pressed.then_some(Command::Quit);
    }

    let steer = |dir| Some(Command::Steer { dir, pressed });
    match key.code {
        KeyCode::Left | KeyCode::Char('a') => steer(Steer::Left),
        KeyCode::Right | KeyCode::Char('d') => steer(Steer::Right),
        _ if !pressed || key.kind == KeyEventKind::Repeat => None,
        KeyCode::Esc | KeyCode::Char('p') => Some(Command::ToggleMenu),
        KeyCode::Char('c') => Some(Command::Choose(MenuAction::Resume)),
        KeyCode::Char('r') => Some(Command::Choose(MenuAction::Restart)),
        KeyCode::Char('q') | KeyCode::Char('e') => Some(Command::Choose(MenuAction::Exit)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct KeyState {
    down: bool,
    latch: u32,
}

/// Held state of the two steering keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    /// Terminal reports key releases
    release_events: bool,
    left: KeyState,
    right: KeyState,
}

impl HeldKeys {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            ..Self::default()
        }
    }

    fn key_mut(&mut self, dir: Steer) -> &mut KeyState {
        match dir {
            Steer::Left => &mut self.left,
            Steer::Right => &mut self.right,
        }
    }

    pub fn apply(&mut self, dir: Steer, pressed: bool) {
        let release_events = self.release_events;
        let key = self.key_mut(dir);
        if release_events {
            key.down = pressed;
        } else if pressed {
            key.latch = KEY_LATCH_TICKS;
        }
    }

    /// Current held state; call once per tick
    pub fn tick(&mut self) -> TickInput {
        if self.release_events {
            return TickInput {
                move_left: self.left.down,
                move_right: self.right.down,
            };
        }
        let input = TickInput {
            move_left: self.left.latch > 0,
            move_right: self.right.latch > 0,
        };
        self.left.latch = self.left.latch.saturating_sub(1);
        self.right.latch = self.right.latch.saturating_sub(1);
        input
    }

    /// Drop all held keys (after the menu closes)
    pub fn clear(&mut self) {
        self.left = KeyState::default();
        self.right = KeyState::default();
    }
}

/// Everything that happened since the previous tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Steering keys held this tick
    pub held: TickInput,
    /// Left clicks, as (column, row) terminal cells
    pub clicks: Vec<(u16, u16)>,
    /// Discrete commands in arrival order
    pub commands: Vec<Command>,
    /// New terminal size
    pub resize: Option<(u16, u16)>,
}

/// A per-tick source of input
pub trait InputSource {
    fn poll(&mut self) -> Result<InputSnapshot>;

    /// Forget held keys, e.g. when leaving the menu
    fn reset(&mut self) {}
}

/// Non-blocking crossterm event reader
#[derive(Debug, Clone)]
pub struct TerminalInput {
    keys: HeldKeys,
}

impl TerminalInput {
    pub fn new(release_events: bool) -> Self {
        log::info!(
            "Key release events {}",
            if release_events { "available" } else { "unavailable, latching presses" }
        );
        Self {
            keys: HeldKeys::new(release_events),
        }
    }

    fn handle(&mut self, event: Event, snapshot: &mut InputSnapshot) {
        match event {
            Event::Key(key) => match map_key(&key) {
                Some(Command::Steer { dir, pressed }) => self.keys.apply(dir, pressed),
                Some(command) => snapshot.commands.push(command),
                None => {}
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                snapshot.clicks.push((mouse.column, mouse.row));
            }
            Event::Resize(columns, rows) => snapshot.resize = Some((columns, rows)),
            _ => {}
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<InputSnapshot> {
        let mut snapshot = InputSnapshot::default();
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle(event, &mut snapshot);
        }
        snapshot.held = self.keys.tick();
        Ok(snapshot)
    }

    fn reset(&mut self) {
        self.keys.clear();
    }
}
