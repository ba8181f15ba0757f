//! Session state transitions: pause menu, resume, restart, exit

use super::state::{GameState, SessionState};

/// A pause menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Resume,
    Restart,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] = [MenuAction::Resume, MenuAction::Restart, MenuAction::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Resume => "Continue",
            MenuAction::Restart => "Restart",
            MenuAction::Exit => "Exit",
        }
    }
}

/// What the driver should do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep running the loop
    Continue,
    /// Leave the loop without recording a score
    Exit,
}

/// Open the pause menu. Only valid while playing.
pub fn open_menu(state: &mut GameState) -> bool {
    if state.session != SessionState::Playing {
        return false;
    }
    state.session = SessionState::Menu;
    log::info!("Menu opened at score {}", state.score);
    true
}

/// Reset score, obstacles and spawn timer and resume play
///
/// The car keeps its position.
pub fn restart(state: &mut GameState) {
    state.score = 0;
    state.obstacles.clear();
    state.spawn_timer.reset();
    state.session = SessionState::Playing;
}

/// Apply a menu selection. Ignored unless the menu is open.
pub fn apply_menu_action(state: &mut GameState, action: MenuAction) -> Transition {
    if state.session != SessionState::Menu {
        log::warn!("Ignoring {:?} outside the menu ({:?})", action, state.session);
        return Transition::Continue;
    }

    match action {
        MenuAction::Resume => {
            state.session = SessionState::Playing;
            log::info!("Resumed");
            Transition::Continue
        }
        MenuAction::Restart => {
            restart(state);
            log::info!("Restarted");
            Transition::Continue
        }
        MenuAction::Exit => {
            log::info!("Exit selected at score {}", state.score);
            Transition::Exit
        }
    }
}
