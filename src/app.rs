//! Game loop driver
//!
//! One iteration per tick, in strict order: poll and dispatch input, then
//! either stop (GameOver), draw the menu (Menu) or advance the simulation
//! and draw (Playing), then sleep until the next tick boundary. Once the
//! session is over no further input is read, so the run always ends in the
//! results screen.

use std::time::Duration;

use crate::error::Result;
use crate::highscores::Leaderboard;
use crate::persistence::RecordStore;
use crate::platform::{Command, InputSnapshot, InputSource, Pacer};
use crate::renderer::Frontend;
use crate::sim::{
    GameEvent, GameState, MenuAction, SessionState, Transition, apply_menu_action, open_menu, tick,
};
use crate::ui::Layout;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Collision; the score should be recorded
    GameOver { score: u64 },
    /// Exit from the menu or an interrupt; nothing is recorded
    Exited { score: u64 },
}

/// Owns the session state and the collaborators for one run
pub struct Driver<I, F, P> {
    pub state: GameState,
    layout: Layout,
    input: I,
    frontend: F,
    pacer: P,
}

impl<I: InputSource, F: Frontend, P: Pacer> Driver<I, F, P> {
    pub fn new(state: GameState, input: I, frontend: F, pacer: P) -> Self {
        let layout = Layout::new(state.screen_width);
        Self {
            state,
            layout,
            input,
            frontend,
            pacer,
        }
    }

    /// Run ticks until game over or exit
    pub fn run(&mut self) -> Result<Outcome> {
        log::info!("Session started (seed {})", self.state.seed);
        loop {
            if self.state.is_over() {
                break;
            }
            let snapshot = self.input.poll()?;
            if let Some((columns, rows)) = snapshot.resize {
                self.frontend.resize(columns, rows);
            }
            if self.dispatch(&snapshot) == Transition::Exit {
                log::info!("Session exited at score {}", self.state.score);
                return Ok(Outcome::Exited {
                    score: self.state.score,
                });
            }

            match self.state.session {
                SessionState::GameOver => break,
                SessionState::Menu => self.frontend.draw_menu(&self.state, &self.layout)?,
                SessionState::Playing => {
                    let events = tick(&mut self.state, &snapshot.held);
                    self.log_events(&events);
                    self.frontend.draw_playing(&self.state, &self.layout)?;
                }
            }

            self.pacer.wait_frame();
        }

        log::info!(
            "Game over after {} ticks, score {}",
            self.state.time_ticks,
            self.state.score
        );
        Ok(Outcome::GameOver {
            score: self.state.score,
        })
    }

    /// Apply commands, then clicks, in arrival order
    fn dispatch(&mut self, snapshot: &InputSnapshot) -> Transition {
        for command in &snapshot.commands {
            let transition = match *command {
                Command::Quit => Transition::Exit,
                Command::ToggleMenu => match self.state.session {
                    SessionState::Playing => {
                        open_menu(&mut self.state);
                        Transition::Continue
                    }
                    SessionState::Menu => self.choose(MenuAction::Resume),
                    SessionState::GameOver => Transition::Continue,
                },
                Command::Choose(action) if self.state.session == SessionState::Menu => {
                    self.choose(action)
                }
                Command::Choose(_) | Command::Steer { .. } => Transition::Continue,
            };
            if transition == Transition::Exit {
                return transition;
            }
        }

        for &(column, row) in &snapshot.clicks {
            let Some(point) = self.frontend.cell_to_world(column, row) else {
                continue;
            };
            match self.state.session {
                SessionState::Playing if self.layout.button.hit(point) => {
                    open_menu(&mut self.state);
                }
                SessionState::Menu => match self.layout.menu.hit(point) {
                    Some(action) => {
                        if self.choose(action) == Transition::Exit {
                            return Transition::Exit;
                        }
                    }
                    None => log::debug!("Click at {:?} missed the menu", point),
                },
                _ => {}
            }
        }
        Transition::Continue
    }

    fn choose(&mut self, action: MenuAction) -> Transition {
        let transition = apply_menu_action(&mut self.state, action);
        if self.state.session == SessionState::Playing {
            // Keys latched before the menu opened must not leak into play
            self.input.reset();
        }
        transition
    }

    fn log_events(&self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Collision { id } = event {
                log::debug!("Tick {}: collision with obstacle {}", self.state.time_ticks, id);
            }
        }
    }

    /// Show the results screen and keep it up for `hold`
    pub fn show_results(&mut self, leaderboard: &Leaderboard, score: u64, hold: Duration) -> Result<()> {
        self.frontend.draw_results(leaderboard, score)?;
        self.pacer.hold(hold);
        Ok(())
    }

    /// Record the final score, then show the results
    ///
    /// The results are shown even if saving fails. When both fail the save
    /// error is logged and the render error returned.
    pub fn finish_game<S: RecordStore>(
        &mut self,
        store: &mut S,
        nickname: &str,
        leaderboard: &Leaderboard,
        score: u64,
        hold: Duration,
    ) -> Result<()> {
        let saved = store.submit_score(nickname, score);
        let shown = self.show_results(leaderboard, score, hold);
        match (saved, shown) {
            (Ok(_), shown) => shown,
            (Err(e), Ok(())) => Err(e.into()),
            (Err(save_err), Err(show_err)) => {
                log::error!("Score for {} not saved: {}", nickname, save_err);
                Err(show_err)
            }
        }
    }

    pub fn into_parts(self) -> (GameState, I, F, P) {
        (self.state, self.input, self.frontend, self.pacer)
    }
}
