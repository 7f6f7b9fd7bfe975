//! Session scheduler: countdown, pause and game-over around a `GameState`.
//!
//! The core has no notion of pausing or of a pre-game countdown. The session
//! owns both by deciding which ticks and actions reach the game.

use tracing::info;

use crate::config::Config;
use crate::core::{GameSnapshot, GameState};
use crate::term::Overlay;
use crate::types::{CoreEvent, GameAction, PieceKind};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting to spawn the first piece.
    Countdown { remaining_ms: u32 },
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    phase: SessionPhase,
    countdown_ms: u32,
    first_piece: Option<PieceKind>,
}

impl Session {
    /// A session that spawns its first piece after `countdown_ms`.
    pub fn new(seed: u32, countdown_ms: u32) -> Self {
        Self::with_first_piece(seed, countdown_ms, None)
    }

    /// Like [`Session::new`], forcing the first piece of every game.
    pub fn with_first_piece(seed: u32, countdown_ms: u32, first_piece: Option<PieceKind>) -> Self {
        let mut session = Self {
            game: GameState::new(seed),
            phase: SessionPhase::Countdown {
                remaining_ms: countdown_ms,
            },
            countdown_ms,
            first_piece,
        };
        session.enter_countdown();
        session
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_first_piece(
            config.resolved_seed(),
            config.countdown_ms(),
            config.first_piece,
        )
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Advance the countdown or the game by `elapsed_ms`.
    ///
    /// Returns true if the game performed a drop.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self.phase {
            SessionPhase::Countdown { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
                if remaining_ms == 0 {
                    self.begin();
                } else {
                    self.phase = SessionPhase::Countdown { remaining_ms };
                }
                false
            }
            SessionPhase::Running => {
                let dropped = self.game.tick(elapsed_ms);
                self.sync_game_over();
                dropped
            }
            SessionPhase::Paused | SessionPhase::GameOver => false,
        }
    }

    /// Forward an action to the game.
    ///
    /// `Restart` is accepted in every phase; everything else only while
    /// running.
    pub fn apply(&mut self, action: GameAction) -> bool {
        if action == GameAction::Restart {
            self.restart();
            return true;
        }
        if self.phase != SessionPhase::Running {
            return false;
        }

        let applied = self.game.apply_action(action);
        self.sync_game_over();
        applied
    }

    /// Suspend or resume a running game.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            _ => return false,
        };
        info!(paused = self.phase == SessionPhase::Paused, "pause toggled");
        true
    }

    /// Throw the current game away and count down into a new one.
    pub fn restart(&mut self) {
        self.game.reset_game_state();
        info!("restart");
        self.enter_countdown();
    }

    /// Reset everything to the values of a fresh session.
    pub fn quit(&mut self) {
        info!(
            score = self.game.score(),
            lines = self.game.lines(),
            "session quit"
        );
        self.game.reset_game_state();
        self.enter_countdown();
    }

    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        self.game.take_events()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    /// What the view should draw over the playfield.
    pub fn overlay(&self) -> Overlay {
        match self.phase {
            SessionPhase::Countdown { remaining_ms } => {
                Overlay::Countdown(remaining_ms.div_ceil(1000))
            }
            SessionPhase::Running => Overlay::None,
            SessionPhase::Paused => Overlay::Paused,
            SessionPhase::GameOver => Overlay::GameOver,
        }
    }

    fn enter_countdown(&mut self) {
        if let Some(kind) = self.first_piece {
            self.game.force_next(kind);
        }
        if self.countdown_ms == 0 {
            self.begin();
        } else {
            self.phase = SessionPhase::Countdown {
                remaining_ms: self.countdown_ms,
            };
        }
    }

    fn begin(&mut self) {
        self.game.start();
        self.phase = SessionPhase::Running;
        self.sync_game_over();
        info!(seed = self.game.seed(), "game started");
    }

    fn sync_game_over(&mut self) {
        if self.game.is_game_over() {
            self.phase = SessionPhase::GameOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;

    #[test]
    fn countdown_then_spawn() {
        let mut session = Session::new(1, 3000);
        assert_eq!(
            session.phase(),
            SessionPhase::Countdown { remaining_ms: 3000 }
        );
        assert_eq!(session.overlay(), Overlay::Countdown(3));
        assert!(session.game().active().is_none());

        session.tick(1500);
        assert_eq!(session.overlay(), Overlay::Countdown(2));
        assert!(!session.apply(GameAction::HardDrop));

        session.tick(1500);
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.game().phase(), Phase::Falling);
    }

    #[test]
    fn zero_countdown_starts_immediately() {
        let session = Session::with_first_piece(1, 0, Some(PieceKind::O));
        assert!(session.is_running());
        assert_eq!(session.game().active().unwrap().kind(), PieceKind::O);
    }

    #[test]
    fn first_piece_is_forced() {
        let mut session = Session::with_first_piece(1, 100, Some(PieceKind::I));
        session.tick(100);
        assert_eq!(session.game().active().unwrap().kind(), PieceKind::I);

        session.restart();
        session.tick(100);
        assert_eq!(session.game().active().unwrap().kind(), PieceKind::I);
    }

    #[test]
    fn quit_keeps_forcing_the_first_piece() {
        let mut session = Session::with_first_piece(1, 100, Some(PieceKind::L));
        session.tick(100);
        session.apply(GameAction::HardDrop);

        session.quit();
        assert_eq!(session.phase(), SessionPhase::Countdown { remaining_ms: 100 });
        assert_eq!(session.game().score(), 0);
        session.tick(100);
        assert_eq!(session.game().active().unwrap().kind(), PieceKind::L);
    }

    #[test]
    fn pause_withholds_ticks_and_actions() {
        let mut session = Session::new(1, 0);
        let y = session.game().active().unwrap().y;

        assert!(session.toggle_pause());
        assert_eq!(session.overlay(), Overlay::Paused);
        assert!(!session.tick(5000));
        assert!(!session.apply(GameAction::SoftDrop));
        assert_eq!(session.game().active().unwrap().y, y);

        assert!(session.toggle_pause());
        assert!(session.tick(1001));
        assert_eq!(session.game().active().unwrap().y, y + 1);
    }

    #[test]
    fn pause_is_ignored_during_countdown() {
        let mut session = Session::new(1, 1000);
        assert!(!session.toggle_pause());
    }

    #[test]
    fn restart_counts_down_again() {
        let mut session = Session::new(1, 1000);
        session.tick(1000);
        session.apply(GameAction::HardDrop);

        assert!(session.apply(GameAction::Restart));
        assert_eq!(
            session.phase(),
            SessionPhase::Countdown { remaining_ms: 1000 }
        );
        assert!(session.game().board().rows().iter().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn game_over_is_tracked() {
        let mut session = Session::new(1, 0);
        for _ in 0..200 {
            if session.phase() == SessionPhase::GameOver {
                break;
            }
            session.apply(GameAction::HardDrop);
        }

        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.overlay(), Overlay::GameOver);
        assert!(!session.tick(5000));
        assert!(session.take_events().contains(&CoreEvent::GameOver));
    }

    #[test]
    fn from_config_uses_seed_and_countdown() {
        let config = Config {
            seed: Some(9),
            countdown: 0,
            ..Config::default()
        };
        let session = Session::from_config(&config);
        assert!(session.is_running());
        assert_eq!(session.game().seed(), 9);
    }

    #[test]
    fn quit_resets_to_initial_values() {
        let mut session = Session::new(1, 500);
        session.tick(500);
        session.apply(GameAction::HardDrop);

        session.quit();
        assert_eq!(session.game().score(), 0);
        assert!(session.game().active().is_none());
        assert_eq!(
            session.phase(),
            SessionPhase::Countdown { remaining_ms: 500 }
        );
    }
}
