use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::input::{Direction, GameInput};
use crate::score::ScoreStore;
use crate::session::{GameSession, Snapshot};

/// Drives consecutive sessions and owns the high-score record.
///
/// The high score is loaded once on construction and saved once per session,
/// on the tick that ends it. Everything goes through `&mut self`, so ticks and
/// score I/O are serialised on the caller's thread.
#[derive(Debug)]
pub struct SessionManager<S: ScoreStore> {
    config: SessionConfig,
    store: S,
    high_score: u32,
    session: GameSession,
    seeds: StdRng,
    saved: bool,
}

impl<S: ScoreStore> SessionManager<S> {
    /// Loads the stored high score and starts the first session.
    ///
    /// With `seed` set, every session of this manager replays identically.
    pub fn new(config: SessionConfig, store: S, seed: Option<u64>) -> Result<Self, ConfigError> {
        config.validate()?;

        let high_score = store.load();
        let mut seeds = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = GameSession::new_with_seed(config, high_score, seeds.r#gen())?;
        info!(high_score, "high score loaded");

        let mut manager = Self {
            config,
            store,
            high_score,
            session,
            seeds,
            saved: false,
        };
        manager.save_if_finished();
        Ok(manager)
    }

    /// Advances the current session by one tick.
    pub fn tick(&mut self, intent: Option<Direction>) -> Snapshot {
        let snapshot = self.session.tick(intent);
        self.save_if_finished();
        snapshot
    }

    /// Replaces the current session with a fresh one using the same config.
    pub fn restart(&mut self) -> Result<Snapshot, ConfigError> {
        self.session = GameSession::new_with_seed(self.config, self.high_score, self.seeds.r#gen())?;
        self.saved = false;
        info!("session restarted");
        self.save_if_finished();
        Ok(self.session.snapshot())
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Best score across all sessions of this manager and the stored record.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Mutable access for scripted setups such as tests and demos.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn save_if_finished(&mut self) {
        if self.saved || !self.session.state().is_terminal() {
            return;
        }
        self.saved = true;

        let score = self.session.score;
        self.high_score = match self.store.save(score) {
            Ok(stored) => stored.max(self.high_score),
            Err(error) => {
                warn!(%error, score, "failed to save high score");
                self.high_score.max(score)
            }
        };
    }
}

/// What the frontend is doing between ticks.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Start,
    Playing,
    Paused,
}

/// What the frontend loop should do after an input was handled.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Control {
    Continue,
    /// A game started, resumed or restarted; the next tick is a full interval away.
    ResetClock,
    Quit,
}

/// Turns key presses into ticks for a [`SessionManager`].
///
/// Direction presses are latched between ticks, the latest one replacing any
/// earlier press, and handed to exactly one tick. Presses outside active play
/// are dropped.
#[derive(Debug)]
pub struct Driver<S: ScoreStore> {
    manager: SessionManager<S>,
    phase: Phase,
    intent: Option<Direction>,
    reference_high_score: u32,
}

impl<S: ScoreStore> Driver<S> {
    /// Wraps `manager`, waiting on the start screen.
    #[must_use]
    pub fn new(manager: SessionManager<S>) -> Self {
        let reference_high_score = manager.high_score();
        Self {
            manager,
            phase: Phase::Start,
            intent: None,
            reference_high_score,
        }
    }

    pub fn handle_input(&mut self, input: GameInput) -> Result<Control, ConfigError> {
        let finished = self.manager.session().state().is_terminal();

        let control = match input {
            GameInput::Quit => Control::Quit,
            GameInput::Direction(direction) => {
                if self.phase == Phase::Playing && !finished {
                    self.intent = Some(direction);
                } else {
                    debug!(?direction, phase = ?self.phase, "direction outside play dropped");
                }
                Control::Continue
            }
            GameInput::Pause => match self.phase {
                Phase::Playing if !finished => {
                    self.phase = Phase::Paused;
                    Control::Continue
                }
                Phase::Paused => {
                    self.phase = Phase::Playing;
                    Control::ResetClock
                }
                _ => Control::Continue,
            },
            GameInput::Confirm => match self.phase {
                Phase::Start => {
                    self.phase = Phase::Playing;
                    Control::ResetClock
                }
                Phase::Playing if finished => {
                    self.reference_high_score = self.manager.high_score();
                    self.manager.restart()?;
                    self.intent = None;
                    Control::ResetClock
                }
                _ => Control::Continue,
            },
        };

        Ok(control)
    }

    /// Runs one tick with the latched intent; `None` outside active play.
    pub fn tick(&mut self) -> Option<Snapshot> {
        if self.phase != Phase::Playing {
            return None;
        }

        Some(self.manager.tick(self.intent.take()))
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Direction waiting for the next tick.
    #[must_use]
    pub fn pending_intent(&self) -> Option<Direction> {
        self.intent
    }

    /// High score as it stood when the current session began.
    #[must_use]
    pub fn reference_high_score(&self) -> u32 {
        self.reference_high_score
    }

    #[must_use]
    pub fn manager(&self) -> &SessionManager<S> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut SessionManager<S> {
        &mut self.manager
    }
}
