//! Simulation driver.
//!
//! Owns the session state and the collaborators it talks to, and runs the
//! Idle/Running state machine:
//!
//! ```text
//!   Idle ──fire / direction──▶ Running ──player hit──▶ Idle
//! ```
//!
//! Leaving Idle always starts a fresh session.  While running, each tick
//! goes motion → collisions → spawning via [`compute::tick`]; the caller
//! renders after [`Game::advance`] reports that ticks ran.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::compute::{self, TICKS_PER_SECOND};
use crate::display::{self, Surface, TextSurfaces};
use crate::entities::{Field, GameState, GameStatus, Velocity};
use crate::input::InputEvent;
use crate::persistence::HighScoreStore;
use crate::scheduler::Scheduler;

/// Status message shown while idle, before the first session or after one.
pub fn idle_message(field: &Field, game_over: bool) -> &'static str {
    match (field.device.is_mobile(), game_over) {
        (false, false) => "Press Space to start",
        (true, false) => "Tap arrows to start",
        (false, true) => "Game Over! Press Space to restart",
        (true, true) => "Game Over! Tap arrows to restart",
    }
}

pub struct Game<R, S, T> {
    state: GameState,
    rng: R,
    store: S,
    text: T,
    scheduler: Scheduler,
    /// Last value handed to the store, to avoid rewriting it every tick.
    saved_high_score: u32,
}

impl<R: Rng, S: HighScoreStore, T: TextSurfaces> Game<R, S, T> {
    /// Build an idle session for `field`, reading the stored high score.
    pub fn new(field: Field, mut rng: R, store: S, text: T) -> Self {
        let high_score = store.get_high_score().unwrap_or(0);
        let state = compute::init_state(field, high_score, &mut rng);
        let mut game = Self {
            state,
            rng,
            store,
            text,
            scheduler: Scheduler::new(TICKS_PER_SECOND),
            saved_high_score: high_score,
        };
        game.push_scores();
        game.text.show_message(idle_message(&field, false));
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn text(&self) -> &T {
        &self.text
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.state.status == GameStatus::Running
    }

    /// Replace the session state wholesale.  The scheduler follows the
    /// new state's status.
    pub fn load_state(&mut self, state: GameState, now: Instant) {
        self.state = state;
        if self.is_running() {
            self.scheduler.start(now);
            self.text.hide_message();
        } else {
            self.scheduler.stop();
        }
        self.push_scores();
    }

    /// Stop any running session and start over idle on `field`.
    pub fn reset(&mut self, field: Field) {
        self.scheduler.stop();
        self.fresh_session(field);
        self.text.show_message(idle_message(&field, false));
    }

    /// Start a fresh session.  No-op while one is already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.fresh_session(self.state.field);
        self.state.status = GameStatus::Running;
        self.scheduler.start(now);
        self.text.hide_message();
        log::info!("Session started on {:?}", self.state.field);
        true
    }

    /// Halt the tick loop and freeze the state.  Idempotent.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.state.status = GameStatus::Idle;
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Fire => {
                if self.is_running() {
                    self.state = compute::player_shoot(&self.state);
                } else {
                    self.start(now);
                }
            }
            InputEvent::DirectionStart(direction) => {
                self.start(now);
                self.state = compute::set_velocity(&self.state, direction.velocity());
            }
            InputEvent::DirectionEnd => {
                self.state = compute::set_velocity(&self.state, Velocity::ZERO);
            }
        }
    }

    /// Run exactly one tick.  Does nothing while idle.
    pub fn step(&mut self) {
        if !self.is_running() {
            return;
        }
        let score = self.state.score;
        self.state = compute::tick(&self.state, &mut self.rng);
        if self.state.score != score {
            self.text.set_score(self.state.score);
        }
        self.save_high_score();
        if self.state.status == GameStatus::Idle {
            self.game_over();
        }
    }

    /// Run every tick that has come due by `now`; returns how many ran.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let due = self.scheduler.poll(now);
        let mut ran = 0;
        while ran < due && self.is_running() {
            self.step();
            ran += 1;
        }
        ran
    }

    /// How long the caller may wait before the next tick, or `None` while
    /// idle.
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }

    pub fn render(&self, surface: &mut impl Surface) {
        display::render(surface, &self.state);
    }

    // ── internals ─────────────────────────────────────────────────────────────

    fn fresh_session(&mut self, field: Field) {
        let high_score = self
            .store
            .get_high_score()
            .unwrap_or(0)
            .max(self.state.high_score);
        self.state = compute::init_state(field, high_score, &mut self.rng);
        self.push_scores();
    }

    fn game_over(&mut self) {
        self.stop();
        log::info!(
            "Game over after {} ticks, score {}",
            self.state.frame,
            self.state.score
        );
        self.text.show_message(idle_message(&self.state.field, true));
    }

    fn save_high_score(&mut self) {
        let high_score = self.state.high_score;
        if high_score > self.saved_high_score {
            self.store.set_high_score(high_score);
            self.saved_high_score = high_score;
            self.text.set_high_score(high_score);
            log::debug!("New high score {}", high_score);
        }
    }

    fn push_scores(&mut self) {
        self.text.set_score(self.state.score);
        self.text.set_high_score(self.state.high_score);
    }
}
