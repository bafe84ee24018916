//! One explicit context object for a play session: world, countdown, input
//! latch and RNG. The browser driver owns exactly one of these; tests build
//! their own with a seeded RNG.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace};

use crate::config::GameConfig;
use crate::engine::{self, GameEvent, World};
use crate::entities::SUN;
use crate::input::InputTracker;
use crate::session::{Session, SessionStatus, TickOutcome};
use crate::snapshot::{FrameSnapshot, GameOverMessage, HookLine};

/// What the frame driver should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// State advanced; redraw and schedule another frame.
    Continue,
    /// Paused: schedule another frame but skip the redraw.
    Frozen,
    /// Session over: draw the final frame and stop scheduling.
    Halted,
}

pub struct Game<R: Rng = ChaCha8Rng> {
    config: GameConfig,
    world: World,
    session: Session,
    input: InputTracker,
    rng: R,
    last_events: Vec<GameEvent>,
}

impl Game<ChaCha8Rng> {
    /// Seeded from `config.seed` when present, otherwise from entropy.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let config = config.sanitized();
        let world = World::new(&config, &mut rng);
        let session = Session::new(config.session_seconds);
        info!(
            fish = world.fish.len(),
            seconds = config.session_seconds,
            "session started"
        );
        Self {
            config,
            world,
            session,
            input: InputTracker::new(),
            rng,
            last_events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for scripted scenarios.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    /// Events produced by the most recent `frame`.
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn key_down(&mut self, key: &str) {
        let fresh = !self.input.is_key_down(key);
        self.input.key_down(key);
        // Auto-repeat must not toggle twice.
        if fresh && self.config.pause_keys.iter().any(|k| k == key) {
            self.toggle_pause();
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Window lost focus: nothing is held any more.
    pub fn release_keys(&mut self) {
        self.input.release_keys();
    }

    /// Clicks are only queued while the session is running.
    pub fn click(&mut self, x: f64, y: f64) {
        if self.session.is_running() {
            self.input.click(x, y);
        }
    }

    pub fn is_bound_key(&self, key: &str) -> bool {
        let cfg = &self.config;
        cfg.left_keys
            .iter()
            .chain(&cfg.right_keys)
            .chain(&cfg.pause_keys)
            .any(|k| k == key)
    }

    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        match self.session.status() {
            SessionStatus::Ended => return FrameOutcome::Halted,
            SessionStatus::Paused => return FrameOutcome::Frozen,
            SessionStatus::Running => {}
        }
        let snapshot = self.input.snapshot(&self.config);
        let events = self
            .world
            .advance(&self.config, &snapshot, now_ms, &mut self.rng);
        let points = engine::points_awarded(&events);
        if points > 0 {
            self.session.add_points(points);
        }
        self.last_events = events;
        FrameOutcome::Continue
    }

    pub fn tick_second(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        if outcome == TickOutcome::Expired {
            info!(score = self.session.score(), "session ended");
        }
        outcome
    }

    pub fn toggle_pause(&mut self) -> SessionStatus {
        let status = self.session.toggle_pause();
        trace!(?status, "pause toggled");
        status
    }

    pub fn reset(&mut self) {
        self.world.reset(&self.config, &mut self.rng);
        self.session.reset();
        self.input.clear();
        self.last_events.clear();
        info!(fish = self.world.fish.len(), "session reset");
    }

    pub fn game_over(&self) -> Option<GameOverMessage> {
        self.session
            .is_ended()
            .then(|| GameOverMessage::new(self.session.score()))
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            canvas_width: self.config.canvas_width,
            canvas_height: self.config.canvas_height,
            horizon_y: self.config.horizon_y,
            boat: &self.world.boat,
            fish: &self.world.fish,
            hook: self.world.hook.as_ref().map(HookLine::from),
            splashes: &self.world.splashes,
            clouds: &self.world.clouds,
            sun: SUN,
            score: self.session.score(),
            remaining_secs: self.session.remaining(),
            status: self.session.status(),
            game_over: self.game_over(),
        }
    }
}
