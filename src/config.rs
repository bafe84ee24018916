//! Gameplay tunables.
//!
//! Defaults reproduce the classic 800x600 scene. Every field carries
//! `#[serde(default)]` semantics so the page can pass a partial JSON object to
//! `start_game_with_config` and only override what it cares about.

use serde::Deserialize;

// --- Scene constants --------------------------------------------------------

pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
/// Clicks at or above this line are ignored.
pub const DEFAULT_HORIZON_Y: f64 = 250.0;
/// Top of the band where fish spawn and respawn.
pub const DEFAULT_WATER_TOP: f64 = 300.0;
pub const DEFAULT_SESSION_SECONDS: u32 = 60;
pub const DEFAULT_FISH_POPULATION: usize = 10;

/// Boat dimensions and speed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoatConfig {
    pub width: f64,
    pub height: f64,
    pub y: f64,
    pub speed: f64,
}

impl Default for BoatConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 40.0,
            y: 235.0,
            speed: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub horizon_y: f64,
    pub water_top: f64,
    pub session_seconds: u32,
    pub fish_population: usize,
    pub boat: BoatConfig,
    /// Distance below `boat.y` where the line is tied on.
    pub hook_attach_offset: f64,
    /// Pixels per frame, both descending and retracting.
    pub hook_step: f64,
    /// Per-frame probability that a fish turns around.
    pub direction_flip_chance: f64,
    pub splash_growth: f64,
    pub splash_fade: f64,
    pub cloud_wrap_margin: f64,
    pub bob_period_ms: f64,
    pub bob_amplitude: f64,
    pub left_keys: Vec<String>,
    pub right_keys: Vec<String>,
    pub pause_keys: Vec<String>,
    /// Fixed RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            horizon_y: DEFAULT_HORIZON_Y,
            water_top: DEFAULT_WATER_TOP,
            session_seconds: DEFAULT_SESSION_SECONDS,
            fish_population: DEFAULT_FISH_POPULATION,
            boat: BoatConfig::default(),
            hook_attach_offset: 20.0,
            hook_step: 5.0,
            direction_flip_chance: 0.002,
            splash_growth: 1.5,
            splash_fade: 0.03,
            cloud_wrap_margin: 60.0,
            bob_period_ms: 200.0,
            bob_amplitude: 0.5,
            left_keys: vec!["ArrowLeft".to_string()],
            right_keys: vec!["ArrowRight".to_string()],
            pause_keys: vec!["p".to_string(), "P".to_string()],
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON object and sanitize it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        Ok(cfg.sanitized())
    }

    /// Clamp degenerate values instead of rejecting them.
    pub fn sanitized(mut self) -> Self {
        let defaults = GameConfig::default();
        if !(self.boat.width > 0.0) {
            self.boat.width = defaults.boat.width;
        }
        if !(self.boat.speed >= 0.0) {
            self.boat.speed = defaults.boat.speed;
        }
        if !(self.canvas_width >= self.boat.width) {
            self.canvas_width = self.boat.width.max(defaults.canvas_width);
        }
        if !(self.canvas_height > 0.0) {
            self.canvas_height = defaults.canvas_height;
        }
        self.horizon_y = self.horizon_y.clamp(0.0, self.canvas_height);
        // Spawn band must leave at least one pixel of water.
        let deepest = (self.canvas_height - 1.0).max(0.0);
        self.water_top = self.water_top.clamp(self.horizon_y.min(deepest), deepest);
        if !(self.hook_step > 0.0) {
            self.hook_step = defaults.hook_step;
        }
        self.session_seconds = self.session_seconds.max(1);
        self.fish_population = self.fish_population.max(1);
        self.direction_flip_chance = self.direction_flip_chance.clamp(0.0, 1.0);
        if !(self.bob_period_ms > 0.0) {
            self.bob_period_ms = defaults.bob_period_ms;
        }
        if !(self.splash_fade > 0.0) {
            self.splash_fade = defaults.splash_fade;
        }
        self
    }

    /// Y coordinate where the hook line leaves the boat.
    pub fn hook_attach_y(&self) -> f64 {
        self.boat.y + self.hook_attach_offset
    }

    /// Left edge of a centered boat.
    pub fn boat_start_x(&self) -> f64 {
        self.canvas_width / 2.0 - self.boat.width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_scene() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.hook_attach_y(), 255.0);
        assert_eq!(cfg.boat_start_x(), 360.0);
        assert_eq!(cfg.fish_population, 10);
        assert_eq!(cfg.session_seconds, 60);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = GameConfig::from_json(r#"{ "session_seconds": 30, "boat": { "speed": 8 } }"#)
            .expect("valid json");
        assert_eq!(cfg.session_seconds, 30);
        assert_eq!(cfg.boat.speed, 8.0);
        assert_eq!(cfg.boat.width, 80.0);
        assert_eq!(cfg.canvas_width, DEFAULT_CANVAS_WIDTH);
        assert_eq!(cfg.left_keys, vec!["ArrowLeft".to_string()]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(GameConfig::from_json("{ session_seconds: }").is_err());
    }

    #[test]
    fn sanitized_repairs_degenerate_values() {
        let cfg = GameConfig {
            fish_population: 0,
            hook_step: 0.0,
            canvas_width: 10.0,
            horizon_y: 10_000.0,
            ..GameConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.fish_population, 1);
        assert_eq!(cfg.hook_step, 5.0);
        assert!(cfg.canvas_width >= cfg.boat.width);
        assert!(cfg.horizon_y <= cfg.canvas_height);
        assert!(cfg.water_top < cfg.canvas_height);
    }

    #[test]
    fn zero_second_session_is_clamped() {
        let cfg = GameConfig::from_json(r#"{"session_seconds": 0}"#).expect("valid json");
        assert_eq!(cfg.session_seconds, 1);
        let cfg = GameConfig::from_json(r#"{"session_seconds": 45}"#).expect("valid json");
        assert_eq!(cfg.session_seconds, 45);
    }
}
