//! Per-frame world update.
//!
//! `World::advance` runs the sub-steps in a fixed order: clouds, boat, casts,
//! hook, catches, fish, splashes. Catches are resolved against a snapshot of
//! the school taken before any removal, so every fish overlapping the hook in
//! a frame is caught exactly once and the population count never changes.
//!
//! All randomness comes through the injected `rng`.

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{
    Boat, Cloud, Facing, Fish, FishKind, Hook, HookPhase, Splash, initial_clouds,
};
use crate::input::InputSnapshot;

/// Something gameplay-relevant that happened during a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Cast {
        x: f64,
        y: f64,
    },
    Catch {
        fish_id: u64,
        kind: FishKind,
        points: u32,
        x: f64,
        y: f64,
    },
}

/// Sum of points awarded by the catches in `events`.
pub fn points_awarded(events: &[GameEvent]) -> u32 {
    events
        .iter()
        .map(|e| match e {
            GameEvent::Catch { points, .. } => *points,
            GameEvent::Cast { .. } => 0,
        })
        .sum()
}

#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub boat: Boat,
    pub fish: Vec<Fish>,
    pub hook: Option<Hook>,
    pub splashes: Vec<Splash>,
    pub clouds: Vec<Cloud>,
    next_fish_id: u64,
}

impl World {
    pub fn new(cfg: &GameConfig, rng: &mut impl Rng) -> Self {
        let mut world = World {
            boat: initial_boat(cfg),
            fish: Vec::with_capacity(cfg.fish_population),
            hook: None,
            splashes: Vec::new(),
            clouds: initial_clouds(),
            next_fish_id: 0,
        };
        world.populate(cfg, rng);
        world
    }

    /// Back to the opening scene: fresh school, centered boat, no hook.
    pub fn reset(&mut self, cfg: &GameConfig, rng: &mut impl Rng) {
        self.boat = initial_boat(cfg);
        self.hook = None;
        self.splashes.clear();
        self.clouds = initial_clouds();
        self.fish.clear();
        self.populate(cfg, rng);
    }

    fn populate(&mut self, cfg: &GameConfig, rng: &mut impl Rng) {
        for _ in 0..cfg.fish_population {
            let fish = self.spawn_fish(cfg, rng);
            self.fish.push(fish);
        }
    }

    /// Stamp a new fish from a random archetype somewhere in the water band.
    /// The caller decides where it goes.
    pub fn spawn_fish(&mut self, cfg: &GameConfig, rng: &mut impl Rng) -> Fish {
        let id = self.next_fish_id;
        self.next_fish_id += 1;
        let kind = FishKind::ALL[rng.gen_range(0..FishKind::ALL.len())];
        Fish {
            id,
            kind,
            x: rng.gen_range(0.0..cfg.canvas_width),
            y: random_water_y(cfg, rng),
            facing: if rng.gen_bool(0.5) {
                Facing::Right
            } else {
                Facing::Left
            },
            phase_offset: rng.gen_range(0.0..1000.0),
        }
    }

    pub fn advance(
        &mut self,
        cfg: &GameConfig,
        input: &InputSnapshot,
        now_ms: f64,
        rng: &mut impl Rng,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        update_clouds(&mut self.clouds, cfg);
        update_boat(&mut self.boat, input, cfg);
        for &(x, y) in &input.clicks {
            if let Some(ev) = self.try_cast(x, y, cfg) {
                events.push(ev);
            }
        }
        update_hook(&mut self.hook, cfg);
        events.extend(self.resolve_catches(cfg, rng));
        update_fish(&mut self.fish, now_ms, cfg, rng);
        update_splashes(&mut self.splashes, cfg);

        events
    }

    /// Drop a hook from the boat toward `y`. Ignored above the water line,
    /// outside the canvas, or while a hook is already out.
    pub fn try_cast(&mut self, x: f64, y: f64, cfg: &GameConfig) -> Option<GameEvent> {
        if self.hook.is_some() || !is_valid_cast_target(x, y, cfg) {
            return None;
        }
        let anchor_y = cfg.hook_attach_y();
        self.hook = Some(Hook {
            anchor_x: self.boat.center_x(),
            anchor_y,
            y: anchor_y,
            target_y: y,
            phase: HookPhase::Descending,
        });
        self.splashes.push(Splash::new(x, y));
        debug!(x, y, "hook cast");
        Some(GameEvent::Cast { x, y })
    }

    /// Catch every fish the hook tip is touching, then replace each one.
    pub fn resolve_catches(&mut self, cfg: &GameConfig, rng: &mut impl Rng) -> Vec<GameEvent> {
        let Some(tip) = self.hook.as_ref().map(Hook::tip) else {
            return Vec::new();
        };
        let caught: Vec<Fish> = self
            .fish
            .iter()
            .filter(|f| is_caught(f, tip))
            .cloned()
            .collect();
        if caught.is_empty() {
            return Vec::new();
        }

        self.fish.retain(|f| !caught.iter().any(|c| c.id == f.id));
        let mut events = Vec::with_capacity(caught.len());
        for fish in caught {
            debug!(fish_id = fish.id, points = fish.points(), "fish caught");
            self.splashes.push(Splash::new(fish.x, fish.y));
            events.push(GameEvent::Catch {
                fish_id: fish.id,
                kind: fish.kind,
                points: fish.points(),
                x: fish.x,
                y: fish.y,
            });
            let replacement = self.spawn_fish(cfg, rng);
            self.fish.push(replacement);
        }
        events
    }
}

fn initial_boat(cfg: &GameConfig) -> Boat {
    Boat {
        x: cfg.boat_start_x(),
        y: cfg.boat.y,
        width: cfg.boat.width,
        height: cfg.boat.height,
        speed: cfg.boat.speed,
    }
}

fn random_water_y(cfg: &GameConfig, rng: &mut impl Rng) -> f64 {
    rng.gen_range(cfg.water_top..cfg.canvas_height)
}

pub fn is_valid_cast_target(x: f64, y: f64, cfg: &GameConfig) -> bool {
    y > cfg.horizon_y && y < cfg.canvas_height && (0.0..cfg.canvas_width).contains(&x)
}

/// Strictly inside the fish's radius.
pub fn is_caught(fish: &Fish, (hx, hy): (f64, f64)) -> bool {
    let dx = hx - fish.x;
    let dy = hy - fish.y;
    (dx * dx + dy * dy).sqrt() < fish.size()
}

pub fn update_boat(boat: &mut Boat, input: &InputSnapshot, cfg: &GameConfig) {
    let max_x = (cfg.canvas_width - boat.width).max(0.0);
    if input.left {
        boat.x = (boat.x - boat.speed).max(0.0);
    }
    if input.right {
        boat.x = (boat.x + boat.speed).min(max_x);
    }
    boat.x = boat.x.clamp(0.0, max_x);
}

/// Descend to the target, flip, climb back to the boat, vanish.
pub fn update_hook(hook: &mut Option<Hook>, cfg: &GameConfig) {
    let Some(h) = hook.as_mut() else {
        return;
    };
    match h.phase {
        HookPhase::Descending => {
            h.y += cfg.hook_step;
            if h.y >= h.target_y {
                h.phase = HookPhase::Retracting;
            }
        }
        HookPhase::Retracting => {
            h.y -= cfg.hook_step;
            if h.y <= h.anchor_y {
                *hook = None;
            }
        }
    }
}

pub fn update_fish(fish: &mut [Fish], now_ms: f64, cfg: &GameConfig, rng: &mut impl Rng) {
    for f in fish.iter_mut() {
        f.x += f.facing.sign() * f.speed();
        f.y += ((now_ms + f.phase_offset) / cfg.bob_period_ms).sin() * cfg.bob_amplitude;

        if rng.gen_bool(cfg.direction_flip_chance) {
            f.facing = f.facing.flipped();
        }

        let size = f.size();
        if f.x < -size || f.x > cfg.canvas_width + size {
            // Re-enter from the far side, same heading.
            f.x = match f.facing {
                Facing::Right => -size,
                Facing::Left => cfg.canvas_width + size,
            };
            f.y = random_water_y(cfg, rng);
        }
    }
}

pub fn update_splashes(splashes: &mut Vec<Splash>, cfg: &GameConfig) {
    for s in splashes.iter_mut() {
        s.radius += cfg.splash_growth;
        s.alpha -= cfg.splash_fade;
    }
    splashes.retain(|s| s.alpha > 0.0);
}

pub fn update_clouds(clouds: &mut [Cloud], cfg: &GameConfig) {
    for c in clouds.iter_mut() {
        c.x += c.speed;
        if c.x > cfg.canvas_width + cfg.cloud_wrap_margin {
            c.x = -cfg.cloud_wrap_margin;
        }
    }
}
