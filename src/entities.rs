//! Scene entities. Plain data; all behavior lives in `engine`.

use serde::Serialize;

// --- Fish catalog ------------------------------------------------------------

/// Template a fish is stamped from at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FishArchetype {
    pub color: &'static str,
    pub size: f64,
    pub points: u32,
    pub speed: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FishKind {
    Minnow,  // cheap, common, fast
    Perch,   // middle of the road
    Snapper, // big, slow, worth the most
}

impl FishKind {
    pub const ALL: [FishKind; 3] = [FishKind::Minnow, FishKind::Perch, FishKind::Snapper];

    pub fn archetype(self) -> &'static FishArchetype {
        match self {
            FishKind::Minnow => &MINNOW,
            FishKind::Perch => &PERCH,
            FishKind::Snapper => &SNAPPER,
        }
    }
}

static MINNOW: FishArchetype = FishArchetype {
    color: "#4dd0e1",
    size: 15.0,
    points: 1,
    speed: 1.5,
};
static PERCH: FishArchetype = FishArchetype {
    color: "#81c784",
    size: 25.0,
    points: 2,
    speed: 1.2,
};
static SNAPPER: FishArchetype = FishArchetype {
    color: "#ef5350",
    size: 35.0,
    points: 5,
    speed: 0.8,
};

/// Horizontal swim direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Facing {
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f64 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fish {
    /// Stable identifier; never reused within a `World`.
    pub id: u64,
    pub kind: FishKind,
    pub x: f64,
    pub y: f64,
    pub facing: Facing,
    /// Shifts the bobbing sine so the school does not move in lockstep.
    pub phase_offset: f64,
}

impl Fish {
    pub fn size(&self) -> f64 {
        self.kind.archetype().size
    }
    pub fn points(&self) -> u32 {
        self.kind.archetype().points
    }
    pub fn speed(&self) -> f64 {
        self.kind.archetype().speed
    }
    pub fn color(&self) -> &'static str {
        self.kind.archetype().color
    }
}

// --- Player ------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Boat {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl Boat {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HookPhase {
    Descending,
    Retracting,
}

/// The single active hook. Its x is pinned to the boat center at cast time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Hook {
    pub anchor_x: f64,
    /// Where the line leaves the boat; retraction ends here.
    pub anchor_y: f64,
    pub y: f64,
    pub target_y: f64,
    pub phase: HookPhase,
}

impl Hook {
    pub fn tip(&self) -> (f64, f64) {
        (self.anchor_x, self.y)
    }
}

// --- Cosmetics -----------------------------------------------------------------

/// Expanding, fading ring left by casts and catches.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Splash {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub alpha: f64,
}

impl Splash {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            radius: 0.0,
            alpha: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sun {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

pub const SUN: Sun = Sun {
    x: 100.0,
    y: 80.0,
    radius: 40.0,
};

pub fn initial_clouds() -> Vec<Cloud> {
    vec![
        Cloud { x: 200.0, y: 70.0, speed: 0.3 },
        Cloud { x: 500.0, y: 100.0, speed: 0.2 },
        Cloud { x: 750.0, y: 60.0, speed: 0.4 },
    ]
}
