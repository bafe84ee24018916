//! Read-only view of one frame, handed to the renderer and to JS.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::entities::{Boat, Cloud, Facing, Fish, FishKind, Hook, Splash, Sun};
use crate::session::SessionStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameOverMessage {
    pub title: &'static str,
    pub final_score: u64,
}

impl GameOverMessage {
    pub const TITLE: &'static str = "Time's up!";

    pub fn new(final_score: u64) -> Self {
        Self {
            title: Self::TITLE,
            final_score,
        }
    }

    pub fn score_line(&self) -> String {
        format!("Final score: {}", self.final_score)
    }
}

impl fmt::Display for GameOverMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.score_line())
    }
}

/// Line segment from where the hook leaves the boat to its current tip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HookLine {
    pub anchor: (f64, f64),
    pub tip: (f64, f64),
}

impl From<&Hook> for HookLine {
    fn from(h: &Hook) -> Self {
        Self {
            anchor: (h.anchor_x, h.anchor_y),
            tip: h.tip(),
        }
    }
}

/// One fish as the page sees it: the archetype's size and color are resolved
/// so a JS consumer can draw without knowing the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FishView {
    pub id: u64,
    pub kind: FishKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: &'static str,
    pub points: u32,
    pub facing: Facing,
}

impl From<&Fish> for FishView {
    fn from(f: &Fish) -> Self {
        Self {
            id: f.id,
            kind: f.kind,
            x: f.x,
            y: f.y,
            size: f.size(),
            color: f.color(),
            points: f.points(),
            facing: f.facing,
        }
    }
}

fn fish_views<S: Serializer>(fish: &&[Fish], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(fish.iter().map(FishView::from))
}

#[derive(Clone, Debug, Serialize)]
pub struct FrameSnapshot<'a> {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub horizon_y: f64,
    pub boat: &'a Boat,
    #[serde(serialize_with = "fish_views")]
    pub fish: &'a [Fish],
    pub hook: Option<HookLine>,
    pub splashes: &'a [Splash],
    pub clouds: &'a [Cloud],
    pub sun: Sun,
    pub score: u64,
    pub remaining_secs: u32,
    pub status: SessionStatus,
    /// Present only once the session has ended.
    pub game_over: Option<GameOverMessage>,
}

impl FrameSnapshot<'_> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fish_view_resolves_archetype() {
        let fish = Fish {
            id: 7,
            kind: FishKind::Snapper,
            x: 10.0,
            y: 400.0,
            facing: Facing::Left,
            phase_offset: 3.0,
        };
        let view = FishView::from(&fish);
        assert_eq!(view.size, 35.0);
        assert_eq!(view.color, "#ef5350");
        assert_eq!(view.points, 5);

        let json = serde_json::to_string(&view).expect("serializable");
        assert!(json.contains("\"size\":35.0"));
        assert!(json.contains("\"color\":\"#ef5350\""));
        assert!(json.contains("\"facing\":\"Left\""));
    }
}
