//! Latched keyboard state plus a queue of canvas-local clicks.
//!
//! Browser listeners write into the tracker as events arrive; the frame loop
//! takes one `InputSnapshot` per frame. Nothing here blocks or debounces.

use std::collections::{HashSet, VecDeque};

use crate::config::GameConfig;

#[derive(Clone, Debug, Default)]
pub struct InputTracker {
    held: HashSet<String>,
    clicks: VecDeque<(f64, f64)>,
}

/// What the engine sees for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub clicks: Vec<(f64, f64)>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn is_key_down(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn click(&mut self, x: f64, y: f64) {
        self.clicks.push_back((x, y));
    }

    pub fn pending_clicks(&self) -> usize {
        self.clicks.len()
    }

    /// Drop every held key but keep queued clicks. Used when the page loses
    /// focus and the matching `keyup` events will never arrive.
    pub fn release_keys(&mut self) {
        self.held.clear();
    }

    /// Forget held keys and queued clicks (used on reset).
    pub fn clear(&mut self) {
        self.held.clear();
        self.clicks.clear();
    }

    /// Resolve key bindings and drain the click queue.
    pub fn snapshot(&mut self, cfg: &GameConfig) -> InputSnapshot {
        let any = |keys: &[String]| keys.iter().any(|k| self.held.contains(k));
        let left = any(&cfg.left_keys);
        let right = any(&cfg.right_keys);
        InputSnapshot {
            left,
            right,
            clicks: self.clicks.drain(..).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_latch_until_released() {
        let mut input = InputTracker::new();
        input.key_down("ArrowLeft");
        input.key_down("ArrowLeft");
        assert!(input.is_key_down("ArrowLeft"));
        input.key_up("ArrowLeft");
        assert!(!input.is_key_down("ArrowLeft"));
        // Releasing an unknown key is harmless.
        input.key_up("x");
    }

    #[test]
    fn snapshot_drains_clicks_but_keeps_keys() {
        let cfg = GameConfig::default();
        let mut input = InputTracker::new();
        input.key_down("ArrowRight");
        input.click(10.0, 400.0);
        input.click(20.0, 100.0);

        let snap = input.snapshot(&cfg);
        assert!(snap.right && !snap.left);
        assert_eq!(snap.clicks, vec![(10.0, 400.0), (20.0, 100.0)]);

        let again = input.snapshot(&cfg);
        assert!(again.right);
        assert!(again.clicks.is_empty());
    }

    #[test]
    fn release_keys_keeps_clicks() {
        let cfg = GameConfig::default();
        let mut input = InputTracker::new();
        input.key_down("ArrowLeft");
        input.click(5.0, 450.0);
        input.release_keys();
        assert!(!input.is_key_down("ArrowLeft"));
        assert_eq!(input.pending_clicks(), 1);
        assert!(!input.snapshot(&cfg).left);
    }

    #[test]
    fn custom_bindings_are_honored() {
        let cfg = GameConfig {
            left_keys: vec!["a".into(), "ArrowLeft".into()],
            ..GameConfig::default()
        };
        let mut input = InputTracker::new();
        input.key_down("a");
        assert!(input.snapshot(&cfg).left);
    }
}
