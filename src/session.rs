//! Countdown, score and run/pause/end status for one play session.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    Running,
    Paused,
    /// Terminal until `reset`.
    Ended,
}

/// Result of one one-second tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown moved; keep the timer alive.
    Counting,
    /// This tick hit zero. The caller must cancel the timer.
    Expired,
    /// Paused or already ended; nothing changed.
    Idle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    score: u64,
    remaining: u32,
    status: SessionStatus,
    duration: u32,
}

impl Session {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            score: 0,
            remaining: duration_secs,
            status: if duration_secs == 0 {
                SessionStatus::Ended
            } else {
                SessionStatus::Running
            },
            duration: duration_secs,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn is_ended(&self) -> bool {
        self.status == SessionStatus::Ended
    }

    pub fn add_points(&mut self, points: u32) {
        if self.is_ended() {
            return;
        }
        self.score += u64::from(points);
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.status != SessionStatus::Running {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.status = SessionStatus::Ended;
            TickOutcome::Expired
        } else {
            TickOutcome::Counting
        }
    }

    /// Running <-> Paused. Ended is left alone.
    pub fn toggle_pause(&mut self) -> SessionStatus {
        self.status = match self.status {
            SessionStatus::Running => SessionStatus::Paused,
            SessionStatus::Paused => SessionStatus::Running,
            SessionStatus::Ended => SessionStatus::Ended,
        };
        self.status
    }

    pub fn reset(&mut self) {
        *self = Session::new(self.duration);
    }
}
