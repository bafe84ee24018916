//! Bookkeeping for the two host-scheduled callbacks (animation frame, one
//! second countdown).
//!
//! Every callback is created under a generation number. Retiring the schedule
//! bumps the generation and hands back the pending host handles so the caller
//! can cancel them; a callback that still fires under an old generation must
//! check `is_current` and drop out without touching the game.

/// Host handles that were pending when a generation was retired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pending {
    pub frame: Option<i32>,
    pub tick: Option<i32>,
}

#[derive(Debug, Default)]
pub struct Schedule {
    generation: u64,
    frame_handle: Option<i32>,
    tick_handle: Option<i32>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation new callbacks should capture.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn set_frame_handle(&mut self, handle: Option<i32>) {
        self.frame_handle = handle;
    }

    pub fn set_tick_handle(&mut self, handle: Option<i32>) {
        self.tick_handle = handle;
    }

    /// The countdown clears its own interval once the session expires.
    pub fn take_tick_handle(&mut self) -> Option<i32> {
        self.tick_handle.take()
    }

    /// Invalidate every callback created so far.
    pub fn retire(&mut self) -> Pending {
        self.generation += 1;
        Pending {
            frame: self.frame_handle.take(),
            tick: self.tick_handle.take(),
        }
    }
}
