//! Boat Fishing core crate.
//!
//! Gameplay (`engine`, `session`, `game`) is plain Rust and runs natively under
//! `cargo test`. `web` and `render` bind it to a browser canvas: the page calls
//! `start_game()` (or `start_game_with_config(json)`) once the module loads.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod engine;
pub mod entities;
pub mod game;
pub mod input;
pub mod logging;
pub mod render;
pub mod schedule;
pub mod session;
pub mod snapshot;
mod web;

pub use config::GameConfig;
pub use engine::{GameEvent, World};
pub use game::{FrameOutcome, Game};
pub use session::{SessionStatus, TickOutcome};
pub use snapshot::{FrameSnapshot, GameOverMessage};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init("info");
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default())
}

/// Same as `start_game`, with a (possibly partial) JSON `GameConfig`.
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("invalid game config: {e}")))?;
    web::start(config)
}

#[wasm_bindgen]
pub fn reset_game() -> Result<(), JsValue> {
    web::reset()
}

/// Snapshot of the current frame for page-side UI or debugging.
#[wasm_bindgen]
pub fn game_state_json() -> Result<String, JsValue> {
    web::state_json()
}
