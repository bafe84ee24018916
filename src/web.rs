//! Browser glue: canvas + DOM lookup, event listeners, and the two scheduled
//! callbacks (animation frame loop, one-second countdown).
//!
//! Both callbacks carry the generation they were started under (see
//! `schedule`). `reset` retires the generation and cancels the pending
//! handles, so a callback from a previous session that still fires drops
//! itself instead of double-updating the world.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window, window};

use crate::config::GameConfig;
use crate::game::{FrameOutcome, Game};
use crate::render::CanvasRenderer;
use crate::schedule::Schedule;
use crate::session::TickOutcome;

const CANVAS_ID: &str = "gameCanvas";
const SCORE_ID: &str = "score";
const TIMER_ID: &str = "timer";
const RESET_ID: &str = "resetBtn";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Score / countdown text nodes, rewritten only when the value changes.
struct Hud {
    score_el: Element,
    timer_el: Element,
    shown_score: Option<u64>,
    shown_remaining: Option<u32>,
}

impl Hud {
    fn sync(&mut self, score: u64, remaining: u32) {
        if self.shown_score != Some(score) {
            self.score_el.set_text_content(Some(&score.to_string()));
            self.shown_score = Some(score);
        }
        if self.shown_remaining != Some(remaining) {
            self.timer_el.set_text_content(Some(&remaining.to_string()));
            self.shown_remaining = Some(remaining);
        }
    }
}

struct Driver {
    game: Game,
    renderer: CanvasRenderer,
    hud: Hud,
    schedule: Schedule,
    frame_loop: Option<FrameCallback>,
    tick_closure: Option<Closure<dyn FnMut()>>,
}

impl Driver {
    fn on_frame(&mut self, now: f64) -> Result<bool, JsValue> {
        let outcome = self.game.frame(now);
        match outcome {
            FrameOutcome::Frozen => return Ok(true),
            FrameOutcome::Continue | FrameOutcome::Halted => {}
        }
        self.renderer.draw(&self.game.snapshot())?;
        let session = self.game.session();
        self.hud.sync(session.score(), session.remaining());
        Ok(outcome == FrameOutcome::Continue)
    }

    /// Cancel whatever is scheduled and break the frame closure's self-reference.
    fn cancel_scheduled(&mut self, win: &Window) {
        let pending = self.schedule.retire();
        if let Some(id) = pending.frame {
            let _ = win.cancel_animation_frame(id);
        }
        if let Some(f) = self.frame_loop.take() {
            f.borrow_mut().take();
        }
        if let Some(id) = pending.tick {
            win.clear_interval_with_handle(id);
        }
        self.tick_closure = None;
    }
}

thread_local! {
    static DRIVER: RefCell<Option<Driver>> = const { RefCell::new(None) };
    static LISTENERS_BOUND: Cell<bool> = const { Cell::new(false) };
}

fn no_window() -> JsValue {
    JsValue::from_str("no window")
}

/// Build (or rebuild) the game on the page and start both loops.
pub fn start(mut config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(no_window)?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = ensure_canvas(&doc, &mut config)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let hud = Hud {
        score_el: ensure_text(&doc, SCORE_ID, "0")?,
        timer_el: ensure_text(&doc, TIMER_ID, &config.session_seconds.to_string())?,
        shown_score: None,
        shown_remaining: None,
    };
    let reset_btn = ensure_reset_button(&doc)?;

    // A second start replaces the running game.
    let schedule = DRIVER
        .with(|cell| {
            cell.borrow_mut().take().map(|mut old| {
                old.cancel_scheduled(&win);
                old.schedule
            })
        })
        .unwrap_or_default();
    let generation = schedule.generation();

    DRIVER.with(|cell| {
        cell.replace(Some(Driver {
            game: Game::new(config),
            renderer: CanvasRenderer::new(ctx),
            hud,
            schedule,
            frame_loop: None,
            tick_closure: None,
        }))
    });

    if !LISTENERS_BOUND.with(|b| b.replace(true)) {
        bind_listeners(&win, &doc, &canvas, &reset_btn)?;
    }
    start_frame_loop(generation)?;
    start_countdown(generation)?;
    Ok(())
}

/// Cancel pending work, restore the opening scene, and restart both loops.
pub fn reset() -> Result<(), JsValue> {
    let win = window().ok_or_else(no_window)?;
    let generation = DRIVER.with(|cell| {
        let mut slot = cell.borrow_mut();
        let driver = slot.as_mut()?;
        driver.cancel_scheduled(&win);
        driver.game.reset();
        Some(driver.schedule.generation())
    });
    let Some(generation) = generation else {
        warn!("reset requested before start");
        return Ok(());
    };
    start_frame_loop(generation)?;
    start_countdown(generation)?;
    Ok(())
}

/// Current frame as JSON, or `null` before the game starts.
pub fn state_json() -> Result<String, JsValue> {
    DRIVER.with(|cell| match cell.borrow().as_ref() {
        Some(driver) => driver
            .game
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok("null".to_string()),
    })
}

fn start_frame_loop(generation: u64) -> Result<(), JsValue> {
    let win = window().ok_or_else(no_window)?;
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let keep_going = DRIVER.with(|cell| {
            let mut slot = cell.borrow_mut();
            match slot.as_mut() {
                Some(driver) if driver.schedule.is_current(generation) => {
                    driver.schedule.set_frame_handle(None);
                    driver.on_frame(ts).unwrap_or_else(|err| {
                        warn!(?err, "frame failed");
                        true
                    })
                }
                _ => false,
            }
        });
        if !keep_going {
            debug!(generation, "frame loop stopped");
            // Drop our own closure; it is released once this call returns.
            f.borrow_mut().take();
            return;
        }
        let Some(w) = window() else { return };
        let handle = f
            .borrow()
            .as_ref()
            .and_then(|cb| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        DRIVER.with(|cell| {
            if let Some(driver) = cell.borrow_mut().as_mut() {
                if driver.schedule.is_current(generation) {
                    driver.schedule.set_frame_handle(handle);
                }
            }
        });
    }) as Box<dyn FnMut(f64)>));

    let handle = match g.borrow().as_ref() {
        Some(cb) => win.request_animation_frame(cb.as_ref().unchecked_ref())?,
        None => return Ok(()),
    };
    DRIVER.with(|cell| {
        if let Some(driver) = cell.borrow_mut().as_mut() {
            driver.schedule.set_frame_handle(Some(handle));
            driver.frame_loop = Some(g);
        }
    });
    Ok(())
}

fn start_countdown(generation: u64) -> Result<(), JsValue> {
    let win = window().ok_or_else(no_window)?;
    let closure = Closure::wrap(Box::new(move || {
        DRIVER.with(|cell| {
            let mut slot = cell.borrow_mut();
            let Some(driver) = slot.as_mut() else { return };
            if !driver.schedule.is_current(generation) {
                return;
            }
            if driver.game.tick_second() == TickOutcome::Expired {
                if let (Some(w), Some(id)) = (window(), driver.schedule.take_tick_handle()) {
                    w.clear_interval_with_handle(id);
                }
            }
            let session = driver.game.session();
            driver.hud.sync(session.score(), session.remaining());
        });
    }) as Box<dyn FnMut()>);

    let handle = win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        1000,
    )?;
    DRIVER.with(|cell| {
        if let Some(driver) = cell.borrow_mut().as_mut() {
            driver.schedule.set_tick_handle(Some(handle));
            driver.tick_closure = Some(closure);
        }
    });
    Ok(())
}

// --- DOM ------------------------------------------------------------------------

fn ensure_canvas(doc: &Document, config: &mut GameConfig) -> Result<HtmlCanvasElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        let canvas: HtmlCanvasElement = el.dyn_into()?;
        // An existing canvas dictates the scene size.
        config.canvas_width = f64::from(canvas.width());
        config.canvas_height = f64::from(canvas.height());
        return Ok(canvas);
    }
    let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    canvas.set_id(CANVAS_ID);
    canvas.set_width(config.canvas_width as u32);
    canvas.set_height(config.canvas_height as u32);
    canvas
        .set_attribute("style", "display:block; margin:16px auto; border-radius:12px; box-shadow:0 0 24px rgba(0,0,0,0.25);")
        .ok();
    body(doc)?.append_child(&canvas)?;
    Ok(canvas)
}

fn ensure_text(doc: &Document, id: &str, initial: &str) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let el = doc.create_element("span")?;
    el.set_id(id);
    el.set_text_content(Some(initial));
    el.set_attribute("style", "font-family:'Fira Code', monospace; font-size:18px; margin:0 12px;")
        .ok();
    body(doc)?.append_child(&el)?;
    Ok(el)
}

fn ensure_reset_button(doc: &Document) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(RESET_ID) {
        return Ok(el);
    }
    let btn = doc.create_element("button")?;
    btn.set_id(RESET_ID);
    btn.set_text_content(Some("Reset"));
    body(doc)?.append_child(&btn)?;
    Ok(btn)
}

fn body(doc: &Document) -> Result<web_sys::HtmlElement, JsValue> {
    doc.body().ok_or_else(|| JsValue::from_str("no body"))
}

fn bind_listeners(
    win: &Window,
    doc: &Document,
    canvas: &HtmlCanvasElement,
    reset_btn: &Element,
) -> Result<(), JsValue> {
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            DRIVER.with(|cell| {
                if let Some(driver) = cell.borrow_mut().as_mut() {
                    if driver.game.is_bound_key(&key) {
                        // Keep arrow keys from scrolling the page.
                        evt.prevent_default();
                    }
                    driver.game.key_down(&key);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            DRIVER.with(|cell| {
                if let Some(driver) = cell.borrow_mut().as_mut() {
                    driver.game.key_up(&key);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        // Keys released while the page is unfocused never send keyup.
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            DRIVER.with(|cell| {
                if let Some(driver) = cell.borrow_mut().as_mut() {
                    driver.game.release_keys();
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        // offset_x/offset_y are already canvas-local.
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let x = f64::from(evt.offset_x());
            let y = f64::from(evt.offset_y());
            DRIVER.with(|cell| {
                if let Some(driver) = cell.borrow_mut().as_mut() {
                    driver.game.click(x, y);
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            if let Err(err) = reset() {
                warn!(?err, "reset failed");
            }
        }) as Box<dyn FnMut(_)>);
        reset_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}
