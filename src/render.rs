//! Canvas 2D drawing of a `FrameSnapshot`. No game state lives here except the
//! purely cosmetic boat float phase.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::entities::{Boat, Fish, Sun};
use crate::snapshot::{FrameSnapshot, GameOverMessage, HookLine};

const BOAT_FLOAT_SPEED: f64 = 0.05;
const BOAT_FLOAT_AMPLITUDE: f64 = 3.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    boat_float_time: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            boat_float_time: 0.0,
        }
    }

    pub fn draw(&mut self, snap: &FrameSnapshot<'_>) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, snap.canvas_width, snap.canvas_height);
        draw_backdrop(ctx, snap)?;
        draw_sun(ctx, &snap.sun)?;
        for c in snap.clouds {
            draw_cloud(ctx, c.x, c.y)?;
        }

        self.boat_float_time += BOAT_FLOAT_SPEED;
        let float = self.boat_float_time.sin() * BOAT_FLOAT_AMPLITUDE;
        draw_boat(ctx, snap.boat, float);

        for f in snap.fish {
            draw_fish(ctx, f)?;
        }
        if let Some(line) = &snap.hook {
            draw_hook(ctx, line)?;
        }
        // Splashes sit on top of the water.
        ctx.set_line_width(2.0);
        for s in snap.splashes {
            ctx.begin_path();
            ctx.arc(s.x, s.y, s.radius, 0.0, TAU)?;
            ctx.set_stroke_style_str(&format!("rgba(255,255,255,{})", s.alpha.max(0.0)));
            ctx.stroke();
        }

        if let Some(msg) = &snap.game_over {
            draw_game_over(ctx, snap, msg)?;
        }
        Ok(())
    }
}

fn draw_backdrop(ctx: &CanvasRenderingContext2d, snap: &FrameSnapshot<'_>) -> Result<(), JsValue> {
    let (w, h, horizon) = (snap.canvas_width, snap.canvas_height, snap.horizon_y);

    let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, horizon);
    sky.add_color_stop(0.0, "#81d4fa")?;
    sky.add_color_stop(1.0, "#4fc3f7")?;
    ctx.set_fill_style_canvas_gradient(&sky);
    ctx.fill_rect(0.0, 0.0, w, horizon);

    let ocean = ctx.create_linear_gradient(0.0, horizon, 0.0, h);
    ocean.add_color_stop(0.0, "#0288d1")?;
    ocean.add_color_stop(1.0, "#01579b")?;
    ctx.set_fill_style_canvas_gradient(&ocean);
    ctx.fill_rect(0.0, horizon, w, h - horizon);
    Ok(())
}

fn draw_sun(ctx: &CanvasRenderingContext2d, sun: &Sun) -> Result<(), JsValue> {
    let glow = ctx.create_radial_gradient(sun.x, sun.y, 10.0, sun.x, sun.y, sun.radius)?;
    glow.add_color_stop(0.0, "#fff7a3")?;
    glow.add_color_stop(1.0, "#FFD700")?;
    ctx.begin_path();
    ctx.arc(sun.x, sun.y, sun.radius, 0.0, TAU)?;
    ctx.set_fill_style_canvas_gradient(&glow);
    ctx.fill();
    ctx.close_path();
    Ok(())
}

fn draw_cloud(ctx: &CanvasRenderingContext2d, x: f64, y: f64) -> Result<(), JsValue> {
    ctx.set_fill_style_str("white");
    ctx.begin_path();
    ctx.arc(x, y, 20.0, 0.0, TAU)?;
    ctx.arc(x + 25.0, y + 5.0, 25.0, 0.0, TAU)?;
    ctx.arc(x + 55.0, y, 20.0, 0.0, TAU)?;
    ctx.fill();
    ctx.close_path();
    Ok(())
}

fn draw_boat(ctx: &CanvasRenderingContext2d, boat: &Boat, float: f64) {
    let y = boat.y + float;
    // Hull: trapezoid narrowing toward the keel.
    ctx.set_fill_style_str("#ffb300");
    ctx.begin_path();
    ctx.move_to(boat.x, y);
    ctx.line_to(boat.x + boat.width, y);
    ctx.line_to(boat.x + boat.width - 10.0, y + boat.height / 2.0);
    ctx.line_to(boat.x + 10.0, y + boat.height / 2.0);
    ctx.close_path();
    ctx.fill();
    // Cabin
    ctx.set_fill_style_str("#ffcc80");
    ctx.fill_rect(boat.x + boat.width / 4.0, y - 10.0, boat.width / 2.0, 10.0);
}

fn draw_fish(ctx: &CanvasRenderingContext2d, fish: &Fish) -> Result<(), JsValue> {
    let size = fish.size();
    ctx.save();
    ctx.translate(fish.x, fish.y)?;
    ctx.scale(fish.facing.sign(), 1.0)?;

    ctx.begin_path();
    ctx.ellipse(0.0, 0.0, size, size / 2.0, 0.0, 0.0, TAU)?;
    ctx.set_fill_style_str(fish.color());
    ctx.fill();
    ctx.set_stroke_style_str("#B22222");
    ctx.stroke();
    ctx.close_path();

    ctx.begin_path();
    ctx.move_to(-size, 0.0);
    ctx.line_to(-size - 10.0, -size / 2.0);
    ctx.line_to(-size - 10.0, size / 2.0);
    ctx.close_path();
    ctx.set_fill_style_str("#ffb547");
    ctx.fill();
    ctx.stroke();

    ctx.restore();
    Ok(())
}

fn draw_hook(ctx: &CanvasRenderingContext2d, line: &HookLine) -> Result<(), JsValue> {
    let (ax, ay) = line.anchor;
    let (tx, ty) = line.tip;
    ctx.set_stroke_style_str("#fff");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(ax, ay);
    ctx.line_to(tx, ty);
    ctx.stroke();
    ctx.begin_path();
    ctx.arc(tx, ty, 5.0, 0.0, TAU)?;
    ctx.set_fill_style_str("#ccc");
    ctx.fill();
    Ok(())
}

fn draw_game_over(
    ctx: &CanvasRenderingContext2d,
    snap: &FrameSnapshot<'_>,
    msg: &GameOverMessage,
) -> Result<(), JsValue> {
    let cx = snap.canvas_width / 2.0;
    let cy = snap.canvas_height / 2.0;
    ctx.set_fill_style_str("rgba(0,0,0,0.55)");
    ctx.fill_rect(0.0, 0.0, snap.canvas_width, snap.canvas_height);

    ctx.set_text_align("center");
    ctx.set_line_width(6.0);
    ctx.set_stroke_style_str("#000000");
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("56px 'Fira Code', monospace");
    ctx.stroke_text(msg.title, cx, cy - 20.0)?;
    ctx.fill_text(msg.title, cx, cy - 20.0)?;

    let score_line = msg.score_line();
    ctx.set_font("28px 'Fira Code', monospace");
    ctx.stroke_text(&score_line, cx, cy + 24.0)?;
    ctx.fill_text(&score_line, cx, cy + 24.0)?;

    ctx.set_font("18px 'Fira Code', monospace");
    ctx.fill_text("Press Reset to play again", cx, cy + 60.0)?;
    Ok(())
}
