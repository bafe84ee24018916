// Native integration tests for the frame loop. These drive the public `Game`
// API with a seeded RNG so runs are reproducible.

use boat_fishing::engine::points_awarded;
use boat_fishing::entities::{Facing, Fish, FishKind, Hook, HookPhase};
use boat_fishing::{FrameOutcome, Game, GameConfig, GameEvent};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn calm_game(seed: u64) -> Game {
    Game::with_rng(
        GameConfig {
            direction_flip_chance: 0.0,
            ..GameConfig::default()
        },
        ChaCha8Rng::seed_from_u64(seed),
    )
}

/// Park every fish in the bottom-left corner, out of the hook's path.
fn clear_the_water(game: &mut Game) {
    for f in game.world_mut().fish.iter_mut() {
        f.x = 10.0;
        f.y = 590.0;
        f.facing = Facing::Left;
    }
}

#[test]
fn boat_never_leaves_the_canvas() {
    let mut game = calm_game(1);
    let mut keys = ChaCha8Rng::seed_from_u64(99);
    let max_x = game.config().canvas_width - game.config().boat.width;
    let mut now = 0.0;
    for _ in 0..2_000 {
        match keys.gen_range(0..4) {
            0 => game.key_down("ArrowLeft"),
            1 => game.key_up("ArrowLeft"),
            2 => game.key_down("ArrowRight"),
            _ => game.key_up("ArrowRight"),
        }
        now += 16.0;
        assert_eq!(game.frame(now), FrameOutcome::Continue);
        let x = game.world().boat.x;
        assert!((0.0..=max_x).contains(&x), "boat x {x} out of bounds");
    }
}

#[test]
fn holding_left_pins_the_boat_to_zero() {
    let mut game = calm_game(2);
    game.key_down("ArrowLeft");
    for i in 0..100 {
        game.frame(i as f64 * 16.0);
    }
    assert_eq!(game.world().boat.x, 0.0);
    game.key_up("ArrowLeft");
    game.key_down("ArrowRight");
    game.frame(1_700.0);
    assert_eq!(game.world().boat.x, game.config().boat.speed);
}

#[test]
fn full_cast_descends_then_retracts_then_clears() {
    let mut game = calm_game(3);
    clear_the_water(&mut game);
    game.click(400.0, 400.0);

    let mut frames = 0;
    let mut deepest: f64 = 0.0;
    loop {
        game.frame(frames as f64 * 16.0);
        frames += 1;
        match &game.world().hook {
            Some(h) => deepest = deepest.max(h.y),
            None => break,
        }
        assert!(frames < 500);
    }
    let cfg = game.config();
    let expected = ((400.0 - cfg.hook_attach_y()) / cfg.hook_step).ceil() as i32 * 2;
    assert!((frames - expected).abs() <= 1, "took {frames} frames, expected ~{expected}");
    assert!(deepest >= 400.0);
}

#[test]
fn clicks_above_the_water_line_do_nothing() {
    let mut game = calm_game(4);
    game.click(400.0, 100.0);
    game.click(400.0, game.config().horizon_y);
    game.frame(0.0);
    assert!(game.world().hook.is_none());
    assert!(game.world().splashes.is_empty());
    assert!(game.last_events().is_empty());
}

#[test]
fn second_cast_while_hook_is_out_is_ignored() {
    let mut game = calm_game(5);
    clear_the_water(&mut game);
    game.click(400.0, 500.0);
    game.frame(0.0);
    game.click(400.0, 300.0);
    game.frame(16.0);
    let hook = game.world().hook.as_ref().expect("hook still out");
    assert_eq!(hook.target_y, 500.0);
    assert!(game.last_events().is_empty());
}

#[test]
fn hook_on_a_minnow_scores_one_point() {
    let mut game = calm_game(6);
    clear_the_water(&mut game);
    let population = game.world().fish.len();
    {
        let world = game.world_mut();
        world.fish[0] = Fish {
            id: 1_000,
            kind: FishKind::Minnow,
            x: 400.0,
            y: 400.0,
            facing: Facing::Right,
            phase_offset: 0.0,
        };
        // One step short; this frame's hook update lands it on the fish.
        world.hook = Some(Hook {
            anchor_x: 400.0,
            anchor_y: 255.0,
            y: 395.0,
            target_y: 450.0,
            phase: HookPhase::Descending,
        });
    }

    game.frame(0.0);

    assert_eq!(game.session().score(), 1);
    assert_eq!(game.world().fish.len(), population);
    assert!(game.world().fish.iter().all(|f| f.id != 1_000));
    assert!(matches!(
        game.last_events(),
        [GameEvent::Catch { fish_id: 1_000, points: 1, .. }]
    ));
}

#[test]
fn hook_exactly_one_radius_away_misses() {
    let mut game = calm_game(7);
    clear_the_water(&mut game);
    {
        let world = game.world_mut();
        world.fish[0] = Fish {
            id: 1_000,
            kind: FishKind::Snapper,
            x: 435.0,
            y: 400.0,
            facing: Facing::Right,
            phase_offset: 0.0,
        };
        world.hook = Some(Hook {
            anchor_x: 400.0,
            anchor_y: 255.0,
            y: 395.0,
            target_y: 450.0,
            phase: HookPhase::Descending,
        });
    }
    game.frame(0.0);
    assert_eq!(game.session().score(), 0);
    assert!(game.world().fish.iter().any(|f| f.id == 1_000));
}

#[test]
fn long_play_conserves_fish_and_score_matches_catches() {
    let mut game = calm_game(8);
    let population = game.world().fish.len();
    let mut clicks = ChaCha8Rng::seed_from_u64(7);
    let mut total = 0u64;
    let mut last_score = 0u64;
    for i in 0..5_000 {
        if game.world().hook.is_none() {
            game.click(clicks.gen_range(0.0..800.0), clicks.gen_range(260.0..599.0));
        }
        if i % 3 == 0 {
            game.key_down("ArrowLeft");
            game.key_up("ArrowRight");
        } else if i % 7 == 0 {
            game.key_down("ArrowRight");
            game.key_up("ArrowLeft");
        }
        game.frame(i as f64 * 16.0);
        total += u64::from(points_awarded(game.last_events()));
        assert_eq!(game.world().fish.len(), population);
        assert!(game.session().score() >= last_score);
        last_score = game.session().score();
    }
    assert_eq!(game.session().score(), total);
}

#[test]
fn splashes_mark_casts_and_fade_out() {
    let mut game = calm_game(9);
    clear_the_water(&mut game);
    game.click(200.0, 500.0);
    game.frame(0.0);
    assert_eq!(game.world().splashes.len(), 1);
    for i in 1..40 {
        game.frame(i as f64 * 16.0);
    }
    assert!(game.world().splashes.is_empty());
}
