//! Interactive software-raycaster viewer.
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- --scale 2
//! ```
//!
//! W/S or ↑/↓ move, A/D strafe, ←/→ turn, Shift runs. Space kills the
//! nearest zombie, walking over a pickup collects it.

use clap::Parser;
use glam::{Vec2, vec2};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};
use std::time::{Duration, Instant};

use yacast_rs::{
    config::RenderConfig,
    renderer::{Owner, RendererExt, Software},
    sim::{ActorFlags, InputCmd, Position, TicRunner, player_input},
    world::{Camera, GridMap, procedural},
};

const DEMO_MAP: [&str; 16] = [
    "1111111111111111",
    "1..............1",
    "1..2222....3...1",
    "1..2..2....3...1",
    "1..2..2........1",
    "1..............1",
    "1......44......1",
    "1......44......1",
    "1..............1",
    "1.333.....2222.1",
    "1..............1",
    "1....4.........1",
    "1....4.....3...1",
    "1....4.....3...1",
    "1..............1",
    "1111111111111111",
];

/// Corpse frame of the procedural zombie.
const CORPSE: usize = 5;
/// Seconds between opponent shots.
const SHOT_EVERY: Duration = Duration::from_secs(2);
const SHOT_SPEED: f32 = 6.0;
const PICKUP_RADIUS: f32 = 0.5;
const KILL_RADIUS: f32 = 3.0;

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Raster width in pixels
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Raster height in pixels (even)
    #[arg(long, default_value_t = 400)]
    height: usize,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Distance at which fog bottoms out
    #[arg(long, default_value_t = 20.0)]
    max_dist: f32,

    /// Window pixel scale (1, 2 or 4)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=4))]
    scale: u8,
}

fn window_scale(s: u8) -> Scale {
    match s {
        1 => Scale::X1,
        2 | 3 => Scale::X2,
        _ => Scale::X4,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    // ─────────── world & assets ───────────
    let map = GridMap::from_rows(&DEMO_MAP)?;
    let cfg = RenderConfig {
        width: opts.width,
        height: opts.height,
        fov: opts.fov.to_radians(),
        max_dist: opts.max_dist,
        ..RenderConfig::default()
    };
    let mut renderer = Software::new(
        cfg.clone(),
        procedural::build_textures()?,
        procedural::build_sprites()?,
    )?;
    renderer.set_flats("CONCRETE", "DARK");

    let zombie = renderer.sprites().id_or_placeholder("zombie");
    let health = renderer.sprites().id_or_placeholder("health");
    let ammo = renderer.sprites().id_or_placeholder("ammo");

    let mut sim = TicRunner::new();
    for (x, y) in [(5.5, 5.5), (12.5, 4.5), (8.5, 11.5), (13.5, 13.5)] {
        sim.spawn_enemy(vec2(x, y), zombie, (0, 3), 6);
    }
    sim.spawn_pickup(vec2(2.5, 8.5), health);
    sim.spawn_pickup(vec2(10.5, 7.5), ammo);
    sim.spawn_pickup(vec2(13.5, 1.5), health);
    log::info!(
        "map {}x{}, {} actors",
        map.width(),
        map.height(),
        sim.world().len()
    );

    let mut camera = Camera::new(vec2(1.5, 1.5), 0.0, cfg.fov);

    let mut win = Window::new(
        "yacast software raycaster",
        cfg.width,
        cfg.height,
        WindowOptions {
            scale: window_scale(opts.scale),
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(35);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_shot = Instant::now();

    let mut renderables = Vec::new();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* --------------- input ---------------------------------------- */
        let mut cmd = InputCmd::default();
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            cmd.forward += 1.0;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            cmd.forward -= 1.0;
        }
        if win.is_key_down(Key::A) {
            cmd.strafe -= 1.0;
        }
        if win.is_key_down(Key::D) {
            cmd.strafe += 1.0;
        }
        // rows grow downward, so a positive turn swings towards screen-right
        if win.is_key_down(Key::Left) {
            cmd.turn -= 1.0;
        }
        if win.is_key_down(Key::Right) {
            cmd.turn += 1.0;
        }
        cmd.run = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
        player_input(&mut camera, &map, cmd);

        /* --------------- demo actor logic ----------------------------- */
        let here = camera.pos();
        let mut pickups = Vec::new();
        let mut target: Option<(hecs::Entity, f32)> = None;
        let mut shooter: Option<(hecs::Entity, f32, Vec2)> = None;
        for (e, (pos, flags)) in sim.world().query::<(&Position, &ActorFlags)>().iter() {
            if flags.intersects(ActorFlags::PROJECTILE | ActorFlags::REMOVED) {
                continue;
            }
            let d = pos.0.distance(here);
            if flags.contains(ActorFlags::ENEMY) {
                if flags.contains(ActorFlags::DEAD) || d > KILL_RADIUS * 4.0 {
                    continue;
                }
                if shooter.is_none_or(|(_, best, _)| d < best) {
                    shooter = Some((e, d, pos.0));
                }
                if d <= KILL_RADIUS && target.is_none_or(|(_, best)| d < best) {
                    target = Some((e, d));
                }
            } else if d <= PICKUP_RADIUS {
                pickups.push(e);
            }
        }
        for e in pickups {
            sim.remove(e)?;
            log::info!("picked up {e:?}");
        }
        if win.is_key_pressed(Key::Space, KeyRepeat::No) {
            if let Some((e, _)) = target {
                sim.kill(e, CORPSE)?;
                log::info!("killed {e:?}");
            }
        }
        if let Some((_, _, from)) = shooter {
            if last_shot.elapsed() >= SHOT_EVERY {
                let dir = (here - from).normalize_or_zero();
                sim.spawn_projectile(from + dir * 0.5, dir * SHOT_SPEED, Owner::Opponent);
                last_shot = Instant::now();
            }
        }
        if win.is_key_down(Key::LeftCtrl) || win.is_key_down(Key::RightCtrl) {
            sim.spawn_projectile(here, camera.dir() * SHOT_SPEED * 2.0, Owner::Player);
        }

        sim.pump(&map);

        /* --------------- draw ----------------------------------------- */
        sim.snapshot(&mut renderables);
        let mut shown: minifb::Result<()> = Ok(());
        renderer.render_frame(&camera, &map, &renderables, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            shown = win.update_with_buffer(fb, w, h);
        });
        shown?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            let stats = renderer.stats();
            log::info!(
                "avg render: {:.2} ms  ({:.1} FPS), {} sprites drawn, {} culled",
                avg_ms,
                1000.0 / avg_ms,
                stats.sprites_drawn,
                stats.sprites_culled
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
