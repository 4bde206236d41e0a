use glam::{Vec2, vec2};
use hecs::{Entity, World};

use super::components::{ActorFlags, Animation, InputCmd, Position, Velocity};
use super::tic::DT;
use crate::renderer::{Body, Owner, Renderable};
use crate::world::{Camera, CellSource, NO_SPRITE};

pub const MOVE_SPEED: f32 = 3.2; // grid units / second
pub const TURN_RATE: f32 = std::f32::consts::PI; // rad / second (180°/s)
pub const PLAYER_RADIUS: f32 = 0.3;

/* ── Animation system ─────────────────────────────────────────────── */
pub fn animation(world: &mut World) {
    for (_, anim) in world.query_mut::<&mut Animation>() {
        if anim.first == anim.last {
            continue;
        }
        anim.tics -= 1;
        if anim.tics == 0 {
            anim.tics = anim.hold;
            anim.frame = if anim.frame < anim.last {
                anim.frame + 1
            } else if anim.looping {
                anim.first
            } else {
                anim.last
            };
        }
    }
}

/* ── Projectile system ───────────────────────────────────────────── */

/// Advance every projectile one tic; those that enter a wall are returned
/// for despawning.
pub fn projectiles<M: CellSource + ?Sized>(world: &mut World, map: &M) -> Vec<Entity> {
    let mut spent = Vec::new();
    for (e, (pos, vel, flags)) in world.query_mut::<(&mut Position, &Velocity, &ActorFlags)>() {
        if !flags.contains(ActorFlags::PROJECTILE) {
            continue;
        }
        pos.0 += vel.0 * DT;
        if map.is_solid(pos.0.x, pos.0.y) {
            spent.push(e);
        }
    }
    spent
}

/* ── Render snapshot ─────────────────────────────────────────────── */

/// Rebuild `out` with one [`Renderable`] per actor. `out` keeps its
/// allocation across frames.
pub fn snapshot(world: &World, out: &mut Vec<Renderable>) {
    out.clear();
    let mut q = world.query::<(&Position, &ActorFlags, Option<&Animation>)>();
    for (_, (pos, flags, anim)) in q.iter() {
        let body = if flags.contains(ActorFlags::PROJECTILE) {
            Body::Projectile {
                owner: if flags.contains(ActorFlags::FROM_PLAYER) {
                    Owner::Player
                } else {
                    Owner::Opponent
                },
            }
        } else {
            let anim = anim.copied().unwrap_or_else(|| Animation::still(NO_SPRITE));
            if flags.contains(ActorFlags::ENEMY) {
                Body::Enemy {
                    sprite: anim.sprite,
                    frame: anim.frame,
                }
            } else {
                Body::Stationary {
                    sprite: anim.sprite,
                }
            }
        };
        out.push(Renderable {
            pos: pos.0,
            body,
            removed: flags.contains(ActorFlags::REMOVED),
        });
    }
}

/* ── Player camera ───────────────────────────────────────────────── */

/// Apply one tic of input to the camera, sliding along walls.
pub fn player_input<M: CellSource + ?Sized>(camera: &mut Camera, map: &M, cmd: InputCmd) {
    /* 1. turn */
    if cmd.turn != 0.0 {
        camera.rotate(cmd.turn * TURN_RATE * DT);
    }

    /* 2. wish-move */
    if cmd.forward == 0.0 && cmd.strafe == 0.0 {
        return;
    }
    let speed = if cmd.run { MOVE_SPEED * 1.5 } else { MOVE_SPEED };
    let target = camera.stepped(cmd.forward, cmd.strafe);
    let wish = (target - camera.pos()).normalize_or_zero() * speed * DT;

    /* 3. axis-separated slide */
    let mut pos = camera.pos();
    let clear = |p: Vec2| {
        [
            vec2(PLAYER_RADIUS, 0.0),
            vec2(-PLAYER_RADIUS, 0.0),
            vec2(0.0, PLAYER_RADIUS),
            vec2(0.0, -PLAYER_RADIUS),
        ]
        .iter()
        .all(|o| !map.is_solid(p.x + o.x, p.y + o.y))
    };
    if clear(vec2(pos.x + wish.x, pos.y)) {
        pos.x += wish.x;
    }
    if clear(vec2(pos.x, pos.y + wish.y)) {
        pos.y += wish.y;
    }
    camera.set_position(pos.x, pos.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GridMap;

    fn room() -> GridMap {
        GridMap::from_rows(&["11111", "1...1", "1...1", "11111"]).unwrap()
    }

    fn walk(cmd: InputCmd) -> InputCmd {
        InputCmd { forward: 1.0, ..cmd }
    }

    #[test]
    fn walking_into_a_wall_stops_short() {
        let map = room();
        let mut cam = Camera::new(vec2(1.5, 1.5), 0.0, std::f32::consts::FRAC_PI_3);
        for _ in 0..200 {
            player_input(&mut cam, &map, walk(InputCmd::default()));
        }
        assert!(cam.pos().x <= 4.0 - PLAYER_RADIUS + 1e-4);
        assert!(cam.pos().x > 3.5);
        assert_eq!(cam.pos().y, 1.5);
    }

    #[test]
    fn diagonal_move_slides_along_wall() {
        let map = room();
        let mut cam = Camera::new(vec2(3.5, 1.5), 0.0, std::f32::consts::FRAC_PI_3);
        let cmd = InputCmd {
            forward: 1.0,
            strafe: 1.0,
            ..InputCmd::default()
        };
        let start = cam.pos();
        for _ in 0..10 {
            player_input(&mut cam, &map, cmd);
        }
        // blocked in x, free in y
        assert!((cam.pos().x - start.x).abs() < 0.25);
        assert!((cam.pos().y - start.y).abs() > 0.1);
    }

    #[test]
    fn turning_uses_fixed_rate() {
        let map = room();
        let mut cam = Camera::new(vec2(2.0, 2.0), 0.0, std::f32::consts::FRAC_PI_3);
        player_input(
            &mut cam,
            &map,
            InputCmd {
                turn: 1.0,
                ..InputCmd::default()
            },
        );
        assert!((cam.angle() - TURN_RATE * DT).abs() < 1e-6);
        assert_eq!(cam.pos(), vec2(2.0, 2.0));
    }

    #[test]
    fn snapshot_reuses_buffer() {
        let mut world = World::new();
        world.spawn((Position(Vec2::ONE), Animation::still(3), ActorFlags::empty()));
        let mut out = Vec::with_capacity(8);
        snapshot(&world, &mut out);
        snapshot(&world, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].body, Body::Stationary { sprite: 3 });
        assert!(out.capacity() >= 8);
    }
}
