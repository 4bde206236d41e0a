use super::components::{ActorFlags, Animation, Position, Velocity};
use super::systems;
use crate::renderer::{Owner, Renderable};
use crate::world::{CellSource, SpriteId};
use glam::Vec2;
use hecs::{Entity, World};
use std::time::{Duration, Instant};

pub const SIM_FPS: u32 = 35;
pub const DT: f32 = 1.0 / SIM_FPS as f32;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Owns the ECS world and drives the demo's actor systems.
///
/// Runs strictly between frames: by the time the renderer asks for a
/// [`snapshot`](Self::snapshot) every tic for that frame has completed.
pub struct TicRunner {
    world: World,
    last: Instant,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TicRunner {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            last: Instant::now(),
        }
    }

    #[inline]
    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut hecs::World {
        &mut self.world
    }

    /*──────────────────────── spawning ───────────────────────────────*/

    /// Still billboard: pickup, prop, exit marker.
    pub fn spawn_pickup(&mut self, pos: Vec2, sprite: SpriteId) -> Entity {
        self.world.spawn((
            Position(pos),
            Animation::still(sprite),
            ActorFlags::empty(),
        ))
    }

    /// Animated actor walking through `frames` (inclusive), `hold` tics each.
    pub fn spawn_enemy(
        &mut self,
        pos: Vec2,
        sprite: SpriteId,
        frames: (usize, usize),
        hold: u32,
    ) -> Entity {
        self.world.spawn((
            Position(pos),
            Animation::cycle(sprite, frames.0, frames.1, hold),
            ActorFlags::ENEMY,
        ))
    }

    pub fn spawn_projectile(&mut self, pos: Vec2, vel: Vec2, owner: Owner) -> Entity {
        let mut flags = ActorFlags::PROJECTILE;
        if owner == Owner::Player {
            flags |= ActorFlags::FROM_PLAYER;
        }
        self.world.spawn((Position(pos), Velocity(vel), flags))
    }

    /*──────────────────────── state changes ──────────────────────────*/

    /// Mark an enemy dead and freeze it on `corpse_frame`; it stays visible.
    pub fn kill(&mut self, e: Entity, corpse_frame: usize) -> Result<(), hecs::QueryOneError> {
        let (flags, anim) = self
            .world
            .query_one_mut::<(&mut ActorFlags, &mut Animation)>(e)?;
        flags.insert(ActorFlags::DEAD);
        anim.freeze(corpse_frame);
        Ok(())
    }

    /// Take an actor out of the rendered world without despawning it.
    pub fn remove(&mut self, e: Entity) -> Result<(), hecs::ComponentError> {
        self.world.get::<&mut ActorFlags>(e)?.insert(ActorFlags::REMOVED);
        Ok(())
    }

    /*──────────────────────── stepping ───────────────────────────────*/

    /// Advance enough tics to synchronise simulation with real time.
    pub fn pump<M: CellSource + ?Sized>(&mut self, map: &M) {
        while self.last.elapsed() >= TIC {
            self.tick(map);
            self.last += TIC;
        }
    }

    /// Run one fixed-rate tic.
    pub fn tick<M: CellSource + ?Sized>(&mut self, map: &M) {
        systems::animation(&mut self.world);
        for e in systems::projectiles(&mut self.world, map) {
            // just queried, so it exists
            let _ = self.world.despawn(e);
        }
    }

    /// Read-only view handed to the renderer for one frame.
    pub fn snapshot(&self, out: &mut Vec<Renderable>) {
        systems::snapshot(&self.world, out);
    }
}
