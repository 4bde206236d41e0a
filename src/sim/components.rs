use bitflags::bitflags;
use glam::Vec2;

use crate::world::SpriteId;

/// World-space position on the grid.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Grid units per second.
#[derive(Debug, Clone, Copy, Default)]
pub struct Velocity(pub Vec2);

/// Which sprite frames an actor cycles through.
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    pub sprite: SpriteId,
    pub frame: usize,
    pub first: usize,
    pub last: usize,
    pub looping: bool,
    /// Tics each frame is held for.
    pub hold: u32,
    pub tics: u32,
}

impl Animation {
    /// Single still image.
    pub fn still(sprite: SpriteId) -> Self {
        Self::cycle(sprite, 0, 0, 1)
    }

    /// Loop `first..=last`, `hold` tics per frame.
    pub fn cycle(sprite: SpriteId, first: usize, last: usize, hold: u32) -> Self {
        Self {
            sprite,
            frame: first,
            first,
            last,
            looping: true,
            hold: hold.max(1),
            tics: hold.max(1),
        }
    }

    /// Jump to `frame` and stay there.
    pub fn freeze(&mut self, frame: usize) {
        self.frame = frame;
        self.first = frame;
        self.last = frame;
        self.looping = false;
    }
}

bitflags! {
    /// Render-relevant state carried by every actor.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ActorFlags: u8 {
        /// Drawn as a flat disc, moves until it meets a wall.
        const PROJECTILE  = 0x01;
        /// Fired by the player; never drawn.
        const FROM_PLAYER = 0x02;
        /// Animated actor (as opposed to a still pickup).
        const ENEMY       = 0x04;
        /// Killed; corpse stays visible.
        const DEAD        = 0x08;
        /// Gone from the world; skipped by the renderer.
        const REMOVED     = 0x10;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputCmd {
    pub forward: f32, // –1 … +1
    pub strafe: f32,  // –1 … +1  (left / right)
    pub turn: f32,    // –1 … +1  (towards -plane / +plane)
    pub run: bool,    // Shift
}
