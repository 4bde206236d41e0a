//! Rendering abstraction layer.
//!
//! *Game code never touches the pixel buffer directly.*  Each frame it hands
//! a read-only snapshot (camera, grid map, [`Renderable`] list) to a type that
//! implements [`Renderer`], then borrows the finished raster in `end_frame`.
//!
//! * The software backend ([`Software`]) runs three strictly ordered passes:
//!   floor/ceiling → walls (builds the depth buffer) → sprites.
//! * A helper blanket-impl [`RendererExt`] adds `render_frame` so call-sites
//!   stay short.
//! * HUD, minimap or weapon overlays belong to the caller and are drawn on
//!   the buffer *after* `end_frame`, never between passes.

use glam::Vec2;

use crate::world::{Camera, CellSource, Sprite, SpriteBank, SpriteId};

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Who fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Player,
    Opponent,
}

/// What a renderable looks like on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Body {
    /// Pickups, props, markers: one image.
    Stationary { sprite: SpriteId },
    /// Animated actor; `frame` indexes the kind's frame list.
    Enemy { sprite: SpriteId, frame: usize },
    /// Drawn as a flat-coloured disc, never textured.
    Projectile { owner: Owner },
}

/// Per-frame snapshot of one world object, produced by the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderable {
    pub pos: Vec2,
    pub body: Body,
    /// Fully gone from the world (collected pickup, despawned corpse).
    /// Dead-but-lying actors keep this `false`.
    pub removed: bool,
}

impl Renderable {
    pub fn new(pos: Vec2, body: Body) -> Self {
        Self {
            pos,
            body,
            removed: false,
        }
    }

    /// World position of the billboard's foot.
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Current frame's pixels; `None` for flat-coloured projectiles.
    #[inline]
    pub fn frame<'a>(&self, bank: &'a SpriteBank) -> Option<&'a Sprite> {
        match self.body {
            Body::Stationary { sprite } => Some(bank.frame(sprite, 0)),
            Body::Enemy { sprite, frame } => Some(bank.frame(sprite, frame)),
            Body::Projectile { .. } => None,
        }
    }

    /// Player projectiles move too fast to be worth drawing.
    #[inline]
    pub fn is_drawn(&self) -> bool {
        !self.removed
            && !matches!(
                self.body,
                Body::Projectile {
                    owner: Owner::Player
                }
            )
    }
}

/// A renderer that owns its frame-buffer and depth buffer.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window-manager.
pub trait Renderer {
    /// Clear the frame-buffer; buffers are never reallocated here.
    fn begin_frame(&mut self);

    /// Run every pass for one frame against a consistent world snapshot.
    fn draw_scene<M: CellSource + ?Sized>(
        &mut self,
        camera: &Camera,
        map: &M,
        renderables: &[Renderable],
    );

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `render_frame` adaptor.
pub trait RendererExt: Renderer {
    fn render_frame<M, F>(&mut self, camera: &Camera, map: &M, renderables: &[Renderable], submit: F)
    where
        M: CellSource + ?Sized,
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame();
        self.draw_scene(camera, map, renderables);
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::{FrameStats, Software};
