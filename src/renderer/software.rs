//! ---------------------------------------------------------------------------
//! Classic software (CPU) raycasting renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * One render context ([`Software`]) owns the frame-buffer, the per-column
//!   depth buffer and the texture / sprite banks; all are sized once in
//!   [`Software::new`] and reused for every frame.
//! * Pass order is fixed: [`planes`] → [`walls`] → [`sprites`].  The sprite
//!   pass only *reads* the depth buffer the wall pass has just rebuilt.
//! ---------------------------------------------------------------------------

pub mod planes;
pub mod shade;
pub mod sprites;
pub mod walls;

use crate::{
    config::{ConfigError, RenderConfig},
    renderer::{Renderable, Renderer, Rgba},
    world::{Camera, CellSource, NO_TEXTURE, SpriteBank, TextureBank, TextureId},
};

use sprites::VisSprite;

/// Counters for the last rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Columns whose ray hit the DDA step cap without finding a wall.
    pub dda_misses: u32,
    pub sprites_drawn: u32,
    /// Behind the camera, too far, or fully off-screen.
    pub sprites_culled: u32,
}

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Grid raycaster render context.
pub struct Software {
    cfg: RenderConfig,

    scratch: Vec<Rgba>,
    /// Perpendicular wall distance per screen column.
    depth: Vec<f32>,

    textures: TextureBank,
    sprites: SpriteBank,
    floor_tex: TextureId,
    ceil_tex: TextureId,

    /// Sprite draw order, refilled each frame.
    vis_sprites: Vec<VisSprite>,
    stats: FrameStats,

    width: usize,
    height: usize,
    width_f: f32,
    height_f: f32,
    half_h: i32,
}

impl Software {
    /// Validate `cfg` and allocate every per-frame buffer.
    ///
    /// Textures and sprites must be fully built by now; nothing is loaded
    /// lazily once frames start.
    pub fn new(
        cfg: RenderConfig,
        textures: TextureBank,
        sprites: SpriteBank,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let (w, h) = (cfg.width, cfg.height);
        log::debug!(
            "software renderer {w}x{h}, fov {:.1}°, {} textures, {} sprite kinds",
            cfg.fov.to_degrees(),
            textures.len(),
            sprites.len()
        );

        Ok(Self {
            scratch: vec![cfg.clear_colour; w * h],
            depth: vec![cfg.max_dist; w],
            textures,
            sprites,
            floor_tex: NO_TEXTURE,
            ceil_tex: NO_TEXTURE,
            vis_sprites: Vec::new(),
            stats: FrameStats::default(),
            width: w,
            height: h,
            width_f: w as f32,
            height_f: h as f32,
            half_h: cfg.half_h(),
            cfg,
        })
    }

    /// Select floor and ceiling textures by name (swapped per level).
    /// Unknown names render as the checkerboard.
    pub fn set_flats(&mut self, floor: &str, ceiling: &str) {
        self.floor_tex = self.textures.id_or_missing(floor);
        self.ceil_tex = self.textures.id_or_missing(ceiling);
        if self.floor_tex == NO_TEXTURE || self.ceil_tex == NO_TEXTURE {
            log::warn!("flats `{floor}` / `{ceiling}` not all found, using checkerboard");
        } else {
            log::debug!("flats set to `{floor}` / `{ceiling}`");
        }
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    /// Depth buffer of the last frame, one entry per column.
    #[inline]
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// Frame-buffer of the last frame, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.scratch
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    #[inline]
    pub fn textures(&self) -> &TextureBank {
        &self.textures
    }

    #[inline]
    pub fn sprites(&self) -> &SpriteBank {
        &self.sprites
    }

    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self) {
        self.scratch.fill(self.cfg.clear_colour);
        self.stats = FrameStats::default();
    }

    fn draw_scene<M: CellSource + ?Sized>(
        &mut self,
        camera: &Camera,
        map: &M,
        renderables: &[Renderable],
    ) {
        self.draw_planes(camera);
        self.draw_walls(camera, map);
        self.draw_sprites(camera, renderables);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        log::trace!(
            "frame: {} dda misses, {} sprites drawn, {} culled",
            self.stats.dda_misses,
            self.stats.sprites_drawn,
            self.stats.sprites_culled
        );
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        renderer::RendererExt,
        world::{GridMap, Sprite, Texture},
    };
    use glam::vec2;

    /* tiny helpers ---------------------------------------------------*/

    /// Bank with solid-colour wall / floor / ceiling textures.
    pub(crate) fn tiny_bank() -> TextureBank {
        let mut bank = TextureBank::default_with_checker();
        let solid = |name: &str, c: Rgba| Texture::new(name, 4, vec![c; 16]).unwrap();
        let wall = bank.insert("WALL", solid("WALL", 0xFF_C0_C0_C0)).unwrap();
        bank.insert("FLOOR", solid("FLOOR", 0xFF_40_80_40)).unwrap();
        bank.insert("CEIL", solid("CEIL", 0xFF_40_40_80)).unwrap();
        bank.bind_material(1, wall).unwrap();
        bank
    }

    pub(crate) fn tiny_sprites() -> SpriteBank {
        SpriteBank::new(Sprite::new(1, vec![0xFF_FF_FF_FF]).unwrap())
    }

    pub(crate) fn renderer(cfg: RenderConfig, sprites: SpriteBank) -> Software {
        let mut sw = Software::new(cfg, tiny_bank(), sprites).unwrap();
        sw.set_flats("FLOOR", "CEIL");
        sw
    }

    pub(crate) fn small_cfg() -> RenderConfig {
        RenderConfig {
            width: 64,
            height: 40,
            ..RenderConfig::default()
        }
    }

    /// 10×5 room, walls all round.
    pub(crate) fn room() -> GridMap {
        GridMap::from_rows(&[
            "1111111111",
            "1........1",
            "1........1",
            "1........1",
            "1111111111",
        ])
        .unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(Software::new(cfg, tiny_bank(), tiny_sprites()).is_err());
    }

    #[test]
    fn renders_full_frame_and_submits_once() {
        let mut sw = renderer(small_cfg(), tiny_sprites());
        let cam = Camera::new(vec2(2.5, 2.5), 0.3, sw.config().fov);
        let mut calls = 0;
        sw.render_frame(&cam, &room(), &[], |fb, w, h| {
            calls += 1;
            assert_eq!((w, h), (64, 40));
            assert_eq!(fb.len(), 64 * 40);
        });
        assert_eq!(calls, 1);
        // every column hit a wall
        assert_eq!(sw.stats().dda_misses, 0);
    }

    #[test]
    fn depth_is_finite_and_positive() {
        let mut sw = renderer(small_cfg(), tiny_sprites());
        let map = room();
        for angle in [0.0_f32, 0.7, 1.9, 3.1, 4.4, 5.9] {
            let cam = Camera::new(vec2(4.2, 2.7), angle, sw.config().fov);
            sw.render_frame(&cam, &map, &[], |_, _, _| {});
            assert!(
                sw.depth().iter().all(|d| d.is_finite() && *d > 0.0),
                "bad depth at angle {angle}"
            );
        }
    }

    #[test]
    fn buffers_are_reused_between_frames() {
        let mut sw = renderer(small_cfg(), tiny_sprites());
        let cam = Camera::new(vec2(2.5, 2.5), 0.0, sw.config().fov);
        let map = room();
        sw.render_frame(&cam, &map, &[], |_, _, _| {});
        let (px_ptr, depth_ptr) = (sw.pixels().as_ptr(), sw.depth().as_ptr());
        sw.render_frame(&cam, &map, &[], |_, _, _| {});
        assert_eq!(px_ptr, sw.pixels().as_ptr());
        assert_eq!(depth_ptr, sw.depth().as_ptr());
    }

    #[test]
    fn unknown_flats_fall_back_to_checker() {
        let mut sw = renderer(small_cfg(), tiny_sprites());
        sw.set_flats("NOPE", "CEIL");
        assert_eq!(sw.floor_tex, NO_TEXTURE);
        assert_ne!(sw.ceil_tex, NO_TEXTURE);
    }
}
