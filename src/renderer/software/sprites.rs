use glam::Vec2;

use crate::{
    renderer::{
        Body, Renderable, Rgba,
        software::{
            Software,
            shade::{alpha, fog, shade},
        },
    },
    world::Camera,
};

/// One renderable queued for this frame's sprite pass.
#[derive(Clone, Copy, Debug)]
pub struct VisSprite {
    /// Index into the frame's renderable slice.
    pub idx: usize,
    /// Squared world distance to the camera (sort key).
    pub dist_sq: f32,
}

/// Screen-space footprint of a billboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Camera-space forward distance, compared against the depth buffer.
    pub depth: f32,
    /// Projected centre column.
    pub center_x: i32,
    /// Side length of the square footprint in pixels.
    pub size: i32,
    /// Unclipped top-left corner.
    pub left: f32,
    pub top: f32,
    /* clipped, inclusive */
    pub x0: i32,
    pub x1: i32,
    pub y0: i32,
    pub y1: i32,
}

impl Software {
    /// Project world point `pos` to a square billboard footprint.
    ///
    /// `None` if it sits at/behind the near epsilon, shrinks below a pixel,
    /// or lands completely off-screen.
    pub fn project_sprite(&self, camera: &Camera, pos: Vec2) -> Option<Projection> {
        let cam = camera.to_cam(pos);
        if cam.y.is_nan() || cam.y <= self.cfg.sprite_near {
            return None;
        }

        let half_w = self.width_f * 0.5;
        let center = half_w * (1.0 + cam.x / cam.y);
        let size = (self.height_f / cam.y).floor().abs();
        if size < 1.0 {
            return None;
        }

        let left = center.floor() - size * 0.5;
        let right = center.floor() + size * 0.5;
        if right < 0.0 || left >= self.width_f {
            return None;
        }
        let top = self.half_h as f32 - size * 0.5;

        let max_x = self.width as i32 - 1;
        let max_y = self.height as i32 - 1;
        Some(Projection {
            depth: cam.y,
            center_x: center.floor() as i32,
            size: size as i32,
            left,
            top,
            x0: (left.floor() as i32).max(0),
            x1: (right.floor() as i32).min(max_x),
            y0: (top.floor() as i32).max(0),
            y1: ((self.half_h as f32 + size * 0.5).floor() as i32).min(max_y),
        })
    }

    /// Sprite pass: far-to-near billboards, occluded per column by the
    /// depth buffer the wall pass just built.  The depth buffer is read-only
    /// here; sprites never occlude each other except by draw order.
    pub fn draw_sprites(&mut self, camera: &Camera, renderables: &[Renderable]) {
        let origin = camera.pos();

        /* collect + painter's sort (stable: equal distances keep input order) */
        let mut order = std::mem::take(&mut self.vis_sprites);
        order.clear();
        order.extend(
            renderables
                .iter()
                .enumerate()
                .filter(|(_, r)| r.is_drawn())
                .map(|(idx, r)| VisSprite {
                    idx,
                    dist_sq: (r.pos() - origin).length_squared(),
                }),
        );
        order.sort_by(|a, b| b.dist_sq.total_cmp(&a.dist_sq));

        for vis in &order {
            let r = &renderables[vis.idx];
            let Some(proj) = self.project_sprite(camera, r.pos()) else {
                self.stats.sprites_culled += 1;
                continue;
            };

            match r.body {
                Body::Projectile { .. } => self.draw_disc(&proj),
                Body::Stationary { .. } | Body::Enemy { .. } => {
                    self.draw_billboard(r, vis.dist_sq.sqrt(), &proj)
                }
            }
            self.stats.sprites_drawn += 1;
        }

        self.vis_sprites = order;
    }

    /// Textured path: alpha-masked, fogged, depth-tested per column.
    fn draw_billboard(&mut self, r: &Renderable, dist: f32, proj: &Projection) {
        let Some(spr) = r.frame(&self.sprites) else {
            return;
        };
        let f = fog(dist, &self.cfg);
        let cutoff = self.cfg.alpha_cutoff;
        let size = proj.size as f32;

        for sx in proj.x0..=proj.x1 {
            if proj.depth >= self.depth[sx as usize] {
                continue; // behind a wall
            }
            let tex_x = ((sx as f32 - proj.left) * spr.w as f32 / size).floor() as i32;

            for sy in proj.y0..=proj.y1 {
                let tex_y = ((sy as f32 - proj.top) * spr.h as f32 / size).floor() as i32;
                let Some(c) = spr.texel(tex_x, tex_y) else {
                    continue;
                };
                if alpha(c) < cutoff {
                    continue;
                }
                self.scratch[sy as usize * self.width + sx as usize] = shade(c, f);
            }
        }
    }

    /// Flat path for opponent projectiles: a solid disc at the horizon.
    fn draw_disc(&mut self, proj: &Projection) {
        let r = (self.cfg.projectile_radius / proj.depth).floor().max(1.0) as i32;
        let colour: Rgba = self.cfg.projectile_colour;
        let (cx, cy) = (proj.center_x, self.half_h);

        let x_lo = cx.saturating_sub(r).max(0);
        let x_hi = cx.saturating_add(r).min(self.width as i32);
        let y_lo = (cy - r).max(0);
        let y_hi = (cy + r).min(self.height as i32);

        for sx in x_lo..x_hi {
            if proj.depth >= self.depth[sx as usize] {
                continue;
            }
            let dx = sx - cx;
            for sy in y_lo..y_hi {
                let dy = sy - cy;
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                self.scratch[sy as usize * self.width + sx as usize] = colour;
            }
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
