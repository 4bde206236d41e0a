use glam::{IVec2, Vec2, vec2};

use crate::{
    renderer::software::{
        Software,
        shade::{fog, shade},
    },
    world::{Camera, CellSource, EMPTY, Material},
};

/// Stand-in for `1 / 0` when a ray component is (nearly) zero.
const HUGE_DELTA: f32 = 1e30;

/// Closest distance a wall may be drawn at; a camera pressed against a
/// cell boundary would otherwise produce a zero depth.
const MIN_WALL_DIST: f32 = 1e-3;

/// Which kind of grid line the ray crossed on its last step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Crossed `x = const`.
    X,
    /// Crossed `y = const`; these faces get the darker shade.
    Y,
}

/// First wall a ray runs into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Perpendicular distance along the camera's forward axis.
    pub dist: f32,
    pub side: Side,
    pub cell: IVec2,
    pub material: Material,
}

#[inline(always)]
fn delta_dist(component: f32) -> f32 {
    if component.abs() < 1e-12 {
        HUGE_DELTA
    } else {
        (1.0 / component).abs()
    }
}

/// March `ray` from `origin` through the grid one cell boundary at a time.
///
/// Returns `None` when `max_steps` cells pass without a non-empty one.  The
/// start cell itself is never tested.
pub fn cast_ray<M: CellSource + ?Sized>(
    origin: Vec2,
    ray: Vec2,
    map: &M,
    max_steps: u32,
) -> Option<RayHit> {
    let mut cell = origin.floor().as_ivec2();
    let delta = vec2(delta_dist(ray.x), delta_dist(ray.y));

    let (step_x, mut side_x) = if ray.x < 0.0 {
        (-1, (origin.x - cell.x as f32) * delta.x)
    } else {
        (1, (cell.x as f32 + 1.0 - origin.x) * delta.x)
    };
    let (step_y, mut side_y) = if ray.y < 0.0 {
        (-1, (origin.y - cell.y as f32) * delta.y)
    } else {
        (1, (cell.y as f32 + 1.0 - origin.y) * delta.y)
    };

    for _ in 0..max_steps {
        let side = if side_x < side_y {
            side_x += delta.x;
            cell.x += step_x;
            Side::X
        } else {
            side_y += delta.y;
            cell.y += step_y;
            Side::Y
        };

        let material = map.cell(cell.x, cell.y);
        if material != EMPTY {
            // side_* already points one boundary past the hit
            let dist = match side {
                Side::X => side_x - delta.x,
                Side::Y => side_y - delta.y,
            };
            return Some(RayHit {
                dist,
                side,
                cell,
                material,
            });
        }
    }
    None
}

impl Software {
    /// Wall pass: one ray per column, rebuilds every depth-buffer entry.
    pub fn draw_walls<M: CellSource + ?Sized>(&mut self, camera: &Camera, map: &M) {
        let origin = camera.pos();

        for x in 0..self.width {
            let t = 2.0 * x as f32 / self.width_f - 1.0;
            let ray = camera.ray_dir(t);

            match cast_ray(origin, ray, map, self.cfg.max_steps) {
                Some(hit) => {
                    let dist = hit.dist.max(MIN_WALL_DIST);
                    self.depth[x] = dist;
                    self.draw_wall_column(x, origin, ray, RayHit { dist, ..hit });
                }
                None => {
                    // open map or runaway ray: nothing to draw, nothing occludes
                    self.depth[x] = self.cfg.max_dist;
                    self.stats.dda_misses += 1;
                }
            }
        }
    }

    /// Draw one textured, shaded, fogged vertical slice.
    fn draw_wall_column(&mut self, x: usize, origin: Vec2, ray: Vec2, hit: RayHit) {
        let h = self.height as i32;
        let half_h = self.half_h;

        /* on-screen extent, clipped to the raster --------------------------*/
        let line_h = (self.height_f / hit.dist) as i32;
        let y0 = (half_h - line_h / 2).max(0);
        let y1 = (half_h + line_h / 2).min(h - 1);

        /* horizontal texture coordinate ------------------------------------*/
        let tex = self.textures.wall(hit.material);
        let size = tex.size() as i32;

        let mut wall_x = match hit.side {
            Side::X => origin.y + hit.dist * ray.y,
            Side::Y => origin.x + hit.dist * ray.x,
        };
        wall_x -= wall_x.floor();

        let mut tex_x = (wall_x * size as f32) as i32;
        if (hit.side == Side::X && ray.x > 0.0) || (hit.side == Side::Y && ray.y < 0.0) {
            tex_x = size - tex_x - 1;
        }

        /* lighting -------------------------------------------------------*/
        let side_shade = match hit.side {
            Side::X => 1.0,
            Side::Y => self.cfg.side_shade,
        };
        let f = side_shade * fog(hit.dist, &self.cfg);

        /* vertical walk through the texture ------------------------------*/
        let step = size as f32 / line_h.max(1) as f32;
        let mut tex_pos = (y0 - half_h + line_h / 2) as f32 * step;

        for y in y0..=y1 {
            let tex_y = tex_pos as i32;
            tex_pos += step;
            self.scratch[y as usize * self.width + x] = shade(tex.sample(tex_x, tex_y), f);
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::RenderConfig,
        renderer::{
            Renderer, RendererExt,
            software::{
                shade::luma,
                tests::{renderer, room, small_cfg, tiny_sprites},
            },
        },
        world::{GridMap, SOLID},
    };
    use glam::ivec2;

    /// Endless open field: every cell empty, no out-of-range solid.
    struct Open;
    impl CellSource for Open {
        fn cell(&self, _x: i32, _y: i32) -> Material {
            EMPTY
        }
    }

    /// Row 2 has its first wall at x = 5.
    fn corridor() -> GridMap {
        GridMap::from_rows(&[
            "11111111",
            "1......1",
            "1....1.1",
            "1......1",
            "11111111",
        ])
        .unwrap()
    }

    #[test]
    fn axis_aligned_ray_distance() {
        let hit = cast_ray(vec2(2.5, 2.5), Vec2::X, &corridor(), 64).unwrap();
        assert!((hit.dist - 2.5).abs() < 1e-3);
        assert_eq!(hit.side, Side::X);
        assert_eq!(hit.cell, ivec2(5, 2));
        assert_eq!(hit.material, SOLID);
    }

    #[test]
    fn center_column_depth_matches_axis_ray() {
        let cfg = RenderConfig::default();
        let mut sw = renderer(cfg.clone(), tiny_sprites());
        let cam = Camera::new(vec2(2.5, 2.5), 0.0, cfg.fov);
        sw.render_frame(&cam, &corridor(), &[], |_, _, _| {});
        let center = cfg.width / 2;
        assert!((sw.depth()[center] - 2.5).abs() < 1e-3);
    }

    #[test]
    fn perpendicular_distance_keeps_walls_flat() {
        // facing a flat wall head-on: every column reports the same depth
        let map = GridMap::from_rows(&[
            "111111111111111111111",
            "1...................1",
            "1...................1",
            "1...................1",
            "111111111111111111111",
        ])
        .unwrap();
        let cfg = small_cfg();
        let mut sw = renderer(cfg.clone(), tiny_sprites());
        let cam = Camera::new(vec2(10.5, 3.5), -std::f32::consts::FRAC_PI_2, cfg.fov);
        sw.render_frame(&cam, &map, &[], |_, _, _| {});
        for d in sw.depth() {
            assert!((d - 2.5).abs() < 1e-3, "depth {d}");
        }
    }

    #[test]
    fn zero_component_rays_do_not_divide_by_zero() {
        let hit = cast_ray(vec2(2.5, 2.5), Vec2::NEG_Y, &room(), 64).unwrap();
        assert_eq!(hit.side, Side::Y);
        assert!((hit.dist - 1.5).abs() < 1e-3);
        assert!(hit.dist.is_finite());
    }

    #[test]
    fn step_cap_reports_a_miss() {
        assert!(cast_ray(vec2(0.5, 0.5), vec2(1.0, 0.3), &Open, 64).is_none());
    }

    #[test]
    fn open_field_renders_max_distance() {
        let cfg = small_cfg();
        let mut sw = renderer(cfg.clone(), tiny_sprites());
        let cam = Camera::new(vec2(0.5, 0.5), 0.4, cfg.fov);
        sw.render_frame(&cam, &Open, &[], |_, _, _| {});
        assert!(sw.depth().iter().all(|&d| d == cfg.max_dist));
        assert_eq!(sw.stats().dda_misses, cfg.width as u32);
    }

    #[test]
    fn y_faces_are_darker() {
        let cfg = small_cfg();
        let mut sw = renderer(cfg.clone(), tiny_sprites());
        let mid = cfg.half_h() as usize;

        // looking along +x at the x = 9 wall (x-side) from 2.5 away
        let cam = Camera::new(vec2(6.5, 2.5), 0.0, cfg.fov);
        sw.render_frame(&cam, &room(), &[], |_, _, _| {});
        let x_face = sw.pixels()[mid * cfg.width + cfg.width / 2];

        // looking along +y at the y = 4 wall (y-side) from 1.5 away
        let cam = Camera::new(vec2(4.5, 2.5), std::f32::consts::FRAC_PI_2, cfg.fov);
        sw.begin_frame();
        sw.draw_walls(&cam, &room());
        let y_face = sw.pixels()[mid * cfg.width + cfg.width / 2];

        // nearer y-face is still darker because of the side shade
        assert!(luma(y_face) < luma(x_face));
    }

    #[test]
    fn farther_walls_are_not_brighter() {
        let cfg = small_cfg();
        let mut sw = renderer(cfg.clone(), tiny_sprites());
        let mid = cfg.half_h() as usize * cfg.width + cfg.width / 2;
        let mut prev = u32::MAX;
        for x in [7.5_f32, 5.5, 3.5, 1.5] {
            let cam = Camera::new(vec2(x, 2.5), 0.0, cfg.fov);
            sw.render_frame(&cam, &room(), &[], |_, _, _| {});
            let b = luma(sw.pixels()[mid]);
            assert!(b <= prev);
            prev = b;
        }
    }

    #[test]
    fn embedded_camera_stays_finite() {
        let cfg = small_cfg();
        let mut sw = renderer(cfg.clone(), tiny_sprites());
        // exactly on the boundary of the x = 0 wall, looking into it
        let cam = Camera::new(vec2(1.0, 2.5), std::f32::consts::PI, cfg.fov);
        sw.render_frame(&cam, &room(), &[], |_, _, _| {});
        assert!(sw.depth().iter().all(|d| d.is_finite() && *d > 0.0));
    }
}
