use crate::{
    renderer::software::{
        Software,
        shade::{fog, shade},
    },
    world::Camera,
};

impl Software {
    /// Floor / ceiling pass: inverse-perspective mapping, one scan-line at
    /// a time.
    ///
    /// Every row is an iso-distance line on the floor (below the horizon) or
    /// ceiling (above it).  The horizon row itself has infinite distance
    /// and is skipped; it keeps the clear colour unless a wall covers it.
    pub fn draw_planes(&mut self, camera: &Camera) {
        let floor = self.textures.texture_or_missing(self.floor_tex);
        let ceil = self.textures.texture_or_missing(self.ceil_tex);

        // screen-edge rays (camera-space offsets −1 and +1)
        let left = camera.ray_dir(-1.0);
        let right = camera.ray_dir(1.0);
        let span = (right - left) / self.width_f;
        let origin = camera.pos();
        let half_h = self.half_h;

        for y in 0..self.height as i32 {
            let is_floor = y > half_h;
            let p = (y - half_h).abs();
            if p == 0 {
                continue;
            }

            let row_dist = half_h as f32 / p as f32;
            let row_fog = fog(row_dist, &self.cfg);
            let (tex, f) = if is_floor {
                (floor, row_fog)
            } else {
                (ceil, row_fog * self.cfg.ceil_shade)
            };

            /* world-space walk along the scan-line ------------------------*/
            let step = span * row_dist;
            let mut world = origin + left * row_dist;
            let size = tex.size() as f32;

            let row_start = y as usize * self.width;
            let row = &mut self.scratch[row_start..row_start + self.width];
            for px in row.iter_mut() {
                let u = (world.x * size).floor() as i32;
                let v = (world.y * size).floor() as i32;
                world += step;
                *px = shade(tex.sample(u, v), f);
            }
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
