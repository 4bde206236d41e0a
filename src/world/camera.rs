use glam::{Vec2, vec2};

/// Player view-point on the grid.
///
/// * `dir` and `plane` are derived from `angle` and always rebuilt together.
/// * `plane_len` fixes the field of view and never changes after `new`.
/// * The angle is not normalised; only its sine/cosine are ever used.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pos: Vec2,       // grid units, cell (i, j) spans [i, i+1) × [j, j+1)
    angle: f32,      // radians (0 = +X, counter-clockwise)
    plane_len: f32,  // tan(fov / 2)
    dir: Vec2,       // unit forward
    plane: Vec2,     // perpendicular to dir, length = plane_len
}

impl Camera {
    /// Create a camera at `pos`, facing `angle`, with horizontal FoV `fov`.
    pub fn new(pos: Vec2, angle: f32, fov: f32) -> Self {
        let mut cam = Self {
            pos,
            angle,
            plane_len: (fov * 0.5).tan(),
            dir: Vec2::X,
            plane: Vec2::Y,
        };
        cam.update_vectors();
        cam
    }

    fn update_vectors(&mut self) {
        let (s, c) = self.angle.sin_cos();
        self.dir = vec2(c, s);
        self.plane = self.dir.perp() * self.plane_len;
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    /// View-plane vector; `dir ± plane` are the screen-edge rays.
    #[inline(always)]
    pub fn plane(&self) -> Vec2 {
        self.plane
    }

    /*──────────────────────── mutation ───────────────────────────────*/

    /// Turn by `delta` radians (positive = towards +plane).
    pub fn rotate(&mut self, delta: f32) {
        self.angle += delta;
        self.update_vectors();
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.update_vectors();
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.pos = vec2(x, y);
    }

    /// Offset by `forward` units along `dir` and `side` units along the
    /// normalised plane; the caller decides whether the move is legal.
    pub fn stepped(&self, forward: f32, side: f32) -> Vec2 {
        self.pos + self.dir * forward + self.dir.perp() * side
    }

    /*──────────────────────── projection ─────────────────────────────*/

    /// Ray direction for camera-space offset `t` in `-1.0..=1.0`.
    #[inline(always)]
    pub fn ray_dir(&self, t: f32) -> Vec2 {
        self.dir + self.plane * t
    }

    /// World point `p` in camera space via the inverse of the
    /// `[plane | dir]` basis:
    ///  .x = transverse offset (screen-space ratio once divided by .y)
    ///  .y = depth along `dir`
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        let d = p - self.pos;
        let inv_det = 1.0 / (self.plane.x * self.dir.y - self.dir.x * self.plane.y);
        vec2(
            inv_det * (self.dir.y * d.x - self.dir.x * d.y),
            inv_det * (-self.plane.y * d.x + self.plane.x * d.y),
        )
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
