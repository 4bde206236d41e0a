//! Renderer tuning knobs.
//!
//! Every numeric constant the passes use lives here so nothing in
//! `renderer::software` carries a magic number of its own.

use std::f32::consts::{FRAC_PI_3, PI};

use crate::renderer::Rgba;

/// Fixed-resolution renderer configuration.
///
/// Built once (usually from CLI options), validated, then handed to
/// [`crate::renderer::Software::new`]. Never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Raster size in pixels. The core never rescales; presentation does.
    pub width: usize,
    pub height: usize,

    /// Horizontal field of view in radians (plane length = tan(fov / 2)).
    pub fov: f32,

    /// Distance at which fog bottoms out at `fog_floor`.
    pub max_dist: f32,
    /// Minimum fog multiplier, reached at `max_dist` and beyond.
    pub fog_floor: f32,
    /// Multiplier for walls hit across a y-boundary.
    pub side_shade: f32,
    /// Extra multiplier for ceilings relative to floors at equal distance.
    pub ceil_shade: f32,

    /// DDA safety cap: cells visited per ray before giving up.
    pub max_steps: u32,

    /// Sprites at or closer than this camera-space depth are culled.
    pub sprite_near: f32,
    /// Sprite texels with alpha below this are transparent.
    pub alpha_cutoff: u8,

    pub projectile_colour: Rgba,
    /// Projectile disc radius in pixels at depth 1.0.
    pub projectile_radius: f32,

    /// Fill colour written by `begin_frame`.
    pub clear_colour: Rgba,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            fov: FRAC_PI_3,
            max_dist: 20.0,
            fog_floor: 0.05,
            side_shade: 0.6,
            ceil_shade: 0.7,
            max_steps: 64,
            sprite_near: 0.05,
            alpha_cutoff: 10,
            projectile_colour: 0xFF_FF_64_00,
            projectile_radius: 4.0,
            clear_colour: 0xFF_20_20_20,
        }
    }
}

/// Reasons a [`RenderConfig`] is rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("resolution {0}x{1} must be non-zero with an even height")]
    Resolution(usize, usize),

    #[error("field of view {0} rad must lie strictly between 0 and π")]
    Fov(f32),

    #[error("max render distance {0} must be finite and positive")]
    MaxDist(f32),

    #[error("`{name}` = {value} must lie in 0.0..=1.0")]
    Factor { name: &'static str, value: f32 },

    #[error("DDA step cap must be at least 1")]
    MaxSteps,

    #[error("sprite near plane {0} must be finite and positive")]
    SpriteNear(f32),
}

impl RenderConfig {
    /// Check every field; the render passes assume these hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.height % 2 != 0 {
            return Err(ConfigError::Resolution(self.width, self.height));
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(ConfigError::Fov(self.fov));
        }
        if !(self.max_dist.is_finite() && self.max_dist > 0.0) {
            return Err(ConfigError::MaxDist(self.max_dist));
        }
        for (name, value) in [
            ("fog_floor", self.fog_floor),
            ("side_shade", self.side_shade),
            ("ceil_shade", self.ceil_shade),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Factor { name, value });
            }
        }
        if self.max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }
        if !(self.sprite_near.is_finite() && self.sprite_near > 0.0) {
            return Err(ConfigError::SpriteNear(self.sprite_near));
        }
        Ok(())
    }

    #[inline]
    pub fn half_h(&self) -> i32 {
        (self.height / 2) as i32
    }

    /// Camera plane half-length for the configured field of view.
    #[inline]
    pub fn plane_len(&self) -> f32 {
        (self.fov * 0.5).tan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(RenderConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_odd_height() {
        let cfg = RenderConfig {
            height: 401,
            ..RenderConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Resolution(640, 401)));
    }

    #[test]
    fn rejects_bad_factor() {
        let cfg = RenderConfig {
            ceil_shade: 1.5,
            ..RenderConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::Factor {
                name: "ceil_shade",
                value: 1.5
            })
        );
    }

    #[test]
    fn rejects_nan_fov_and_zero_steps() {
        let cfg = RenderConfig {
            fov: f32::NAN,
            ..RenderConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Fov(_))));

        let cfg = RenderConfig {
            max_steps: 0,
            ..RenderConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::MaxSteps));
    }

    #[test]
    fn sixty_degree_plane_length() {
        let cfg = RenderConfig::default();
        assert!((cfg.plane_len() - 0.57735).abs() < 1e-4);
    }
}
