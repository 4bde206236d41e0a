//! Colour arithmetic shared by all three passes.

use crate::{config::RenderConfig, renderer::Rgba};

/// Linear distance fog: 1.0 at distance 0, falling to `fog_floor` at
/// `max_dist` and staying there.  Non-finite distances get the floor.
#[inline(always)]
pub fn fog(dist: f32, cfg: &RenderConfig) -> f32 {
    if !dist.is_finite() {
        return cfg.fog_floor;
    }
    let t = (dist / cfg.max_dist).clamp(0.0, 1.0);
    1.0 - (1.0 - cfg.fog_floor) * t
}

/// Multiply the RGB channels of `c` by `f` (clamped to 0..=1); alpha
/// comes out opaque.
#[inline(always)]
pub fn shade(c: Rgba, f: f32) -> Rgba {
    // 8.8 fixed point; NaN saturates to 0 in the cast
    let k = (f.clamp(0.0, 1.0) * 256.0) as u32;
    let r = (((c >> 16) & 0xFF) * k) >> 8;
    let g = (((c >> 8) & 0xFF) * k) >> 8;
    let b = ((c & 0xFF) * k) >> 8;
    0xFF_00_00_00 | (r << 16) | (g << 8) | b
}

#[inline(always)]
pub fn alpha(c: Rgba) -> u8 {
    (c >> 24) as u8
}

/// Perceived brightness, for tests and debugging overlays.
#[inline]
pub fn luma(c: Rgba) -> u32 {
    let r = (c >> 16) & 0xFF;
    let g = (c >> 8) & 0xFF;
    let b = c & 0xFF;
    (r * 299 + g * 587 + b * 114) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fog_endpoints() {
        let cfg = RenderConfig::default();
        assert_eq!(fog(0.0, &cfg), 1.0);
        assert!((fog(cfg.max_dist, &cfg) - cfg.fog_floor).abs() < 1e-6);
        assert!((fog(cfg.max_dist * 3.0, &cfg) - cfg.fog_floor).abs() < 1e-6);
        assert_eq!(fog(f32::INFINITY, &cfg), cfg.fog_floor);
        assert_eq!(fog(f32::NAN, &cfg), cfg.fog_floor);
    }

    #[test]
    fn fog_is_monotonic() {
        let cfg = RenderConfig::default();
        let mut prev = fog(0.0, &cfg);
        for i in 1..400 {
            let f = fog(i as f32 * 0.1, &cfg);
            assert!(f <= prev);
            assert!(f >= cfg.fog_floor);
            prev = f;
        }
    }

    #[test]
    fn shade_scales_channels() {
        assert_eq!(shade(0x00_FF_80_40, 1.0), 0xFF_FF_80_40);
        assert_eq!(shade(0xFF_FF_80_40, 0.0), 0xFF_00_00_00);
        assert_eq!(shade(0xFF_80_80_80, 0.5), 0xFF_40_40_40);
        assert_eq!(shade(0xFF_80_80_80, f32::NAN), 0xFF_00_00_00);
    }

    #[test]
    fn shaded_brightness_follows_fog() {
        let cfg = RenderConfig::default();
        let near = luma(shade(0xFF_C0_A0_80, fog(2.0, &cfg)));
        let far = luma(shade(0xFF_C0_A0_80, fog(9.0, &cfg)));
        assert!(far <= near);
    }
}
