//! Startup-time procedural art for the demo viewer.
//!
//! Nothing here runs per frame: [`build_textures`] and [`build_sprites`]
//! are called once and their banks handed to the renderer.

use crate::{
    renderer::Rgba,
    world::{
        grid::Material,
        texture::{Sprite, SpriteBank, Texture, TextureBank, TextureError},
    },
};

pub const TEX_SIZE: usize = 64;
pub const SPRITE_SIZE: usize = 64;

/// Material codes used by the demo maps.
pub const WALL_BRICK: Material = 1;
pub const WALL_METAL: Material = 2;
pub const WALL_TECH: Material = 3;
pub const WALL_STONE: Material = 4;

/// Cheap deterministic value noise in `0.0..1.0`.
fn noise(x: usize, y: usize, seed: u32) -> f32 {
    let n = (x as f32 * 127.1 + y as f32 * 311.7 + seed as f32 * 74.3).sin() * 43_758.547;
    n - n.floor()
}

#[inline]
fn rgb(r: f32, g: f32, b: f32) -> Rgba {
    let c = |v: f32| v.clamp(0.0, 255.0) as u32;
    0xFF_00_00_00 | (c(r) << 16) | (c(g) << 8) | c(b)
}

fn paint(name: &str, f: impl Fn(usize, usize) -> Rgba) -> Result<Texture, TextureError> {
    let mut pixels = Vec::with_capacity(TEX_SIZE * TEX_SIZE);
    for y in 0..TEX_SIZE {
        for x in 0..TEX_SIZE {
            pixels.push(f(x, y));
        }
    }
    Texture::new(name, TEX_SIZE, pixels)
}

/*──────────────────────── wall / flat textures ───────────────────────*/

fn brick() -> Result<Texture, TextureError> {
    const BRICK_W: usize = 16;
    const BRICK_H: usize = 8;
    paint("BRICK", |x, y| {
        let offset = (y / BRICK_H % 2) * (BRICK_W / 2);
        let mortar = (x + offset) % BRICK_W == 0 || y % BRICK_H == 0;
        let n = noise(x, y, 0) * 20.0 - 10.0;
        if mortar {
            rgb(40.0 + n, 30.0 + n, 25.0 + n)
        } else {
            rgb(160.0 + n, 55.0 + n, 40.0 + n)
        }
    })
}

fn metal() -> Result<Texture, TextureError> {
    paint("METAL", |x, y| {
        let (rx, ry) = (x % 16, y % 16);
        if (rx == 2 && ry == 2) || (rx == 13 && ry == 13) {
            return rgb(180.0, 180.0, 190.0); // rivet
        }
        let v = 90.0 + (y as f32 * 0.4).sin() * 10.0 + noise(x, y, 1) * 15.0;
        rgb(v, v + 2.0, v + 8.0)
    })
}

fn tech() -> Result<Texture, TextureError> {
    const LINES: [usize; 6] = [4, 12, 20, 32, 44, 56];
    paint("TECH", |x, y| {
        if LINES.contains(&y) {
            rgb(0.0, 180.0, 60.0)
        } else if LINES.contains(&(y.wrapping_sub(1))) {
            rgb(0.0, 60.0, 20.0)
        } else if LINES.contains(&x) && noise(x, y, 2) > 0.7 {
            rgb(0.0, 150.0, 50.0)
        } else {
            rgb(10.0, 15.0, 10.0)
        }
    })
}

fn stone() -> Result<Texture, TextureError> {
    paint("STONE", |x, y| {
        if noise(x * 2, y * 3, 6) < 0.05 {
            return rgb(30.0, 30.0, 28.0); // crack
        }
        let n = noise(x, y, 5) * 30.0;
        rgb(75.0 + n, 72.0 + n, 65.0 + n)
    })
}

fn concrete() -> Result<Texture, TextureError> {
    paint("CONCRETE", |x, y| {
        let seam = if x % 32 == 0 || y % 32 == 0 { -15.0 } else { 0.0 };
        let n = noise(x, y, 10) * 25.0 + seam;
        rgb(80.0 + n, 80.0 + n, 78.0 + n)
    })
}

fn dark() -> Result<Texture, TextureError> {
    paint("DARK", |x, y| {
        let n = noise(x, y, 11) * 15.0;
        rgb(25.0 + n, 25.0 + n, 28.0 + n)
    })
}

fn hell_floor() -> Result<Texture, TextureError> {
    paint("HELLFLOOR", |x, y| {
        let n = noise(x, y, 12) * 30.0;
        rgb(70.0 + n, 15.0 + n * 0.3, 5.0)
    })
}

/// Every demo texture, with wall materials 1‥4 bound.
pub fn build_textures() -> Result<TextureBank, TextureError> {
    let mut bank = TextureBank::default_with_checker();

    for (code, tex) in [
        (WALL_BRICK, brick()?),
        (WALL_METAL, metal()?),
        (WALL_TECH, tech()?),
        (WALL_STONE, stone()?),
    ] {
        let name = tex.name.clone();
        let id = bank.insert(name, tex)?;
        bank.bind_material(code, id)?;
    }
    for tex in [concrete()?, dark()?, hell_floor()?] {
        bank.insert(tex.name.clone(), tex)?;
    }

    log::debug!("built {} procedural textures", bank.len() - 1);
    Ok(bank)
}

/*───────────────────────────── sprites ───────────────────────────────*/

/// Transparent canvas with a filled-rectangle brush.
struct Canvas(Vec<Rgba>);

impl Canvas {
    fn new() -> Self {
        Self(vec![0; SPRITE_SIZE * SPRITE_SIZE])
    }

    fn rect(&mut self, x: usize, y: usize, w: usize, h: usize, colour: Rgba) -> &mut Self {
        for yy in y..(y + h).min(SPRITE_SIZE) {
            for xx in x..(x + w).min(SPRITE_SIZE) {
                self.0[yy * SPRITE_SIZE + xx] = colour;
            }
        }
        self
    }

    fn finish(self) -> Result<Sprite, TextureError> {
        Sprite::new(SPRITE_SIZE, self.0)
    }
}

/// Frames 0‥3 walk, 4 attack, 5 corpse.
fn zombie(frame: usize) -> Result<Sprite, TextureError> {
    const SKIN: Rgba = 0xFF_4A_70_38;
    const BODY: Rgba = 0xFF_3A_5C_2A;
    const LEGS: Rgba = 0xFF_2A_4A_1A;
    const EYES: Rgba = 0xFF_CC_00_00;

    let mut c = Canvas::new();
    if frame == 5 {
        c.rect(10, 42, 44, 14, BODY).rect(10, 46, 44, 8, LEGS);
        return c.finish();
    }

    let bob = frame % 2;
    c.rect(22, 28 + bob, 20, 22, BODY)
        .rect(24, 16 + bob, 16, 14, SKIN)
        .rect(27, 19 + bob, 3, 3, EYES)
        .rect(34, 19 + bob, 3, 3, EYES)
        .rect(14, 30 + bob, 8, 16, BODY)
        .rect(42, 30 + bob, 8, 16, BODY)
        .rect(22, 50, 8, 12, LEGS)
        .rect(34, 50, 8, 12, LEGS);
    if frame == 4 {
        c.rect(4, 28, 16, 6, BODY).rect(44, 28, 16, 6, BODY);
    }
    c.finish()
}

fn health_pack() -> Result<Sprite, TextureError> {
    let mut c = Canvas::new();
    c.rect(16, 24, 32, 24, 0xFF_EE_EE_EE)
        .rect(28, 26, 8, 20, 0xFF_FF_00_00)
        .rect(18, 32, 28, 8, 0xFF_FF_00_00);
    c.finish()
}

fn ammo_pack() -> Result<Sprite, TextureError> {
    let mut c = Canvas::new();
    c.rect(16, 24, 32, 24, 0xFF_99_88_33)
        .rect(20, 20, 8, 8, 0xFF_CC_BB_44)
        .rect(32, 20, 8, 8, 0xFF_CC_BB_44);
    for i in 0..6 {
        c.rect(18 + i * 5, 26, 3, 12, 0xFF_AA_AA_AA);
    }
    c.finish()
}

/// Opaque magenta square shown for unknown sprite kinds.
pub fn placeholder() -> Sprite {
    Sprite::solid(8, 8, 0xFF_FF_00_FF)
}

/// Every demo sprite kind: `zombie` (6 frames), `health`, `ammo`.
pub fn build_sprites() -> Result<SpriteBank, TextureError> {
    let mut bank = SpriteBank::new(placeholder());
    bank.insert("zombie", (0..6).map(zombie).collect::<Result<Vec<_>, _>>()?)?;
    bank.insert("health", [health_pack()?])?;
    bank.insert("ammo", [ammo_pack()?])?;
    log::debug!("built {} procedural sprite kinds", bank.len() - 1);
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_are_bound() {
        let bank = build_textures().unwrap();
        assert_eq!(bank.wall(WALL_BRICK).name, "BRICK");
        assert_eq!(bank.wall(WALL_STONE).name, "STONE");
        // unbound material falls back to brick
        assert_eq!(bank.wall(9).name, "BRICK");
        assert!(bank.id("CONCRETE").is_some());
        assert!(bank.id("DARK").is_some());
    }

    #[test]
    fn sprites_have_alpha_holes() {
        let bank = build_sprites().unwrap();
        let zombie = bank.id("zombie").unwrap();
        assert_eq!(bank.frame_count(zombie), 6);
        let spr = bank.frame(zombie, 0);
        assert_eq!(spr.texel(0, 0).map(|c| c >> 24), Some(0));
        assert_eq!(spr.texel(30, 35).map(|c| c >> 24), Some(0xFF));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = build_textures().unwrap();
        let b = build_textures().unwrap();
        let id = a.id("STONE").unwrap();
        assert_eq!(a.texture(id), b.texture(id));
    }
}
