// Format-agnostic repositories of wall/flat textures and billboard sprites.
// Everything here is built once at startup and read-only afterwards; the
// renderer interacts through `TextureId` / `SpriteId` only.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::{renderer::Rgba, world::grid::Material};

/// Runtime handle for a texture in a [`TextureBank`].
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// Runtime handle for a sprite kind in a [`SpriteBank`].
pub type SpriteId = u16;

/// Placeholder sprite, always id 0.
pub const NO_SPRITE: SpriteId = 0;

/// Square, power-of-two texture in **0xAARRGGBB**, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    size: usize,
    mask: i32,
    pixels: Vec<Rgba>,
}

impl Texture {
    pub fn new<S: Into<String>>(name: S, size: usize, pixels: Vec<Rgba>) -> Result<Self, TextureError> {
        let name = name.into();
        if !size.is_power_of_two() || size > 1 << 15 {
            return Err(TextureError::NotPowerOfTwo { name, size });
        }
        if pixels.len() != size * size {
            return Err(TextureError::PixelCount {
                name,
                expected: size * size,
                found: pixels.len(),
            });
        }
        Ok(Self {
            name,
            size,
            mask: size as i32 - 1,
            pixels,
        })
    }

    /// Checkerboard of `a` / `b` with `cell`-pixel squares.
    pub fn checker(name: &str, size: usize, cell: usize, a: Rgba, b: Rgba) -> Self {
        let mut pixels = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                pixels.push(if ((x / cell) ^ (y / cell)) & 1 == 0 { a } else { b });
            }
        }
        Self {
            name: name.to_string(),
            size,
            mask: size as i32 - 1,
            pixels,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bitmask for wrapping integer coordinates (`size - 1`).
    #[inline]
    pub fn mask(&self) -> i32 {
        self.mask
    }

    /// Texel at `(u, v)`, both wrapped into the texture.
    #[inline(always)]
    pub fn sample(&self, u: i32, v: i32) -> Rgba {
        let u = (u & self.mask) as usize;
        let v = (v & self.mask) as usize;
        self.pixels[v * self.size + u]
    }
}

/// Convenience checkerboard 8×8 (magenta / black).
impl Default for Texture {
    fn default() -> Self {
        Texture::checker("CHECKER", 8, 1, 0xFF_FF_00_FF, 0xFF_00_00_00)
    }
}

/// Things that can go wrong when filling the banks.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    #[error("texture `{name}` has side {size}, expected a power of two")]
    NotPowerOfTwo { name: String, size: usize },

    #[error("`{name}` has {found} pixels, expected {expected}")]
    PixelCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{len} sprite pixels do not form rows of width {w}")]
    SpriteWidth { w: usize, len: usize },

    #[error("sprite `{0}` has no frames")]
    NoFrames(String),
}

/// A cache of wall and flat textures.
///
/// * Stores exactly one copy of every name.
/// * ID **0** is always the “missing” checkerboard.
/// * Wall materials are bound to ids separately, so one texture can serve
///   several material codes.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
    walls: Vec<TextureId>, // material code → id, NO_TEXTURE = unbound
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback.  The texture is inserted under the fixed name `"MISSING"`
    /// and obtains the handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
            walls: Vec::new(),
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored (including the “missing” one).
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    } // only checker

    /// Obtain the id for a *loaded* texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Fallback-safe query: unknown names resolve to the checkerboard id.
    pub fn id_or_missing(&self, name: &str) -> TextureId {
        self.id(name).unwrap_or(NO_TEXTURE)
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Infallible borrow: bad ids resolve to the checkerboard.
    #[inline]
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data.get(id as usize).unwrap_or(&self.data[NO_TEXTURE as usize])
    }

    /// Texture for wall material `code`.
    ///
    /// Unbound codes fall back to material 1, then to the checkerboard.
    #[inline]
    pub fn wall(&self, code: Material) -> &Texture {
        let bound = |c: usize| self.walls.get(c).copied().filter(|&id| id != NO_TEXTURE);
        let id = bound(code as usize).or_else(|| bound(1)).unwrap_or(NO_TEXTURE);
        self.texture_or_missing(id)
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Make wall material `code` render with texture `id`.
    pub fn bind_material(&mut self, code: Material, id: TextureId) -> Result<(), TextureError> {
        self.texture(id)?;
        let slot = code as usize;
        if self.walls.len() <= slot {
            self.walls.resize(slot + 1, NO_TEXTURE);
        }
        self.walls[slot] = id;
        Ok(())
    }
}

/*======================================================================*/
/*                                Sprites                               */
/*======================================================================*/

/// One animation frame: `w × h` pixels, 0xAARRGGBB with real alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub w: usize,
    pub h: usize,
    pixels: Vec<Rgba>,
}

impl Sprite {
    pub fn new(w: usize, pixels: Vec<Rgba>) -> Result<Self, TextureError> {
        if w == 0 || pixels.is_empty() || pixels.len() % w != 0 {
            return Err(TextureError::SpriteWidth {
                w,
                len: pixels.len(),
            });
        }
        let h = pixels.len() / w;
        Ok(Self { w, h, pixels })
    }

    /// `w × h` image of one colour.
    pub fn solid(w: usize, h: usize, colour: Rgba) -> Self {
        Self {
            w,
            h,
            pixels: vec![colour; w * h],
        }
    }

    /// Texel at `(x, y)`; `None` outside the image.
    #[inline(always)]
    pub fn texel(&self, x: i32, y: i32) -> Option<Rgba> {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return None;
        }
        Some(self.pixels[y as usize * self.w + x as usize])
    }
}

/// Frames of one sprite kind; most kinds have a handful.
type Frames = SmallVec<[Sprite; 8]>;

/// Sprite kinds by name, each an ordered list of animation frames.
///
/// ID **0** is the placeholder every failed lookup resolves to.
pub struct SpriteBank {
    by_name: HashMap<String, SpriteId>,
    kinds: Vec<Frames>,
}

impl SpriteBank {
    pub fn new(placeholder: Sprite) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("PLACEHOLDER".into(), NO_SPRITE);
        let mut frames = Frames::new();
        frames.push(placeholder);
        Self {
            by_name,
            kinds: vec![frames],
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.len() == 1
    }

    pub fn id(&self, name: &str) -> Option<SpriteId> {
        self.by_name.get(name).copied()
    }

    pub fn id_or_placeholder(&self, name: &str) -> SpriteId {
        self.id(name).unwrap_or(NO_SPRITE)
    }

    /// Number of frames for `id` (placeholder's count for unknown ids).
    pub fn frame_count(&self, id: SpriteId) -> usize {
        self.kinds
            .get(id as usize)
            .unwrap_or(&self.kinds[NO_SPRITE as usize])
            .len()
    }

    /// Frame `frame` of kind `id`.
    ///
    /// Unknown kinds give the placeholder; frames past the end clamp to
    /// the last one.
    pub fn frame(&self, id: SpriteId, frame: usize) -> &Sprite {
        let frames = self
            .kinds
            .get(id as usize)
            .unwrap_or(&self.kinds[NO_SPRITE as usize]);
        &frames[frame.min(frames.len() - 1)]
    }

    pub fn insert<S, I>(&mut self, name: S, frames: I) -> Result<SpriteId, TextureError>
    where
        S: Into<String>,
        I: IntoIterator<Item = Sprite>,
    {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let frames: Frames = frames.into_iter().collect();
        if frames.is_empty() {
            return Err(TextureError::NoFrames(name));
        }
        let id = self.kinds.len() as SpriteId;
        self.kinds.push(frames);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
