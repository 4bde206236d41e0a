mod camera;
mod grid;
pub mod procedural;
mod texture;

pub use camera::Camera;

pub use grid::{CellSource, EMPTY, GridMap, MapError, Material, SOLID};

pub use texture::{
    NO_SPRITE, NO_TEXTURE, Sprite, SpriteBank, SpriteId, Texture, TextureBank, TextureError,
    TextureId,
};
