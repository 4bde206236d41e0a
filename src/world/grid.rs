//! Uniform grid map: one material code per unit cell.
//!
//! The renderer only ever talks to [`CellSource`]; [`GridMap`] is the
//! in-memory implementation the viewer and the tests use.

/// Material code of one grid cell. `0` is passable, anything else a wall.
pub type Material = u16;

pub const EMPTY: Material = 0;

/// Returned for every coordinate outside the map.
pub const SOLID: Material = 1;

/// Read-only map query consumed by the renderer.
pub trait CellSource {
    /// Material at integer cell `(x, y)`; out-of-range must return a
    /// non-zero (solid) code.
    fn cell(&self, x: i32, y: i32) -> Material;

    #[inline]
    fn is_solid(&self, x: f32, y: f32) -> bool {
        self.cell(x.floor() as i32, y.floor() as i32) != EMPTY
    }
}

/// Things that can go wrong when building a map from text rows.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell glyph `{glyph}` at ({x}, {y})")]
    BadGlyph { glyph: char, x: usize, y: usize },
}

/// Row-major grid, immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<Material>,
}

impl GridMap {
    /// Parse ASCII rows: `.`, ` ` and `0` are empty, `1`..=`9` are materials.
    /// Row 0 is `y = 0`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let width = rows.first().ok_or(MapError::Empty)?.as_ref().chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let code = match glyph {
                    '.' | ' ' => EMPTY,
                    '0'..='9' => (glyph as u32 - '0' as u32) as Material,
                    _ => return Err(MapError::BadGlyph { glyph, x, y }),
                };
                cells.push(code);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
}

impl CellSource for GridMap {
    #[inline]
    fn cell(&self, x: i32, y: i32) -> Material {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return SOLID;
        }
        self.cells[y as usize * self.width + x as usize]
    }
}
