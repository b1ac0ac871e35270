//! Cell coordinates and grid extents.
//!
//! Cells are addressed by integer `(x, y)`. Inside a [`GridExtent`] every
//! cell also has a dense integer key, `x * height + y`, which is the order
//! the region scan visits cells in (x outer, y inner).

use kurbo::{Point, Vec2};

use crate::error::OutlineError;

/// A grid cell. Coordinates may be negative or past the extent while
/// probing neighbours; such cells are always free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Cell offset by an integral vector.
    ///
    /// Offsets come from unit directions scaled by whole step counts, so the
    /// components are always integers.
    pub fn offset(self, v: Vec2) -> Cell {
        debug_assert!(
            v.x.fract() == 0.0 && v.y.fract() == 0.0,
            "non-integral cell offset {:?}",
            v
        );
        Cell::new(self.x + v.x as i32, self.y + v.y as i32)
    }

    /// Lower-left corner of the cell in grid units.
    pub fn corner(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

/// Grid dimensions in cells. Both sides are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridExtent {
    width: u32,
    height: u32,
}

impl GridExtent {
    pub fn new(width: u32, height: u32) -> Result<Self, OutlineError> {
        if width == 0 || height == 0 {
            return Err(OutlineError::EmptyGrid { width, height });
        }
        Ok(GridExtent { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Encode a cell as `x * height + y`.
    ///
    /// Panics when the cell is outside the grid: callers only encode cells
    /// they have already bounds-checked.
    pub fn key(&self, cell: Cell) -> usize {
        assert!(
            self.contains(cell),
            "cannot encode cell ({}, {}) outside {}x{} grid",
            cell.x,
            cell.y,
            self.width,
            self.height
        );
        cell.x as usize * self.height as usize + cell.y as usize
    }

    /// Decode a key produced by [`GridExtent::key`].
    pub fn cell(&self, key: usize) -> Cell {
        assert!(
            key < self.len(),
            "cannot decode key {} outside {}x{} grid",
            key,
            self.width,
            self.height
        );
        let h = self.height as usize;
        Cell::new((key / h) as i32, (key % h) as i32)
    }

    /// All cells in scan order: x ascending, then y ascending.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w).flat_map(move |x| (0..h).map(move |y| Cell::new(x, y)))
    }
}
