//! Per-cell edge bookkeeping for the boundary tracer.

use kurbo::Vec2;

use crate::bitmap::Occupancy;
use crate::cell::Cell;

/// A cell side, also used as a direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Up,
    Down,
    Left,
    Right,
}

/// Which half-plane a side faces along its normal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Up or right.
    Positive,
    /// Down or left.
    Negative,
}

impl Polarity {
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Up, Side::Down, Side::Left, Side::Right];

    /// Order in which a tile's sides are evaluated.
    pub const EVALUATION_ORDER: [Side; 4] = [Side::Down, Side::Up, Side::Right, Side::Left];

    /// Unit vector pointing out of the cell through this side.
    pub fn vec(self) -> Vec2 {
        match self {
            Side::Up => Vec2::new(0.0, 1.0),
            Side::Down => Vec2::new(0.0, -1.0),
            Side::Left => Vec2::new(-1.0, 0.0),
            Side::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            Side::Up | Side::Right => Polarity::Positive,
            Side::Down | Side::Left => Polarity::Negative,
        }
    }

    /// The two headings walked along this side, in emission order.
    pub fn headings(self) -> (Side, Side) {
        match self {
            Side::Down | Side::Up => (Side::Left, Side::Right),
            Side::Right | Side::Left => (Side::Down, Side::Up),
        }
    }

    /// The cell across this side.
    pub fn neighbour(self, cell: Cell) -> Cell {
        cell.offset(self.vec())
    }
}

/// Edge flags of one cell: `true` while that side is still an unresolved
/// boundary candidate. Flags only ever go from `true` to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub cell: Cell,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Tile {
    /// Flags from world adjacency: a side is a candidate only when the cell
    /// across it is free or off the grid.
    pub fn new<O: Occupancy + ?Sized>(cell: Cell, grid: &O) -> Self {
        let free = |side: Side| !grid.is_occupied(side.neighbour(cell));
        Tile {
            cell,
            up: free(Side::Up),
            down: free(Side::Down),
            left: free(Side::Left),
            right: free(Side::Right),
        }
    }

    pub fn is_useful(&self, side: Side) -> bool {
        match side {
            Side::Up => self.up,
            Side::Down => self.down,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn resolve(&mut self, side: Side) {
        match side {
            Side::Up => self.up = false,
            Side::Down => self.down = false,
            Side::Left => self.left = false,
            Side::Right => self.right = false,
        }
    }

    /// Closed once every side is resolved.
    pub fn is_closed(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::geom::VecExt;

    #[test]
    fn initial_flags_follow_neighbours() {
        // (1, 1) has occupied neighbours left and above (row 2).
        let bitmap = Bitmap::from_rows(&["...", "##.", ".#."]).unwrap();
        let tile = Tile::new(Cell::new(1, 1), &bitmap);
        assert!(!tile.left);
        assert!(!tile.up);
        assert!(tile.down);
        assert!(tile.right);
        assert!(!tile.is_closed());
    }

    #[test]
    fn grid_edges_are_candidates() {
        let bitmap = Bitmap::from_rows(&["#"]).unwrap();
        let tile = Tile::new(Cell::new(0, 0), &bitmap);
        assert!(Side::ALL.iter().all(|&s| tile.is_useful(s)));
    }

    #[test]
    fn surrounded_cell_starts_closed() {
        let bitmap = Bitmap::from_rows(&[".#.", "###", ".#."]).unwrap();
        assert!(Tile::new(Cell::new(1, 1), &bitmap).is_closed());
    }

    #[test]
    fn resolving_all_sides_closes() {
        let bitmap = Bitmap::from_rows(&["#"]).unwrap();
        let mut tile = Tile::new(Cell::new(0, 0), &bitmap);
        for side in Side::EVALUATION_ORDER {
            assert!(!tile.is_closed());
            tile.resolve(side);
            assert!(!tile.is_useful(side));
        }
        assert!(tile.is_closed());
    }

    #[test]
    fn outward_normal_matches_side() {
        for side in Side::ALL {
            for heading in [side.headings().0, side.headings().1] {
                let outward = heading.vec().flip_xy().abs() * side.polarity().sign();
                assert_eq!(outward, side.vec(), "{:?} walking {:?}", side, heading);
            }
        }
    }
}
