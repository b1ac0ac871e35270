//! Connected-region labeling of occupied cells (4-connectivity).
//!
//! Single scan, x ascending then y ascending. Each occupied cell only looks
//! at its two already-visited neighbours, left `(x-1, y)` and below
//! `(x, y-1)`, and joins, founds or merges sets accordingly. Merging goes
//! through a disjoint set, so no region handle is invalidated by a merge.

mod disjoint;

pub use disjoint::CellSets;

use log::debug;

use crate::bitmap::Occupancy;
use crate::cell::Cell;

/// A maximal 4-connected set of occupied cells.
///
/// Cells are listed in the order they joined the region during the scan:
/// when two regions merge, the absorbed region's cells follow the
/// survivor's. The first cell is always the earliest scanned one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    cells: Vec<Cell>,
    /// Same cells in scan order, for lookups.
    sorted: Vec<Cell>,
}

impl Region {
    /// Wrap cells in their join order.
    pub(crate) fn from_joined(cells: Vec<Cell>) -> Self {
        let mut sorted = cells.clone();
        sorted.sort_unstable();
        debug_assert!(sorted.windows(2).all(|w| w[0] < w[1]), "duplicate region cell");
        debug_assert_eq!(
            cells.first(),
            sorted.first(),
            "region does not start at its first scanned cell"
        );
        Region { cells, sorted }
    }

    /// Build a region from arbitrary cells, listed in scan order;
    /// duplicates are dropped.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut cells: Vec<Cell> = cells.into_iter().collect();
        cells.sort_unstable();
        cells.dedup();
        Region {
            sorted: cells.clone(),
            cells,
        }
    }

    /// Cells in join order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.sorted.binary_search(&cell).is_ok()
    }

    /// First cell in scan order.
    pub fn first(&self) -> Option<Cell> {
        self.cells.first().copied()
    }
}

/// Group every occupied cell of `grid` into disjoint 4-connected regions.
///
/// Regions are ordered by their first scanned cell; see [`Region::cells`]
/// for the order within a region.
pub fn build_regions<O: Occupancy + ?Sized>(grid: &O) -> Vec<Region> {
    let extent = grid.extent();
    let mut sets = CellSets::new(extent);
    let mut founded = 0usize;
    let mut merges = 0usize;

    for cell in extent.cells() {
        if !grid.is_occupied(cell) {
            continue;
        }
        let left = Cell::new(cell.x - 1, cell.y);
        let below = Cell::new(cell.x, cell.y - 1);
        let x_has = grid.is_occupied(left);
        let y_has = grid.is_occupied(below);

        sets.insert(cell);
        match (x_has, y_has) {
            (true, true) => {
                if sets.union(left, below) {
                    merges += 1;
                }
                sets.union(cell, left);
            }
            (true, false) => {
                sets.union(cell, left);
            }
            (false, true) => {
                sets.union(cell, below);
            }
            (false, false) => founded += 1,
        }
    }

    let occupied = sets.len();
    let regions: Vec<Region> = sets.into_groups().into_iter().map(Region::from_joined).collect();
    debug!(
        "labeled {} occupied cells into {} regions ({} founded, {} merges)",
        occupied,
        regions.len(),
        founded,
        merges
    );
    regions
}
