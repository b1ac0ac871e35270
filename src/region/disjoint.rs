//! Disjoint sets of grid cells.
//!
//! Cells live in an arena in insertion order; a dense key→slot table maps
//! a cell to its arena slot, and each slot stores a parent slot. Roots are
//! always the lowest slot in their set, so the set created first survives a
//! union and groups come out in creation order.
//!
//! Each root also owns its member list. A union appends the absorbed set's
//! members after the survivor's, so a group lists its cells in the order
//! they joined.

use crate::cell::{Cell, GridExtent};

#[derive(Debug, Clone)]
pub struct CellSets {
    extent: GridExtent,
    slot_of: Vec<Option<usize>>,
    cells: Vec<Cell>,
    parent: Vec<usize>,
    /// Member slots per root, in join order. Empty for non-roots.
    members: Vec<Vec<usize>>,
}

impl CellSets {
    pub fn new(extent: GridExtent) -> Self {
        CellSets {
            extent,
            slot_of: vec![None; extent.len()],
            cells: Vec::new(),
            parent: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Register `cell` as a singleton set. Registering twice is a no-op.
    pub fn insert(&mut self, cell: Cell) {
        let key = self.extent.key(cell);
        if self.slot_of[key].is_some() {
            return;
        }
        let slot = self.cells.len();
        self.slot_of[key] = Some(slot);
        self.cells.push(cell);
        self.parent.push(slot);
        self.members.push(vec![slot]);
    }

    /// Number of registered cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Representative cell of the set containing `cell`, if registered.
    pub fn find(&mut self, cell: Cell) -> Option<Cell> {
        if !self.extent.contains(cell) {
            return None;
        }
        let slot = self.slot_of[self.extent.key(cell)]?;
        let root = self.root(slot);
        Some(self.cells[root])
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `true` if the sets were different and got merged. Panics if
    /// either cell was never registered.
    pub fn union(&mut self, a: Cell, b: Cell) -> bool {
        let ra = self.root(self.slot(a));
        let rb = self.root(self.slot(b));
        if ra == rb {
            return false;
        }
        let (keep, merged) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[merged] = keep;
        let moved = std::mem::take(&mut self.members[merged]);
        self.members[keep].extend(moved);
        true
    }

    /// All sets, ordered by their first registered cell, each listing its
    /// cells in join order.
    pub fn into_groups(self) -> Vec<Vec<Cell>> {
        let CellSets {
            cells,
            parent,
            members,
            ..
        } = self;
        members
            .into_iter()
            .enumerate()
            .filter(|&(slot, _)| parent[slot] == slot)
            .map(|(_, slots)| slots.into_iter().map(|s| cells[s]).collect())
            .collect()
    }

    fn slot(&self, cell: Cell) -> usize {
        let slot = if self.extent.contains(cell) {
            self.slot_of[self.extent.key(cell)]
        } else {
            None
        };
        match slot {
            Some(slot) => slot,
            None => panic!("cell ({}, {}) was never registered", cell.x, cell.y),
        }
    }

    /// Root slot, halving the path on the way up.
    fn root(&mut self, mut slot: usize) -> usize {
        while self.parent[slot] != slot {
            let grandparent = self.parent[self.parent[slot]];
            self.parent[slot] = grandparent;
            slot = grandparent;
        }
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(cells: &[(i32, i32)]) -> CellSets {
        let mut sets = CellSets::new(GridExtent::new(10, 10).unwrap());
        for &c in cells {
            sets.insert(c.into());
        }
        sets
    }

    #[test]
    fn singletons_are_their_own_representative() {
        let mut s = sets(&[(0, 0), (3, 4)]);
        assert_eq!(s.find(Cell::new(3, 4)), Some(Cell::new(3, 4)));
        assert_eq!(s.find(Cell::new(5, 5)), None);
        assert_eq!(s.find(Cell::new(-1, 5)), None);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn union_keeps_earliest_representative() {
        let mut s = sets(&[(0, 0), (1, 0), (2, 0)]);
        assert!(s.union(Cell::new(2, 0), Cell::new(1, 0)));
        assert_eq!(s.find(Cell::new(2, 0)), Some(Cell::new(1, 0)));
        assert!(s.union(Cell::new(2, 0), Cell::new(0, 0)));
        for x in 0..3 {
            assert_eq!(s.find(Cell::new(x, 0)), Some(Cell::new(0, 0)));
        }
    }

    #[test]
    fn union_of_same_set_reports_no_merge() {
        let mut s = sets(&[(0, 0), (0, 1)]);
        assert!(s.union(Cell::new(0, 0), Cell::new(0, 1)));
        assert!(!s.union(Cell::new(0, 1), Cell::new(0, 0)));
        assert_eq!(s.find(Cell::new(0, 1)), Some(Cell::new(0, 0)));
        assert_eq!(s.into_groups().len(), 1);
    }

    #[test]
    fn groups_follow_registration_order() {
        let mut s = sets(&[(0, 0), (4, 4), (0, 1), (4, 5), (9, 9)]);
        s.union(Cell::new(4, 5), Cell::new(4, 4));
        s.union(Cell::new(0, 1), Cell::new(0, 0));
        let groups = s.into_groups();
        assert_eq!(
            groups,
            vec![
                vec![Cell::new(0, 0), Cell::new(0, 1)],
                vec![Cell::new(4, 4), Cell::new(4, 5)],
                vec![Cell::new(9, 9)],
            ]
        );
    }

    #[test]
    fn merged_members_follow_survivor_members() {
        // Slots: a=0, b=1, c=2, d=3, e=4.
        let (a, b, c, d, e) = (
            Cell::new(0, 0),
            Cell::new(5, 0),
            Cell::new(0, 1),
            Cell::new(5, 1),
            Cell::new(1, 1),
        );
        let mut s = sets(&[(0, 0), (5, 0), (0, 1), (5, 1), (1, 1)]);
        s.union(c, a);
        s.union(d, b);
        s.union(b, a);
        s.union(e, a);
        assert_eq!(s.into_groups(), vec![vec![a, c, b, d, e]]);
    }

    #[test]
    fn long_chain_halves_paths() {
        let cells: Vec<(i32, i32)> = (0..10).map(|x| (x, 0)).collect();
        let mut s = sets(&cells);
        for x in (1..10).rev() {
            s.union(Cell::new(x, 0), Cell::new(x - 1, 0));
        }
        assert_eq!(s.find(Cell::new(9, 0)), Some(Cell::new(0, 0)));
        for x in 0..10 {
            assert_eq!(s.find(Cell::new(x, 0)), Some(Cell::new(0, 0)));
        }
        assert!(s.parent.iter().all(|&p| p == 0 || s.parent[p] == 0));
    }

    #[test]
    #[should_panic(expected = "never registered")]
    fn union_with_unregistered_cell_panics() {
        let mut s = sets(&[(0, 0)]);
        s.union(Cell::new(0, 0), Cell::new(1, 1));
    }
}
