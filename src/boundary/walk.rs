//! Edge walks: collinear merging of one side along a run of cells.

use kurbo::{Point, Vec2};

use super::tile::{Polarity, Side};
use super::BoundaryTracer;
use crate::bitmap::Occupancy;
use crate::cell::Cell;
use crate::geom::VecExt;

/// Corner of the origin cell a walk starts measuring from.
///
/// Chosen so that `start + heading * steps` lands on the far corner of the
/// run, on the correct side of the cells.
///
///   heading │ Positive │ Negative
///   ────────┼──────────┼─────────
///   Right   │ (0, 1)   │ (0, 0)
///   Left    │ (1, 1)   │ (1, 0)
///   Up      │ (1, 0)   │ (0, 0)
///   Down    │ (1, 1)   │ (0, 1)
pub(crate) fn start_corner(heading: Side, polarity: Polarity) -> Vec2 {
    use Polarity::{Negative, Positive};
    let (x, y) = match (heading, polarity) {
        (Side::Right, Positive) => (0.0, 1.0),
        (Side::Right, Negative) => (0.0, 0.0),
        (Side::Left, Positive) => (1.0, 1.0),
        (Side::Left, Negative) => (1.0, 0.0),
        (Side::Up, Positive) => (1.0, 0.0),
        (Side::Up, Negative) => (0.0, 0.0),
        (Side::Down, Positive) => (1.0, 1.0),
        (Side::Down, Negative) => (0.0, 1.0),
    };
    Vec2::new(x, y)
}

impl<'a, O: Occupancy + ?Sized> BoundaryTracer<'a, O> {
    /// Walk `side` of the tile at `origin` in direction `heading`.
    ///
    /// Steps while the next cell is occupied and the cell just outside it
    /// is free, i.e. while the next cell carries the same boundary side.
    /// Every stepped cell, and the origin, has `side` resolved.
    ///
    /// Returns the far endpoint of the run and the last cell in it.
    pub(super) fn walk(&mut self, origin: usize, side: Side, heading: Side) -> (Point, Cell) {
        let origin_cell = self.tiles[origin].cell;
        let polarity = side.polarity();
        let step = heading.vec();
        let outward = step.flip_xy().abs() * polarity.sign();
        let start = origin_cell.corner() + start_corner(heading, polarity);

        let mut count = 1u32;
        loop {
            let next = origin_cell.offset(step * count as f64);
            if !self.grid.is_occupied(next) || self.grid.is_occupied(next.offset(outward)) {
                break;
            }
            let slot = self.slot(next);
            self.tiles[slot].resolve(side);
            count += 1;
        }
        self.tiles[origin].resolve(side);

        let end = start + step * count as f64;
        assert!(
            end.is_finite(),
            "walk from ({}, {}) along {:?} produced non-finite endpoint {:?}",
            origin_cell.x,
            origin_cell.y,
            side,
            end
        );
        (end, origin_cell.offset(step * (count - 1) as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_corners_span_a_single_cell() {
        // With no steps, the two walks along a side must cover exactly
        // that side of the unit cell at the origin.
        let expected = [
            (Side::Down, (0.0, 0.0), (1.0, 0.0)),
            (Side::Up, (0.0, 1.0), (1.0, 1.0)),
            (Side::Right, (1.0, 0.0), (1.0, 1.0)),
            (Side::Left, (0.0, 0.0), (0.0, 1.0)),
        ];
        for (side, a, b) in expected {
            let (ha, hb) = side.headings();
            let end_a = start_corner(ha, side.polarity()) + ha.vec();
            let end_b = start_corner(hb, side.polarity()) + hb.vec();
            assert_eq!((end_a.x, end_a.y), a, "{:?} heading {:?}", side, ha);
            assert_eq!((end_b.x, end_b.y), b, "{:?} heading {:?}", side, hb);
        }
    }
}
