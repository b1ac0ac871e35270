//! Wavefront boundary tracing of a single region.
//!
//! Every cell of the region gets a [`Tile`] with four edge flags. Tiles are
//! visited in region order; an open tile seeds a FIFO wavefront. Evaluating
//! a tile walks each of its still-open sides in both directions along the
//! side (see [`walk`]), emits one merged segment per side, and enqueues the
//! cells at the two ends of the run. Each walk resolves the side on every
//! cell it crosses, so a boundary run is emitted exactly once and the trace
//! ends with every tile closed.
//!
//! Segments are `kurbo::Line`s in grid-cell units: cell `(x, y)` spans
//! `[x, x+1] x [y, y+1]`.

mod tile;
mod walk;

pub use tile::{Polarity, Side, Tile};

use std::collections::{HashMap, VecDeque};

use kurbo::Line;
use log::debug;

use crate::bitmap::Occupancy;
use crate::cell::{Cell, GridExtent};
use crate::region::Region;

/// Incremental tracer for one region.
///
/// [`BoundaryTracer::step`] evaluates one tile at a time so a host can show
/// progress; [`trace_boundary`] runs it to completion.
#[derive(Debug)]
pub struct BoundaryTracer<'a, O: ?Sized> {
    grid: &'a O,
    extent: GridExtent,
    tiles: Vec<Tile>,
    /// Cell key → tile slot.
    slot_of: HashMap<usize, usize>,
    queue: VecDeque<usize>,
    /// Tiles that have ever entered the queue.
    queued: Vec<bool>,
    /// Next tile in region order to consider as a wavefront seed.
    cursor: usize,
    segments: Vec<Line>,
}

impl<'a, O: Occupancy + ?Sized> BoundaryTracer<'a, O> {
    pub fn new(region: &Region, grid: &'a O) -> Self {
        let extent = grid.extent();
        let mut slot_of = HashMap::with_capacity(region.len());
        let tiles: Vec<Tile> = region
            .cells()
            .iter()
            .enumerate()
            .map(|(slot, &cell)| {
                slot_of.insert(extent.key(cell), slot);
                Tile::new(cell, grid)
            })
            .collect();
        let queued = vec![false; tiles.len()];
        BoundaryTracer {
            grid,
            extent,
            tiles,
            slot_of,
            queue: VecDeque::new(),
            queued,
            cursor: 0,
            segments: Vec::new(),
        }
    }

    /// Evaluate the next tile: the head of the wavefront, or else the next
    /// open tile in region order. Returns the evaluated cell, or `None` once
    /// every tile is closed.
    pub fn step(&mut self) -> Option<Cell> {
        if let Some(slot) = self.queue.pop_front() {
            self.evaluate(slot);
            return Some(self.tiles[slot].cell);
        }
        while self.cursor < self.tiles.len() {
            let slot = self.cursor;
            self.cursor += 1;
            if self.tiles[slot].is_closed() || self.queued[slot] {
                continue;
            }
            self.queued[slot] = true;
            self.evaluate(slot);
            return Some(self.tiles[slot].cell);
        }
        None
    }

    pub fn is_done(&self) -> bool {
        self.queue.is_empty() && self.tiles[self.cursor..].iter().all(Tile::is_closed)
    }

    /// Segments emitted so far, in discovery order.
    pub fn segments(&self) -> &[Line] {
        &self.segments
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Run to completion and return all segments.
    ///
    /// Panics if any tile is left open, which would mean a walk skipped a
    /// boundary side.
    pub fn finish(mut self) -> Vec<Line> {
        while self.step().is_some() {}
        if let Some(open) = self.tiles.iter().find(|t| !t.is_closed()) {
            panic!(
                "boundary trace finished with open cell ({}, {}): {:?}",
                open.cell.x, open.cell.y, open
            );
        }
        self.segments
    }

    fn evaluate(&mut self, slot: usize) {
        for side in Side::EVALUATION_ORDER {
            if !self.tiles[slot].is_useful(side) {
                continue;
            }
            let (heading_a, heading_b) = side.headings();
            let (start, end_a) = self.walk(slot, side, heading_a);
            self.discover(slot, end_a);
            let (end, end_b) = self.walk(slot, side, heading_b);
            self.discover(slot, end_b);
            self.segments.push(Line::new(start, end));
        }
    }

    /// Enqueue the tile at a run end, once, unless it is the origin or
    /// already closed.
    fn discover(&mut self, origin: usize, cell: Cell) {
        if cell == self.tiles[origin].cell {
            return;
        }
        let slot = self.slot(cell);
        if self.tiles[slot].is_closed() || self.queued[slot] {
            return;
        }
        self.queued[slot] = true;
        self.queue.push_back(slot);
    }

    fn slot(&self, cell: Cell) -> usize {
        let slot = if self.extent.contains(cell) {
            self.slot_of.get(&self.extent.key(cell)).copied()
        } else {
            None
        };
        match slot {
            Some(slot) => slot,
            None => panic!(
                "boundary walk reached cell ({}, {}) outside the traced region",
                cell.x, cell.y
            ),
        }
    }
}

/// Trace the full boundary of `region`, outer loop and holes alike.
///
/// Independent per region: only `grid` is shared, read-only.
pub fn trace_boundary<O: Occupancy + ?Sized>(region: &Region, grid: &O) -> Vec<Line> {
    let segments = BoundaryTracer::new(region, grid).finish();
    debug!(
        "traced region at {:?} ({} cells) into {} segments",
        region.first(),
        region.len(),
        segments.len()
    );
    segments
}
