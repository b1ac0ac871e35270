//! gridoutline: occupancy grid → connected regions → rectilinear outlines.
//!
//! Labels the 4-connected occupied regions of a thresholded scalar field
//! and traces each region's boundary (outer loop and holes) into a minimal
//! set of axis-aligned segments, merging collinear cell edges.
//!
//! # Example
//!
//! ```
//! use gridoutline::{outline, Bitmap, OutlineConfig};
//!
//! let grid = Bitmap::from_rows(&["##.", ".#.", "..."]).unwrap();
//! let result = outline(&grid, &OutlineConfig::default())?;
//! assert_eq!(result.regions.len(), 1);
//! assert_eq!(result.regions[0].segments.len(), 6);
//! # Ok::<(), gridoutline::OutlineError>(())
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod cell;
mod config;
mod field;

pub mod boundary;
pub mod error;
pub mod geom;
pub mod region;

#[cfg(feature = "render")]
pub mod render;

// Re-export kurbo so downstream users get the same version used by
// the emitted segments (Vec<kurbo::Line>).
pub use kurbo;

pub use bitmap::{rasterize, resolve_threshold, Bitmap, Classifier, Occupancy};
pub use boundary::{trace_boundary, BoundaryTracer};
pub use cell::{Cell, GridExtent};
pub use config::{OutlineConfig, ThresholdMethod};
pub use error::OutlineError;
pub use field::{ImageField, Inverted, PerlinField, ScalarField};
pub use region::{build_regions, Region};

use std::time::Instant;

use kurbo::{Affine, Line};
use log::info;
use rayon::prelude::*;

/// One region and its traced boundary.
#[derive(Debug, Clone)]
pub struct RegionOutline {
    pub region: Region,
    /// Boundary segments in grid-cell units, in wavefront discovery order.
    pub segments: Vec<Line>,
}

impl RegionOutline {
    /// Segments scaled from cell units to output units.
    pub fn scaled(&self, cell_size: f64) -> impl Iterator<Item = Line> + '_ {
        let transform = Affine::scale(cell_size);
        self.segments.iter().map(move |&line| transform * line)
    }
}

/// The result of outlining a grid.
#[derive(Debug, Clone)]
pub struct Outline {
    pub extent: GridExtent,
    /// Regions ordered by their first cell in scan order.
    pub regions: Vec<RegionOutline>,
}

impl Outline {
    pub fn cell_count(&self) -> usize {
        self.regions.iter().map(|r| r.region.len()).sum()
    }

    pub fn segment_count(&self) -> usize {
        self.regions.iter().map(|r| r.segments.len()).sum()
    }
}

/// Full pipeline: occupancy grid → regions → boundary segments.
///
/// Regions smaller than `config.min_region_cells` are dropped before
/// tracing. Regions are traced in parallel; output order is region order
/// regardless of scheduling.
pub fn outline<O: Occupancy + ?Sized>(
    grid: &O,
    config: &OutlineConfig,
) -> Result<Outline, OutlineError> {
    let t_start = Instant::now();
    let extent = grid.extent();

    let mut regions = build_regions(grid);
    let labeled = regions.len();
    regions.retain(|r| r.len() >= config.min_region_cells);
    if regions.is_empty() {
        return Err(OutlineError::NoRegions);
    }
    info!(
        "labeled {} regions in {}x{} grid, kept {} with at least {} cells",
        labeled,
        extent.width(),
        extent.height(),
        regions.len(),
        config.min_region_cells
    );

    let regions: Vec<RegionOutline> = regions
        .into_par_iter()
        .map(|region| {
            let segments = trace_boundary(&region, grid);
            RegionOutline { region, segments }
        })
        .collect();

    let result = Outline { extent, regions };
    info!(
        "traced {} segments for {} cells ({}ms)",
        result.segment_count(),
        result.cell_count(),
        t_start.elapsed().as_millis()
    );
    Ok(result)
}
