//! Grid classification: scalar field + threshold → occupied / free.

use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;
use log::debug;

use crate::cell::{Cell, GridExtent};
use crate::config::{OutlineConfig, ThresholdMethod};
use crate::field::{Inverted, ScalarField};

/// Read-only occupancy queries over a bounded grid.
///
/// Cells outside the extent are free, so the grid edge always acts as a
/// boundary.
pub trait Occupancy: Sync {
    fn extent(&self) -> GridExtent;
    fn is_occupied(&self, cell: Cell) -> bool;
}

/// Classifies cells by comparing a scalar field against a threshold.
///
/// A cell is occupied when `field(x, y) > threshold`. The field is only
/// sampled at in-bounds cells.
#[derive(Debug, Clone)]
pub struct Classifier<F> {
    field: F,
    threshold: f64,
    extent: GridExtent,
}

impl<F: ScalarField> Classifier<F> {
    pub fn new(field: F, threshold: f64, extent: GridExtent) -> Self {
        Classifier {
            field,
            threshold,
            extent,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl<F: ScalarField> Occupancy for Classifier<F> {
    fn extent(&self) -> GridExtent {
        self.extent
    }

    fn is_occupied(&self, cell: Cell) -> bool {
        self.extent.contains(cell) && self.field.sample(cell.x, cell.y) > self.threshold
    }
}

/// Cached occupancy, one flag per cell stored by cell key.
///
/// Sampling a field once up front keeps classification stable across the
/// many neighbour probes the region builder and tracer make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    data: Vec<bool>,
    extent: GridExtent,
}

impl Bitmap {
    /// All-free bitmap.
    pub fn new(extent: GridExtent) -> Self {
        Bitmap {
            data: vec![false; extent.len()],
            extent,
        }
    }

    /// Sample every in-bounds cell of `source` exactly once.
    pub fn from_occupancy<O: Occupancy + ?Sized>(source: &O) -> Self {
        let extent = source.extent();
        let data = extent.cells().map(|c| source.is_occupied(c)).collect();
        Bitmap { data, extent }
    }

    /// Build from a binary image (non-zero = occupied). Pixel rows are y.
    pub fn from_gray(img: &GrayImage) -> Option<Self> {
        let (w, h) = img.dimensions();
        let extent = GridExtent::new(w, h).ok()?;
        let data = extent
            .cells()
            .map(|c| img.get_pixel(c.x as u32, c.y as u32).0[0] > 0)
            .collect();
        Some(Bitmap { data, extent })
    }

    /// Build from ASCII art, one string per row, `#` occupied.
    ///
    /// Row index is y, so the first string is row 0.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut bitmap = Bitmap::new(GridExtent::new(width, height).ok()?);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    bitmap.set(Cell::new(x as i32, y as i32), true);
                }
            }
        }
        Some(bitmap)
    }

    /// Set one cell. Panics if the cell is outside the grid.
    pub fn set(&mut self, cell: Cell, occupied: bool) {
        let key = self.extent.key(cell);
        self.data[key] = occupied;
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// Occupied cells in scan order.
    pub fn occupied(&self) -> impl Iterator<Item = Cell> + '_ {
        self.extent.cells().filter(move |&c| self.is_occupied(c))
    }
}

impl Occupancy for Bitmap {
    fn extent(&self) -> GridExtent {
        self.extent
    }

    fn is_occupied(&self, cell: Cell) -> bool {
        self.extent.contains(cell) && self.data[self.extent.key(cell)]
    }
}

/// Turn a threshold method into a concrete field threshold.
///
/// Otsu runs on the field quantised to 8 bits over the whole extent, so
/// fields are expected to lie in `[0, 1]`.
pub fn resolve_threshold<F: ScalarField>(
    field: &F,
    extent: GridExtent,
    method: ThresholdMethod,
) -> f64 {
    match method {
        ThresholdMethod::Fixed(t) => t,
        ThresholdMethod::Otsu => {
            let img = GrayImage::from_fn(extent.width(), extent.height(), |x, y| {
                let v = field.sample(x as i32, y as i32).clamp(0.0, 1.0);
                Luma([(v * 255.0).round() as u8])
            });
            let level = otsu_level(&img);
            debug!("otsu threshold level {} over {}x{}", level, extent.width(), extent.height());
            level as f64 / 255.0
        }
    }
}

/// Classify `field` over `extent` into a cached bitmap, applying the
/// configured inversion and threshold method.
pub fn rasterize<F: ScalarField>(field: F, extent: GridExtent, config: &OutlineConfig) -> Bitmap {
    if config.invert {
        classify(Inverted(field), extent, config.threshold)
    } else {
        classify(field, extent, config.threshold)
    }
}

fn classify<F: ScalarField>(field: F, extent: GridExtent, method: ThresholdMethod) -> Bitmap {
    let threshold = resolve_threshold(&field, extent, method);
    let classifier = Classifier::new(field, threshold, extent);
    let bitmap = Bitmap::from_occupancy(&classifier);
    debug!(
        "classified {}x{} grid at threshold {:.3}: {} occupied",
        extent.width(),
        extent.height(),
        classifier.threshold(),
        bitmap.count()
    );
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_is_strictly_greater_than_threshold() {
        let extent = GridExtent::new(3, 1).unwrap();
        let field = |x: i32, _y: i32| x as f64 * 0.5;
        let classifier = Classifier::new(field, 0.5, extent);
        assert_eq!(classifier.threshold(), 0.5);
        assert!(!classifier.is_occupied(Cell::new(0, 0)));
        assert!(!classifier.is_occupied(Cell::new(1, 0)));
        assert!(classifier.is_occupied(Cell::new(2, 0)));
    }

    #[test]
    fn out_of_bounds_is_free() {
        let extent = GridExtent::new(2, 2).unwrap();
        let classifier = Classifier::new(|_x: i32, _y: i32| 1.0, 0.0, extent);
        assert!(classifier.is_occupied(Cell::new(1, 1)));
        for cell in [(-1, 0), (0, -1), (2, 0), (0, 2), (i32::MIN, i32::MAX)] {
            assert!(!classifier.is_occupied(cell.into()), "{:?} should be free", cell);
        }
    }

    #[test]
    fn field_is_only_sampled_in_bounds() {
        let extent = GridExtent::new(2, 2).unwrap();
        let field = |x: i32, y: i32| {
            assert!((0..2).contains(&x) && (0..2).contains(&y), "sampled ({}, {})", x, y);
            1.0
        };
        let classifier = Classifier::new(field, 0.5, extent);
        assert!(!classifier.is_occupied(Cell::new(-1, 1)));
        assert!(!classifier.is_occupied(Cell::new(1, 5)));
    }

    #[test]
    fn bitmap_caches_classification() {
        let extent = GridExtent::new(4, 3).unwrap();
        let classifier = Classifier::new(|x: i32, y: i32| ((x + y) % 2) as f64, 0.5, extent);
        let bitmap = Bitmap::from_occupancy(&classifier);
        for cell in extent.cells() {
            assert_eq!(bitmap.is_occupied(cell), classifier.is_occupied(cell));
            assert_eq!(bitmap.is_occupied(cell), bitmap.is_occupied(cell));
        }
        assert_eq!(bitmap.count(), 6);
    }

    #[test]
    fn rows_map_to_x_and_y() {
        let bitmap = Bitmap::from_rows(&["#..", "..#"]).unwrap();
        assert_eq!(bitmap.extent().width(), 3);
        assert_eq!(bitmap.extent().height(), 2);
        let cells: Vec<Cell> = bitmap.occupied().collect();
        assert_eq!(cells, vec![Cell::new(0, 0), Cell::new(2, 1)]);
    }

    #[test]
    fn gray_nonzero_is_occupied() {
        let mut img = GrayImage::new(2, 2);
        img.put_pixel(0, 1, Luma([1]));
        let bitmap = Bitmap::from_gray(&img).unwrap();
        assert!(bitmap.is_occupied(Cell::new(0, 1)));
        assert_eq!(bitmap.count(), 1);
    }

    #[test]
    fn fixed_threshold_passes_through() {
        let extent = GridExtent::new(2, 2).unwrap();
        let t = resolve_threshold(&|_x: i32, _y: i32| 0.0, extent, ThresholdMethod::Fixed(0.3));
        assert_eq!(t, 0.3);
    }

    #[test]
    fn rasterize_applies_inversion() {
        let extent = GridExtent::new(2, 1).unwrap();
        let field = |x: i32, _y: i32| if x == 0 { 0.2 } else { 0.8 };
        let config = OutlineConfig {
            threshold: ThresholdMethod::Fixed(0.5),
            ..OutlineConfig::default()
        };
        let plain = rasterize(field, extent, &config);
        assert!(!plain.is_occupied(Cell::new(0, 0)));
        assert!(plain.is_occupied(Cell::new(1, 0)));

        let inverted = rasterize(field, extent, &OutlineConfig { invert: true, ..config });
        assert!(inverted.is_occupied(Cell::new(0, 0)));
        assert!(!inverted.is_occupied(Cell::new(1, 0)));
    }

    #[test]
    fn otsu_separates_two_levels() {
        let extent = GridExtent::new(8, 8).unwrap();
        let field = |x: i32, _y: i32| if x < 4 { 0.1 } else { 0.9 };
        let t = resolve_threshold(&field, extent, ThresholdMethod::Otsu);
        assert!(t >= 0.1 && t < 0.9, "threshold {} should split the levels", t);
        let classifier = Classifier::new(field, t, extent);
        assert_eq!(classifier.threshold(), t);
        assert_eq!(Bitmap::from_occupancy(&classifier).count(), 32);
    }
}
