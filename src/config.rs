/// All outlining parameters in one struct.
///
/// The core algorithms only need an occupancy grid; the remaining knobs
/// describe how the CLI builds that grid and how results are scaled.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    // -- Grid stage --
    /// Grid width in cells, used for generated fields.
    /// Image inputs take their dimensions from the image.
    pub width: u32,
    /// Grid height in cells, used for generated fields.
    pub height: u32,
    /// How the occupancy threshold is chosen.
    pub threshold: ThresholdMethod,
    /// If true, classify low field values as occupied instead of high ones.
    pub invert: bool,

    // -- Noise field --
    /// Cells per noise unit. Larger = bigger blobs.
    pub zoom: f64,
    /// Seed for the noise field.
    pub seed: u32,

    // -- Region stage --
    /// Regions with fewer cells than this are dropped before tracing.
    /// 0 and 1 both keep every region.
    pub min_region_cells: usize,

    // -- Output --
    /// Size of one cell in output units. Segments are traced in cell units
    /// and only multiplied by this when printed or rendered.
    pub cell_size: f64,
}

/// Threshold method for turning a scalar field into occupancy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdMethod {
    /// Cells whose field value is strictly greater are occupied.
    Fixed(f64),
    /// Otsu's method over the sampled field (automatic).
    Otsu,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            threshold: ThresholdMethod::Fixed(0.6),
            invert: false,
            zoom: 5.0,
            seed: 0,
            min_region_cells: 0,
            cell_size: 50.0,
        }
    }
}
