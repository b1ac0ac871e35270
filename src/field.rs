//! Scalar fields that drive occupancy.
//!
//! The core only ever calls [`ScalarField::sample`] at in-bounds lattice
//! points. Two concrete fields ship with the crate: seeded Perlin noise for
//! generated terrain and a grayscale image.

use std::fmt;
use std::path::Path;

use image::{GrayImage, ImageReader};
use noise::{NoiseFn, Perlin, ScalePoint};

use crate::cell::GridExtent;
use crate::error::OutlineError;

/// A deterministic scalar per grid coordinate.
pub trait ScalarField: Sync {
    fn sample(&self, x: i32, y: i32) -> f64;
}

impl<F> ScalarField for F
where
    F: Fn(i32, i32) -> f64 + Sync,
{
    fn sample(&self, x: i32, y: i32) -> f64 {
        self(x, y)
    }
}

/// Field adapter that flips a `[0, 1]` field, so low values become occupied.
#[derive(Debug, Clone)]
pub struct Inverted<F>(pub F);

impl<F: ScalarField> ScalarField for Inverted<F> {
    fn sample(&self, x: i32, y: i32) -> f64 {
        1.0 - self.0.sample(x, y)
    }
}

/// Seeded Perlin noise sampled at `(x / zoom, y / zoom)`.
///
/// Raw Perlin output is remapped from `[-1, 1]` to `[0, 1]`, so a zoom of 5
/// and a threshold of 0.6 give blobs a few cells across.
#[derive(Clone)]
pub struct PerlinField {
    noise: ScalePoint<Perlin>,
    seed: u32,
    zoom: f64,
}

impl PerlinField {
    pub fn new(seed: u32, zoom: f64) -> Self {
        let zoom = if zoom > 0.0 { zoom } else { 1.0 };
        let noise = ScalePoint::new(Perlin::new(seed)).set_scale(1.0 / zoom);
        PerlinField { noise, seed, zoom }
    }
}

impl fmt::Debug for PerlinField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerlinField")
            .field("seed", &self.seed)
            .field("zoom", &self.zoom)
            .finish()
    }
}

impl ScalarField for PerlinField {
    fn sample(&self, x: i32, y: i32) -> f64 {
        let v = self.noise.get([x as f64, y as f64]);
        ((v + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Grayscale image as a field: luma / 255, row index as y.
#[derive(Debug, Clone)]
pub struct ImageField {
    image: GrayImage,
}

impl ImageField {
    pub fn new(image: GrayImage) -> Self {
        ImageField { image }
    }

    /// Load any format the `image` crate decodes and convert to luma.
    pub fn open(path: &Path) -> Result<Self, OutlineError> {
        let image = ImageReader::open(path)
            .map_err(|e| OutlineError::ImageLoad(e.to_string()))?
            .decode()
            .map_err(|e| OutlineError::ImageLoad(e.to_string()))?
            .into_luma8();
        Ok(ImageField { image })
    }

    /// The grid covering every pixel of the image.
    pub fn extent(&self) -> Result<GridExtent, OutlineError> {
        let (w, h) = self.image.dimensions();
        GridExtent::new(w, h)
    }
}

impl ScalarField for ImageField {
    fn sample(&self, x: i32, y: i32) -> f64 {
        if x < 0 || y < 0 {
            return 0.0;
        }
        self.image
            .get_pixel_checked(x as u32, y as u32)
            .map_or(0.0, |p| p.0[0] as f64 / 255.0)
    }
}
