use thiserror::Error;

/// Errors that can occur while classifying, outlining or rendering a grid.
///
/// Invariant violations inside the region builder and boundary tracer are
/// bugs, not errors; they panic instead of surfacing here.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OutlineError {
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("no occupied regions found in grid")]
    NoRegions,

    #[error("failed to render outline: {0}")]
    Render(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
