use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use gridoutline::{
    outline, rasterize, GridExtent, ImageField, Occupancy, OutlineConfig, PerlinField,
    ThresholdMethod,
};

#[derive(Parser)]
#[command(
    name = "gridoutline",
    about = "Label occupied grid regions and trace their rectilinear outlines"
)]
struct Cli {
    /// Grayscale image used as the scalar field (PNG, JPEG, BMP).
    /// Without it a seeded noise field is generated.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Grid width in cells (noise field only)
    #[arg(long, default_value = "40")]
    width: u32,

    /// Grid height in cells (noise field only)
    #[arg(long, default_value = "30")]
    height: u32,

    /// Noise seed
    #[arg(short, long, default_value = "0")]
    seed: u32,

    /// Noise zoom: cells per noise unit (larger = bigger blobs)
    #[arg(long, default_value = "5.0")]
    zoom: f64,

    /// Occupancy threshold: cells whose field value is strictly greater are occupied
    #[arg(short, long, default_value = "0.6")]
    threshold: f64,

    /// Pick the threshold with Otsu's method instead of --threshold
    #[arg(long)]
    otsu: bool,

    /// Treat low field values as occupied
    #[arg(long)]
    invert: bool,

    /// Drop regions with fewer cells than this
    #[arg(long, default_value = "0")]
    min_cells: usize,

    /// Output units per cell for printed segments and the PNG preview
    #[arg(long, default_value = "50")]
    cell_size: f64,

    /// Write a PNG preview of regions and outlines
    #[arg(short, long)]
    render: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = OutlineConfig {
        width: cli.width,
        height: cli.height,
        threshold: if cli.otsu {
            ThresholdMethod::Otsu
        } else {
            ThresholdMethod::Fixed(cli.threshold)
        },
        invert: cli.invert,
        zoom: cli.zoom,
        seed: cli.seed,
        min_region_cells: cli.min_cells,
        cell_size: cli.cell_size,
    };

    eprintln!();
    let grid = match &cli.input {
        Some(path) => {
            let field = ImageField::open(path)?;
            let extent = field.extent()?;
            eprintln!(
                "  Field       {} ({}x{} px)",
                path.display(),
                extent.width(),
                extent.height()
            );
            rasterize(field, extent, &config)
        }
        None => {
            let extent = GridExtent::new(config.width, config.height)?;
            eprintln!(
                "  Field       noise seed={} zoom={}",
                config.seed, config.zoom
            );
            rasterize(PerlinField::new(config.seed, config.zoom), extent, &config)
        }
    };
    let extent = grid.extent();
    eprintln!(
        "  Grid        {}x{} cells, {} occupied",
        extent.width(),
        extent.height(),
        grid.count()
    );

    let result = outline(&grid, &config)?;
    eprintln!(
        "  Trace       {} regions \u{2192} {} segments",
        result.regions.len(),
        result.segment_count()
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (index, traced) in result.regions.iter().enumerate() {
        writeln!(
            out,
            "region {} cells={} segments={}",
            index,
            traced.region.len(),
            traced.segments.len()
        )?;
        for line in traced.scaled(config.cell_size) {
            writeln!(out, "  {} {} {} {}", line.p0.x, line.p0.y, line.p1.x, line.p1.y)?;
        }
    }
    out.flush()?;

    if let Some(path) = &cli.render {
        render_preview(&result, config.cell_size, path)?;
    }

    eprintln!();
    Ok(())
}

#[cfg(feature = "render")]
fn render_preview(
    result: &gridoutline::Outline,
    cell_size: f64,
    path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    gridoutline::render::write_png(result, cell_size, path)?;
    eprintln!("  Render      {}", path.display());
    Ok(())
}

#[cfg(not(feature = "render"))]
fn render_preview(
    _result: &gridoutline::Outline,
    _cell_size: f64,
    _path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    Err("built without the `render` feature".into())
}
