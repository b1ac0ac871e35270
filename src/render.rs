//! PNG preview of an outline.
//!
//! Region cells are filled with a per-region colour and the traced
//! segments are stroked on top, via tiny-skia. The image uses the grid's
//! orientation: pixel row grows with cell y.

use std::path::Path;

use crate::error::OutlineError;
use crate::Outline;

/// Segment stroke colour.
const LINE_COLOR: (u8, u8, u8) = (0xff, 0x71, 0x71);

/// Encode a pixmap to PNG bytes.
fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, OutlineError> {
    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| OutlineError::Render(e.to_string()))?;
    writer
        .write_image_data(pixmap.data())
        .map_err(|e| OutlineError::Render(e.to_string()))?;
    drop(writer);
    Ok(buf)
}

/// Fill colour for the `index`-th region: a walk around the hue wheel so
/// neighbouring indices stay distinguishable.
fn region_color(index: usize) -> tiny_skia::Color {
    let hue = (index as f32 * 0.618_034).fract() * 6.0;
    let x = 1.0 - ((hue % 2.0) - 1.0).abs();
    let (r, g, b) = match hue as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    // Pastel: blend halfway to white.
    tiny_skia::Color::from_rgba(0.5 + r * 0.4, 0.5 + g * 0.4, 0.5 + b * 0.4, 1.0)
        .unwrap_or(tiny_skia::Color::BLACK)
}

/// Render `outline` at `cell_size` pixels per cell and return PNG bytes.
pub fn render_png(outline: &Outline, cell_size: f64) -> Result<Vec<u8>, OutlineError> {
    let size = cell_size as f32;
    let width = (outline.extent.width() as f64 * cell_size).ceil() as u32;
    let height = (outline.extent.height() as f64 * cell_size).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        OutlineError::Render(format!("cannot allocate {}x{} pixmap", width, height))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    // ── Cells ──
    for (index, traced) in outline.regions.iter().enumerate() {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(region_color(index));
        for cell in traced.region.cells() {
            let rect =
                tiny_skia::Rect::from_xywh(cell.x as f32 * size, cell.y as f32 * size, size, size);
            if let Some(rect) = rect {
                pixmap.fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
            }
        }
    }

    // ── Segments ──
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(LINE_COLOR.0, LINE_COLOR.1, LINE_COLOR.2, 255);
    paint.anti_alias = true;
    let stroke = tiny_skia::Stroke {
        width: (size * 0.15).max(1.0),
        line_cap: tiny_skia::LineCap::Round,
        ..tiny_skia::Stroke::default()
    };
    let mut pb = tiny_skia::PathBuilder::new();
    for traced in &outline.regions {
        for line in traced.scaled(cell_size) {
            pb.move_to(line.p0.x as f32, line.p0.y as f32);
            pb.line_to(line.p1.x as f32, line.p1.y as f32);
        }
    }
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &stroke, tiny_skia::Transform::identity(), None);
    }

    encode_png(&pixmap)
}

/// Render `outline` and write the PNG to `path`.
pub fn write_png(outline: &Outline, cell_size: f64, path: &Path) -> Result<(), OutlineError> {
    let png_data = render_png(outline, cell_size)?;
    std::fs::write(path, png_data)?;
    Ok(())
}
