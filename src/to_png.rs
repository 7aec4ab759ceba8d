//! PNG previews of a pixel buffer drawn as round LEDs on a black board.
//!
//! Host only. Colors are widened from RGB565 with bit replication, so the
//! preview shows the buffer contents, not brightness or gamma.

use core::error::Error;
use std::{fs::File, io::BufWriter, path::Path};

use png::{BitDepth, ColorType, Encoder};

use crate::{color::expand565, matrix::PixelSurface};

/// Smallest cell that still leaves a visible disc.
pub const MIN_CELL_SIZE: u32 = 4;

/// Write `surface` to `output_path` with each cell `cell_size` pixels square.
///
/// Parent directories are created. Returns the PNG's `(width, height)`.
///
/// # Errors
///
/// Fails if `cell_size < MIN_CELL_SIZE` or on I/O and encoding errors.
pub fn write_frame_png<S: PixelSurface + ?Sized>(
    surface: &S,
    output_path: impl AsRef<Path>,
    cell_size: u32,
) -> Result<(u32, u32), Box<dyn Error>> {
    if cell_size < MIN_CELL_SIZE {
        return Err(format!("cell_size must be at least {MIN_CELL_SIZE} (got {cell_size})").into());
    }
    let output_path = output_path.as_ref();
    let (width, height, bytes) = render_discs(surface, cell_size);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&bytes)?;
    writer.finish()?;

    info!("wrote {}x{} preview", width, height);
    Ok((width, height))
}

/// RGB8 bytes for the whole board, row-major.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "preview sizes are small; intensities are clamped to [0, 1]"
)]
fn render_discs<S: PixelSurface + ?Sized>(surface: &S, cell_size: u32) -> (u32, u32, Vec<u8>) {
    let width = surface.width() as u32 * cell_size;
    let height = surface.height() as u32 * cell_size;
    let mut bytes = vec![0u8; (width * height * 3) as usize];

    let margin = (cell_size / 8).max(1);
    let radius = (cell_size - 2 * margin) as f32 / 2.0;
    let soft_edge = (radius / 3.0).max(1.0);
    let center = (cell_size as f32 - 1.0) / 2.0;

    for cell_y in 0..surface.height() {
        for cell_x in 0..surface.width() {
            let (red, green, blue) = expand565(surface.get(cell_x, cell_y));
            for local_y in 0..cell_size {
                for local_x in 0..cell_size {
                    let distance = (local_x as f32 - center).hypot(local_y as f32 - center);
                    // 1.0 inside the disc, fading to 0.0 across the soft edge
                    let intensity = ((radius - distance) / soft_edge).clamp(0.0, 1.0);
                    if intensity <= 0.0 {
                        continue;
                    }
                    let x = cell_x as u32 * cell_size + local_x;
                    let y = cell_y as u32 * cell_size + local_y;
                    let offset = ((y * width + x) * 3) as usize;
                    for (byte, channel) in bytes[offset..offset + 3].iter_mut().zip([red, green, blue]) {
                        *byte = (f32::from(channel) * intensity).round() as u8;
                    }
                }
            }
        }
    }
    (width, height, bytes)
}
