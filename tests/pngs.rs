#![cfg(feature = "host")]
#![allow(missing_docs, reason = "integration test crate")]
//! Host-level tests for PNG previews of frames.

use core::error::Error;
use std::{fs::File, path::Path};

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use neopixel_matrix::{
    color,
    matrix::{Frame565, PixelSurface},
    text::{MatrixFont, render_text},
    to_png::write_frame_png,
};

fn decode(path: &Path) -> Result<(png::OutputInfo, Vec<u8>), Box<dyn Error>> {
    let decoder = png::Decoder::new(File::open(path)?);
    let mut reader = decoder.read_info()?;
    let mut buffer = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    buffer.truncate(info.buffer_size());
    Ok((info, buffer))
}

fn rgb_at(info: &png::OutputInfo, bytes: &[u8], x: u32, y: u32) -> [u8; 3] {
    let offset = (y * info.width + x) as usize * 3;
    [bytes[offset], bytes[offset + 1], bytes[offset + 2]]
}

#[test]
fn preview_has_one_disc_per_cell() -> Result<(), Box<dyn Error>> {
    let mut frame = Frame565::<32>::new(8, 4)?;
    frame.set(0, 0, color::RED);
    frame.set(7, 3, color::WHITE);

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("preview.png");
    let (width, height) = write_frame_png(&frame, &path, 10)?;
    assert_eq!((width, height), (80, 40));

    let (info, bytes) = decode(&path)?;
    assert_eq!((info.width, info.height), (80, 40));
    assert_eq!(info.color_type, png::ColorType::Rgb);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);

    // Cell centers carry the full expanded color; cell corners stay black.
    assert_eq!(rgb_at(&info, &bytes, 5, 5), [255, 0, 0]);
    assert_eq!(rgb_at(&info, &bytes, 75, 35), [255, 255, 255]);
    assert_eq!(rgb_at(&info, &bytes, 0, 0), [0, 0, 0]);
    assert_eq!(rgb_at(&info, &bytes, 15, 5), [0, 0, 0]);
    Ok(())
}

#[test]
fn preview_of_drawn_content() -> Result<(), Box<dyn Error>> {
    let mut frame = Frame565::<48>::new(12, 4)?;
    Rectangle::new(Point::zero(), Size::new(12, 4))
        .into_styled(PrimitiveStyle::with_stroke(Rgb565::BLUE, 1))
        .draw(&mut frame)?;
    render_text(
        &mut frame,
        MatrixFont::Font3x4Trim,
        "Hi",
        &[color::YELLOW, color::CYAN],
        Point::new(3, 0),
    )?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("drawn.png");
    write_frame_png(&frame, &path, 8)?;
    let (info, bytes) = decode(&path)?;
    assert_eq!((info.width, info.height), (96, 32));
    assert!(bytes.chunks_exact(3).any(|pixel| pixel == [0, 0, 255]));
    Ok(())
}

#[test]
fn tiny_cells_are_rejected() {
    let frame = Frame565::<4>::new(2, 2).expect("valid");
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(write_frame_png(&frame, dir.path().join("tiny.png"), 3).is_err());
}
