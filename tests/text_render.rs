#![cfg(feature = "host")]
#![allow(missing_docs, reason = "integration test crate")]
//! Host-level tests for text rendering into RGB565 frames.

use embedded_graphics::prelude::Point;
use neopixel_matrix::{
    color,
    matrix::{Frame565, PixelSurface},
    text::{MatrixFont, render_text, text_width},
};

fn lit_in_columns<const N: usize>(frame: &Frame565<N>, columns: core::ops::Range<usize>) -> Vec<u16> {
    let mut colors = Vec::new();
    for y in 0..frame.height() {
        for x in columns.clone() {
            let cell = frame.get(x, y);
            if cell != color::BLACK {
                colors.push(cell);
            }
        }
    }
    colors
}

#[test]
fn widths_follow_font_advance() {
    assert_eq!(text_width(MatrixFont::Font3x4Trim, "Hi"), 6);
    assert_eq!(text_width(MatrixFont::Font4x6, "Hi"), 8);
    assert_eq!(text_width(MatrixFont::Font3x5Trim, "Hi"), 6);
    assert_eq!(text_width(MatrixFont::Font3x4Trim, "ab\ncdef"), 6);
    assert_eq!(text_width(MatrixFont::Font5x7, ""), 0);
}

#[test]
fn trim_variants_reuse_the_larger_font() {
    assert_eq!(MatrixFont::Font4x6Trim.advance(), (4, 6));
    assert_eq!(MatrixFont::Font5x7.advance(), (5, 7));
    assert_eq!(
        MatrixFont::Font4x6Trim.to_font().character_size,
        MatrixFont::Font5x7.to_font().character_size
    );
}

#[test]
fn colors_cycle_per_character() {
    let mut frame = Frame565::<32>::new(8, 4).expect("valid");
    let Ok(()) = render_text(
        &mut frame,
        MatrixFont::Font3x4Trim,
        "AB",
        &[color::RED, color::GREEN],
        Point::zero(),
    );

    let first = lit_in_columns(&frame, 0..3);
    let second = lit_in_columns(&frame, 3..6);
    assert!(!first.is_empty() && first.iter().all(|&cell| cell == color::RED));
    assert!(!second.is_empty() && second.iter().all(|&cell| cell == color::GREEN));
    assert!(lit_in_columns(&frame, 6..8).is_empty());
}

#[test]
fn empty_palette_draws_white() {
    let mut frame = Frame565::<16>::new(4, 4).expect("valid");
    let Ok(()) = render_text(&mut frame, MatrixFont::Font3x4Trim, "H", &[], Point::zero());
    let lit = lit_in_columns(&frame, 0..4);
    assert!(!lit.is_empty() && lit.iter().all(|&cell| cell == color::WHITE));
}

#[test]
fn overflowing_characters_are_clipped_not_wrapped() {
    let mut frame = Frame565::<16>::new(4, 4).expect("valid");
    let Ok(()) = render_text(
        &mut frame,
        MatrixFont::Font3x4Trim,
        "HHH",
        &[color::RED, color::GREEN, color::BLUE],
        Point::zero(),
    );
    let everything = lit_in_columns(&frame, 0..4);
    assert!(everything.contains(&color::RED));
    assert!(!everything.contains(&color::BLUE));
}

#[test]
fn newline_starts_a_new_line() {
    let mut frame = Frame565::<32>::new(4, 8).expect("valid");
    let Ok(()) = render_text(
        &mut frame,
        MatrixFont::Font3x4Trim,
        "H\nH",
        &[color::RED, color::BLUE],
        Point::zero(),
    );
    let top: Vec<u16> = (0..4).flat_map(|y| (0..4).map(move |x| (x, y))).map(|(x, y)| frame.get(x, y)).collect();
    let bottom: Vec<u16> = (4..8).flat_map(|y| (0..4).map(move |x| (x, y))).map(|(x, y)| frame.get(x, y)).collect();
    assert!(top.contains(&color::RED) && !top.contains(&color::BLUE));
    assert!(bottom.contains(&color::BLUE) && !bottom.contains(&color::RED));
}

#[test]
fn origin_shifts_the_text() {
    let mut reference = Frame565::<64>::new(8, 8).expect("valid");
    let Ok(()) = render_text(&mut reference, MatrixFont::Font3x4Trim, "H", &[], Point::zero());

    let mut shifted = Frame565::<64>::new(8, 8).expect("valid");
    let Ok(()) = render_text(&mut shifted, MatrixFont::Font3x4Trim, "H", &[], Point::new(2, 3));

    for y in 0..4 {
        for x in 0..3 {
            assert_eq!(shifted.get(x + 2, y + 3), reference.get(x, y));
        }
    }
}

#[test]
fn text_starting_left_of_the_frame_is_partially_visible() {
    let mut frame = Frame565::<16>::new(4, 4).expect("valid");
    let Ok(()) = render_text(
        &mut frame,
        MatrixFont::Font3x4Trim,
        "HH",
        &[color::RED, color::GREEN],
        Point::new(-3, 0),
    );
    let lit = lit_in_columns(&frame, 0..4);
    assert!(lit.contains(&color::GREEN));
    assert!(!lit.contains(&color::RED));
}
