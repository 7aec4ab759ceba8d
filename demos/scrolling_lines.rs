//! Blue line falls, red line circles: a 4x4 matrix animation previewed as PNGs.
//!
//! Runs on the host. Each line position is saved as `target/scrolling_lines/NN.png`.

use core::error::Error;
use std::{
    path::{Path, PathBuf},
    thread,
    time::Duration as StdDuration,
};

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use neopixel_matrix::{
    animation::{ScrollStep, color_wipe, scroll_steps},
    color,
    matrix::{MatrixConfig, NeopixelMatrix, ScrollMode},
    to_png::write_frame_png,
    transport::{Transport, TransportError, Triple},
};

/// Counts refreshes; `save` turns each one into a preview file.
struct PngPreview {
    slots: [Triple; 16],
    frame_count: usize,
}

impl Transport for PngPreview {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn set_slot(&mut self, index: usize, triple: Triple) {
        self.slots[index] = triple;
    }

    fn transmit(&mut self) -> Result<(), TransportError> {
        self.frame_count += 1;
        Ok(())
    }
}

struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(StdDuration::from_nanos(u64::from(ns)));
    }
}

fn save(matrix: &NeopixelMatrix<PngPreview, 16>, dir: &Path) -> Result<(), Box<dyn Error>> {
    let path = dir.join(format!("{:02}.png", matrix.transport().frame_count));
    write_frame_png(matrix.frame(), path, 32)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let dir = PathBuf::from("target").join("scrolling_lines");
    let config = MatrixConfig::new(4, 4).with_flip_v(true);
    let transport = PngPreview {
        slots: [[0; 3]; 16],
        frame_count: 0,
    };
    let mut matrix = NeopixelMatrix::<_, 16>::new(config, transport)?;
    let mut delay = ThreadDelay;

    color_wipe(&mut matrix, color::MAGENTA, &mut delay, Duration::from_millis(50))?;

    // Blue line at the top falls three rows, leaving green behind it.
    matrix.fill(color::BLACK);
    for x in 0..matrix.width() {
        matrix.set_pixel(x, 0, color::BLUE)?;
    }
    matrix.show()?;
    save(&matrix, &dir)?;
    for _ in 0..3 {
        let fall = ScrollStep {
            dx: 0,
            dy: 1,
            clear: color::GREEN,
            mode: ScrollMode::Clip,
        };
        scroll_steps(&mut matrix, fall, 1, &mut delay, Duration::from_millis(300))?;
        save(&matrix, &dir)?;
    }

    // Red column on cyan wraps around twice.
    matrix.fill(color::CYAN);
    for y in 0..matrix.height() {
        matrix.set_pixel(0, y, color::RED)?;
    }
    matrix.show()?;
    save(&matrix, &dir)?;
    for _ in 0..8 {
        let circle = ScrollStep {
            dx: 1,
            dy: 0,
            clear: color::BLACK,
            mode: ScrollMode::Wrap,
        };
        scroll_steps(&mut matrix, circle, 1, &mut delay, Duration::from_millis(200))?;
        save(&matrix, &dir)?;
    }

    matrix.fill(color::BLACK);
    matrix.show()?;
    println!("{} refreshes, previews in {}", matrix.transport().frame_count, dir.display());
    Ok(())
}
