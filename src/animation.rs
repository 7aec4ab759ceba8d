//! Blocking animation helpers built on draw, scroll, and refresh.
//!
//! Pacing goes through [`DelayNs`], so the same code runs against a HAL timer
//! on hardware and a recording fake in tests. Each helper refreshes after
//! every step and then waits `step` before the next one.

use embassy_time::Duration;
use embedded_graphics::prelude::Point;
use embedded_hal::delay::DelayNs;

use crate::{
    Result, color,
    image::ImageRecord,
    matrix::{NeopixelMatrix, ScrollMode},
    text::{self, MatrixFont},
    transport::Transport,
};

/// One scroll applied per frame by [`scroll_steps`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollStep {
    /// Columns to shift per frame (positive is right).
    pub dx: i32,
    /// Rows to shift per frame (positive is down).
    pub dy: i32,
    /// Fill for exposed cells in [`ScrollMode::Clip`].
    pub clear: u16,
    /// Clip or wrap.
    pub mode: ScrollMode,
}

/// Outcome of [`play_images`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackSummary {
    /// Frames drawn and refreshed.
    pub shown: usize,
    /// Frames rejected by validation.
    pub skipped: usize,
}

fn pause<D: DelayNs>(delay: &mut D, step: Duration) {
    delay.delay_us(u32::try_from(step.as_micros()).unwrap_or(u32::MAX));
}

/// Light the cells one at a time in row-major order, refreshing after each,
/// then clear the matrix and refresh once more.
///
/// # Errors
///
/// Stops at the first transport failure.
pub fn color_wipe<T, D, const N: usize>(
    matrix: &mut NeopixelMatrix<T, N>,
    color: u16,
    delay: &mut D,
    step: Duration,
) -> Result<()>
where
    T: Transport,
    D: DelayNs,
{
    matrix.fill(color::BLACK);
    for y in 0..matrix.height() {
        for x in 0..matrix.width() {
            matrix.set_pixel(x, y, color)?;
            matrix.show()?;
            pause(delay, step);
        }
    }
    matrix.fill(color::BLACK);
    matrix.show()
}

/// Apply `scroll` `steps` times, refreshing after each.
///
/// # Errors
///
/// Returns [`ConfigError::DiagonalScroll`](crate::ConfigError::DiagonalScroll)
/// before any frame if both offsets are non-zero, or the first transport failure.
pub fn scroll_steps<T, D, const N: usize>(
    matrix: &mut NeopixelMatrix<T, N>,
    scroll: ScrollStep,
    steps: usize,
    delay: &mut D,
    step: Duration,
) -> Result<()>
where
    T: Transport,
    D: DelayNs,
{
    for _ in 0..steps {
        matrix.scroll(scroll.dx, scroll.dy, scroll.clear, scroll.mode)?;
        matrix.show()?;
        pause(delay, step);
    }
    Ok(())
}

/// Scroll one line of text in from the right edge until it has left the
/// left edge, then leave the matrix cleared.
///
/// The first frame shows the text's first column at the right edge; the last
/// shows its final column at the left edge. A final blank frame follows, so
/// there are `width + text_width` refreshes in total.
///
/// # Errors
///
/// Stops at the first transport failure.
pub fn marquee<T, D, const N: usize>(
    matrix: &mut NeopixelMatrix<T, N>,
    font: MatrixFont,
    line: &str,
    colors: &[u16],
    delay: &mut D,
    step: Duration,
) -> Result<()>
where
    T: Transport,
    D: DelayNs,
{
    let width = i32::try_from(matrix.width()).unwrap_or(i32::MAX);
    let text_width = i32::try_from(text::text_width(font, line)).unwrap_or(i32::MAX);
    for x in (1 - text_width..width).rev() {
        matrix.fill(color::BLACK);
        matrix.draw_text(font, line, colors, Point::new(x, 0));
        matrix.show()?;
        pause(delay, step);
    }
    matrix.fill(color::BLACK);
    matrix.show()
}

/// Show each image in turn at `offset` on a black background.
///
/// A record that fails validation is skipped with a warning and counted; the
/// rest still play. A transport failure ends playback.
///
/// # Errors
///
/// Returns the first transport failure.
pub fn play_images<'a, T, D, I, const N: usize, const MAX: usize>(
    matrix: &mut NeopixelMatrix<T, N>,
    images: I,
    offset: Point,
    delay: &mut D,
    step: Duration,
) -> Result<PlaybackSummary>
where
    T: Transport,
    D: DelayNs,
    I: IntoIterator<Item = &'a ImageRecord<MAX>>,
{
    let mut summary = PlaybackSummary::default();
    for (index, record) in images.into_iter().enumerate() {
        let view = match record.validate(matrix.width()) {
            Ok(view) => view,
            Err(err) => {
                warn!("skipping image {}: {:?}", index, err);
                summary.skipped += 1;
                continue;
            }
        };
        let frame = matrix.frame_mut();
        frame.fill(color::BLACK);
        crate::image::draw_image(frame, &view, offset.x, offset.y);
        matrix.show()?;
        summary.shown += 1;
        pause(delay, step);
    }
    debug!("played {} images, skipped {}", summary.shown, summary.skipped);
    Ok(summary)
}
