//! The RGB565 pixel buffer and the capability the core needs from it.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{IntoStorage, Rgb565, raw::RawU16},
    prelude::*,
};

use crate::error::ConfigError;

/// A rectangular buffer of packed RGB565 colors addressed by `(x, y)`.
///
/// Refresh, scrolling, image drawing, and text rendering only go through this
/// trait, so any buffer can stand in for [`Frame565`].
pub trait PixelSurface {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Packed color at `(x, y)`. Callers keep `x < width()` and `y < height()`.
    fn get(&self, x: usize, y: usize) -> u16;

    /// Store a packed color at `(x, y)`. Callers keep `x < width()` and `y < height()`.
    fn set(&mut self, x: usize, y: usize, color: u16);

    /// The cell at a signed coordinate, or `None` if it lies outside the buffer.
    fn locate(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let column = usize::try_from(x).ok().filter(|&column| column < self.width())?;
        let row = usize::try_from(y).ok().filter(|&row| row < self.height())?;
        Some((column, row))
    }
}

/// What happens to content pushed past an edge by a scroll.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollMode {
    /// Content leaving one edge is discarded; the exposed cells take the clear color.
    #[default]
    Clip,
    /// Content leaving one edge reappears at the opposite edge.
    Wrap,
}

/// A `width × height` RGB565 frame stored row-major in a fixed `[u16; N]`.
///
/// Implements [`DrawTarget`] with [`Rgb565`], so
/// [`embedded-graphics`](https://docs.rs/embedded-graphics) primitives draw
/// straight into it (clipped to the frame).
///
/// ```rust
/// use embedded_graphics::{
///     pixelcolor::Rgb565,
///     prelude::*,
///     primitives::{Line, PrimitiveStyle},
/// };
/// use neopixel_matrix::{color, matrix::{Frame565, PixelSurface}};
///
/// let mut frame = Frame565::<16>::new(4, 4)?;
/// Line::new(Point::new(0, 0), Point::new(3, 3))
///     .into_styled(PrimitiveStyle::with_stroke(Rgb565::RED, 1))
///     .draw(&mut frame)
///     .expect("drawing into a frame is infallible");
/// assert_eq!(frame.get(2, 2), color::RED);
/// assert_eq!(frame.get(2, 1), color::BLACK);
/// # Ok::<(), neopixel_matrix::ConfigError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame565<const N: usize> {
    width: usize,
    height: usize,
    pixels: [u16; N],
}

impl<const N: usize> Frame565<N> {
    /// A black frame.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDimension`] if either side is zero, or
    /// [`ConfigError::CapacityExceeded`] if `width * height > N`.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        let needed = width.checked_mul(height).unwrap_or(usize::MAX);
        if needed > N {
            return Err(ConfigError::CapacityExceeded {
                needed,
                capacity: N,
            });
        }
        Ok(Self {
            width,
            height,
            pixels: [0; N],
        })
    }

    /// Number of cells in use (`width * height`).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always `false`; a frame has at least one cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The cells in use, row-major.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.pixels[..self.len()]
    }

    /// Mutable access to the cells in use, row-major.
    pub fn as_mut_slice(&mut self) -> &mut [u16] {
        let len = self.len();
        &mut self.pixels[..len]
    }

    /// Packed color at `(x, y)`, or `None` outside the frame.
    #[must_use]
    pub fn try_get(&self, x: usize, y: usize) -> Option<u16> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Set every cell to `color`.
    pub fn fill(&mut self, color: u16) {
        self.as_mut_slice().fill(color);
    }

    /// Shift the contents by `(dx, dy)`.
    ///
    /// Positive `dx` moves content right, positive `dy` moves it down. In
    /// [`ScrollMode::Clip`] every exposed column or row becomes `clear`; a shift
    /// at least as large as the frame clears everything. In [`ScrollMode::Wrap`]
    /// each destination pulls from `(x − dx) mod width` (or the `y` equivalent)
    /// of a snapshot taken before any write, and `clear` is unused.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DiagonalScroll`] if both `dx` and `dy` are
    /// non-zero. The frame is left untouched.
    #[allow(
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "coordinates are bounded by the array capacity `N`"
    )]
    pub fn scroll(&mut self, dx: i32, dy: i32, clear: u16, mode: ScrollMode) -> Result<(), ConfigError> {
        if dx != 0 && dy != 0 {
            return Err(ConfigError::DiagonalScroll);
        }
        if dx == 0 && dy == 0 {
            return Ok(());
        }

        let (width, height) = (self.width as i64, self.height as i64);
        let (dx, dy) = (i64::from(dx), i64::from(dy));
        let prior = self.pixels;
        for y in 0..height {
            for x in 0..width {
                let (mut source_x, mut source_y) = (x - dx, y - dy);
                if mode == ScrollMode::Wrap {
                    source_x = source_x.rem_euclid(width);
                    source_y = source_y.rem_euclid(height);
                }
                let color = if (0..width).contains(&source_x) && (0..height).contains(&source_y) {
                    prior[(source_y * width + source_x) as usize]
                } else {
                    clear
                };
                self.pixels[(y * width + x) as usize] = color;
            }
        }
        Ok(())
    }
}

impl<const N: usize> PixelSurface for Frame565<N> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, x: usize, y: usize) -> u16 {
        assert!(x < self.width, "x must be within width");
        assert!(y < self.height, "y must be within height");
        self.pixels[y * self.width + x]
    }

    fn set(&mut self, x: usize, y: usize, color: u16) {
        assert!(x < self.width, "x must be within width");
        assert!(y < self.height, "y must be within height");
        self.pixels[y * self.width + x] = color;
    }
}

impl<const N: usize> OriginDimensions for Frame565<N> {
    fn size(&self) -> Size {
        Size::new(
            u32::try_from(self.width).unwrap_or(u32::MAX),
            u32::try_from(self.height).unwrap_or(u32::MAX),
        )
    }
}

impl<const N: usize> DrawTarget for Frame565<N> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some((x, y)) = self.locate(i64::from(coord.x), i64::from(coord.y)) {
                self.pixels[y * self.width + x] = color.into_storage();
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> core::result::Result<(), Self::Error> {
        self.fill(color.into_storage());
        Ok(())
    }
}

/// Packed value to an `embedded-graphics` color.
#[must_use]
pub fn to_rgb565(packed: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(packed))
}
