//! RGB565 image records (as decoded from JSON or any other serde format) and
//! clipped drawing of them.
//!
//! A record carries a row-major `pixels` list and an optional `width`. Other
//! fields such as `height`, `description`, or `version` are documentation only;
//! self-describing decoders (JSON) skip them.
//!
//! ```rust
//! use heapless::Vec;
//! use neopixel_matrix::{
//!     color,
//!     image::{ImageError, ImageRecord, draw_image},
//!     matrix::{Frame565, PixelSurface},
//! };
//!
//! let mut frame = Frame565::<9>::new(3, 3)?;
//! let pixels: Vec<i64, 8> = Vec::from_slice(&[0xF800, 0x07E0, 0x001F, 0xFFFF]).unwrap();
//! let record = ImageRecord::new(pixels, Some(2));
//!
//! // Drawn one cell right and down; the right column falls off the 3×3 frame.
//! let validated = record.validate(frame.width())?;
//! draw_image(&mut frame, &validated, 2, 1);
//! assert_eq!(frame.get(2, 1), color::RED);
//! assert_eq!(frame.get(2, 2), color::BLUE);
//!
//! let bad = ImageRecord::<8>::new(Vec::from_slice(&[1, 2, 3]).unwrap(), Some(2));
//! assert_eq!(bad.validate(3), Err(ImageError::NotDivisible { len: 3, width: 2 }));
//! # Ok::<(), neopixel_matrix::Error>(())
//! ```

use derive_more::{Display, Error};
use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::matrix::PixelSurface;

/// Reasons an [`ImageRecord`] is rejected.
#[derive(Debug, Display, Error, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// The record has no `pixels` field.
    #[display("image has no pixels")]
    MissingPixels,

    /// `width` is zero or negative.
    #[display("image width must be positive (got {_0})")]
    NonPositiveWidth(#[error(not(source))] i64),

    /// A pixel is not a 16-bit packed color.
    #[display("pixel {index} is {value}, outside 0..=65535")]
    PixelOutOfRange {
        /// Position in `pixels`.
        index: usize,
        /// The offending value.
        value: i64,
    },

    /// The pixel count is not a multiple of `width`.
    #[display("{len} pixels do not divide into rows of {width}")]
    NotDivisible {
        /// Number of pixels.
        len: usize,
        /// Declared width.
        width: usize,
    },
}

/// A decoded image: up to `MAX` packed RGB565 pixels, row-major.
///
/// Fields are optional and wide so that malformed input survives decoding and
/// is reported by [`validate`](Self::validate) instead.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord<const MAX: usize> {
    /// Packed colors, row-major.
    #[serde(default)]
    pub pixels: Option<Vec<i64, MAX>>,
    /// Row length. Absent means "the width of whatever it is drawn on".
    #[serde(default)]
    pub width: Option<i64>,
    /// Informational only; never used for drawing.
    #[serde(default)]
    pub height: Option<i64>,
}

impl<const MAX: usize> ImageRecord<MAX> {
    /// A record with the given pixels and optional width.
    #[must_use]
    pub const fn new(pixels: Vec<i64, MAX>, width: Option<i64>) -> Self {
        Self {
            pixels: Some(pixels),
            width,
            height: None,
        }
    }

    /// Check the record and borrow it as drawable pixels.
    ///
    /// Checks run in this order: pixels present, width positive, every pixel
    /// in `0..=65535`, pixel count divisible by the declared width. Without a
    /// declared width, `surface_width` is used and a short last row is allowed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ImageError`] found.
    pub fn validate(&self, surface_width: usize) -> Result<ImageView<'_>, ImageError> {
        let pixels = self.pixels.as_ref().ok_or(ImageError::MissingPixels)?;

        let declared = match self.width {
            Some(width) if width <= 0 => return Err(ImageError::NonPositiveWidth(width)),
            Some(width) => Some(usize::try_from(width).unwrap_or(usize::MAX)),
            None => None,
        };

        if let Some((index, &value)) = pixels
            .iter()
            .enumerate()
            .find(|(_, value)| u16::try_from(**value).is_err())
        {
            return Err(ImageError::PixelOutOfRange { index, value });
        }

        let width = match declared {
            Some(width) if pixels.len() % width != 0 => {
                return Err(ImageError::NotDivisible {
                    len: pixels.len(),
                    width,
                });
            }
            Some(width) => width,
            None => surface_width.max(1),
        };

        Ok(ImageView {
            pixels: pixels.as_slice(),
            width,
        })
    }
}

/// Validated image pixels: every value fits in `u16` and `width >= 1`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImageView<'a> {
    pixels: &'a [i64],
    width: usize,
}

impl ImageView<'_> {
    /// Row length.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows, counting a short last row.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.pixels.len().div_ceil(self.width)
    }

    /// Number of pixels.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pixels.len()
    }

    /// `true` if there are no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// `(x, y, color)` for each pixel relative to the image's top-left corner.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, u16)> + '_ {
        self.pixels.iter().enumerate().map(|(index, &value)| {
            // range checked by `ImageRecord::validate`
            let color = u16::try_from(value).unwrap_or_default();
            (index % self.width, index / self.width, color)
        })
    }
}

/// Draw `image` with its top-left corner at `(offset_x, offset_y)`.
///
/// Pixel `i` lands at `(i mod width + offset_x, i div width + offset_y)`;
/// anything outside the surface is skipped.
pub fn draw_image<S: PixelSurface + ?Sized>(
    surface: &mut S,
    image: &ImageView<'_>,
    offset_x: i32,
    offset_y: i32,
) {
    for (x, y, color) in image.pixels() {
        let x = i64::try_from(x).unwrap_or(i64::MAX) + i64::from(offset_x);
        let y = i64::try_from(y).unwrap_or(i64::MAX) + i64::from(offset_y);
        if let Some((x, y)) = surface.locate(x, y) {
            surface.set(x, y, color);
        }
    }
}
