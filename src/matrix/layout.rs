//! Panel geometry and wiring: where a logical `(x, y)` cell lives on the strand.
//!
//! Coordinates use a screen-style convention: `(0, 0)` is the top-left corner,
//! `x` increases to the right, and `y` increases downward.
//!
//! A logical cell reaches its physical slot in three fixed steps:
//!
//! 1. **Rotation** (clockwise): 90° maps `(x, y)` to `(y, w−1−x)`, 180° to
//!    `(w−1−x, h−1−y)`, 270° to `(h−1−y, x)`.
//! 2. **Flips**, on the rotated coordinates: horizontal `x → w−1−x`, vertical
//!    `y → h−1−y`.
//! 3. **Wiring**: linear rows give `y·w + x`; serpentine rows reverse every odd
//!    row, giving `y·w + (w−1−x)` there.
//!
//! The order matters for compound configurations.
//!
//! # Example
//!
//! ```rust
//! use neopixel_matrix::matrix::layout::{Layout, Rotation, Wiring};
//!
//! // 4×2 serpentine panel:
//! //
//! //   LED0  LED1  LED2  LED3
//! //   LED7  LED6  LED5  LED4
//! let layout = Layout::new(4, 2)?.with_wiring(Wiring::Serpentine);
//! assert_eq!(layout.physical_index(0, 1), 7);
//! assert_eq!(layout.physical_index(3, 1), 4);
//!
//! // 90° rotation needs a square panel.
//! assert!(layout.with_rotation(Rotation::Deg90).is_err());
//! # Ok::<(), neopixel_matrix::ConfigError>(())
//! ```

use crate::error::ConfigError;

/// How consecutive rows are chained on the strand.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wiring {
    /// Every row runs left to right.
    #[default]
    Linear,
    /// Even rows run left to right, odd rows right to left (boustrophedon).
    Serpentine,
}

/// Clockwise rotation applied before flips and wiring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// 90° clockwise.
    Deg90,
    /// 180°.
    Deg180,
    /// 270° clockwise.
    Deg270,
}

impl Rotation {
    /// The rotation in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// `true` for 90° and 270°, which swap the axes.
    #[must_use]
    pub const fn is_quarter_turn(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = ConfigError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(ConfigError::Rotation(other)),
        }
    }
}

/// Validated panel geometry plus the transforms that place each cell on the strand.
///
/// Build with [`Layout::new`], then chain [`with_wiring`](Self::with_wiring),
/// [`with_flips`](Self::with_flips), and [`with_rotation`](Self::with_rotation).
/// For every accepted layout, [`physical_index`](Self::physical_index) is a
/// bijection from the grid onto `0..width*height`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    width: usize,
    height: usize,
    wiring: Wiring,
    rotation: Rotation,
    flip_h: bool,
    flip_v: bool,
}

impl Layout {
    /// A `width × height` panel with linear wiring, no rotation, and no flips.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDimension`] if either side is zero, or
    /// [`ConfigError::CapacityExceeded`] if the cell count overflows `usize`.
    pub const fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if width.checked_mul(height).is_none() {
            return Err(ConfigError::CapacityExceeded {
                needed: usize::MAX,
                capacity: usize::MAX,
            });
        }
        Ok(Self {
            width,
            height,
            wiring: Wiring::Linear,
            rotation: Rotation::Deg0,
            flip_h: false,
            flip_v: false,
        })
    }

    /// Use `wiring` for the final step.
    #[must_use]
    pub const fn with_wiring(self, wiring: Wiring) -> Self {
        Self { wiring, ..self }
    }

    /// Mirror horizontally and/or vertically after rotating.
    #[must_use]
    pub const fn with_flips(self, flip_h: bool, flip_v: bool) -> Self {
        Self {
            flip_h,
            flip_v,
            ..self
        }
    }

    /// Rotate clockwise before flipping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RotationRequiresSquare`] for 90° or 270° on a
    /// non-square panel: the wiring step keeps the construction-time width,
    /// so swapped axes would not cover the strand.
    pub const fn with_rotation(self, rotation: Rotation) -> Result<Self, ConfigError> {
        if rotation.is_quarter_turn() && self.width != self.height {
            return Err(ConfigError::RotationRequiresSquare);
        }
        Ok(Self { rotation, ..self })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always `false`; a layout has at least one cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Wiring used for the final step.
    #[must_use]
    pub const fn wiring(&self) -> Wiring {
        self.wiring
    }

    /// Rotation applied first.
    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// `(horizontal, vertical)` flips.
    #[must_use]
    pub const fn flips(&self) -> (bool, bool) {
        (self.flip_h, self.flip_v)
    }

    /// Physical strand slot for logical cell `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`. Use
    /// [`try_physical_index`](Self::try_physical_index) for unchecked input.
    #[must_use]
    pub const fn physical_index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width, "x must be within width");
        assert!(y < self.height, "y must be within height");

        let (width, height) = (self.width, self.height);
        let (mut x, mut y) = match self.rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (y, width - 1 - x),
            Rotation::Deg180 => (width - 1 - x, height - 1 - y),
            Rotation::Deg270 => (height - 1 - y, x),
        };
        if self.flip_h {
            x = width - 1 - x;
        }
        if self.flip_v {
            y = height - 1 - y;
        }
        match self.wiring {
            Wiring::Serpentine if y % 2 == 1 => y * width + (width - 1 - x),
            Wiring::Linear | Wiring::Serpentine => y * width + x,
        }
    }

    /// Like [`physical_index`](Self::physical_index), but `None` outside the grid.
    #[must_use]
    pub const fn try_physical_index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(self.physical_index(x, y))
        } else {
            None
        }
    }

    /// Precompute `physical_index` for every cell, row-major (`table[y·w + x]`).
    ///
    /// Entries past `width*height` are zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityExceeded`] if the grid has more than `N`
    /// cells or `N` exceeds what a `u16` slot index can address.
    pub fn index_table<const N: usize>(&self) -> Result<[u16; N], ConfigError> {
        let needed = self.len();
        let capacity = N.min(usize::from(u16::MAX) + 1);
        if needed > capacity {
            return Err(ConfigError::CapacityExceeded { needed, capacity });
        }

        let mut table = [0u16; N];
        for y in 0..self.height {
            for x in 0..self.width {
                table[y * self.width + x] = slot_index(self.physical_index(x, y));
            }
        }
        Ok(table)
    }
}

#[allow(clippy::cast_possible_truncation, reason = "callers check len() <= u16::MAX + 1")]
const fn slot_index(index: usize) -> u16 {
    index as u16
}
