//! Error types shared by every module.

use derive_more::{Display, Error, From};

use crate::image::ImageError;
use crate::transport::TransportError;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything that can go wrong while configuring, drawing, or refreshing a matrix.
///
/// Every operation validates before it mutates, so an `Err` never leaves a
/// half-applied configuration behind.
#[derive(Debug, Display, Error, From, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The matrix configuration (or a change to it) was rejected.
    #[display("invalid configuration: {_0}")]
    Config(ConfigError),

    /// A pixel coordinate lies outside the matrix.
    #[display("({x}, {y}) is outside the {width}x{height} matrix")]
    #[from(ignore)]
    OutOfBounds {
        /// Column that was requested.
        x: usize,
        /// Row that was requested.
        y: usize,
        /// Matrix width.
        width: usize,
        /// Matrix height.
        height: usize,
    },

    /// A refresh region is inverted or reaches outside the matrix.
    #[display("invalid region ({x1},{y1})-({x2},{y2})")]
    #[from(ignore)]
    InvalidRegion {
        /// Left column (inclusive).
        x1: usize,
        /// Top row (inclusive).
        y1: usize,
        /// Right column (inclusive).
        x2: usize,
        /// Bottom row (inclusive).
        y2: usize,
    },

    /// An image record failed validation.
    #[display("invalid image: {_0}")]
    Image(ImageError),

    /// The LED transport failed to transmit.
    #[display("transport failure: {_0}")]
    Transport(TransportError),
}

/// Reasons a [`MatrixConfig`](crate::matrix::MatrixConfig) or runtime setting is rejected.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width and height must both be at least 1.
    #[display("width and height must be greater than 0")]
    ZeroDimension,

    /// Rotation must be 0, 90, 180, or 270 degrees.
    #[display("rotation must be 0, 90, 180 or 270 (got {_0})")]
    Rotation(#[error(not(source))] u16),

    /// 90° and 270° rotations need a square matrix.
    #[display("90 and 270 degree rotation require a square matrix")]
    RotationRequiresSquare,

    /// Brightness must be in `[0, 1]`.
    #[display("brightness must be within [0, 1]")]
    Brightness,

    /// Every balance multiplier must be in `[0, 1]`.
    #[display("channel balance must be within [0, 1]")]
    Balance,

    /// Every gamma exponent must be finite and positive.
    #[display("gamma must be finite and greater than 0")]
    Gamma,

    /// The matrix has more cells than the const capacity `N`.
    #[display("matrix needs {needed} LEDs but capacity is {capacity}")]
    CapacityExceeded {
        /// `width * height`.
        needed: usize,
        /// The const generic capacity.
        capacity: usize,
    },

    /// The transport has fewer slots than the matrix has cells.
    #[display("matrix needs {needed} LEDs but the transport has {available}")]
    TransportTooShort {
        /// `width * height`.
        needed: usize,
        /// Slots reported by the transport.
        available: usize,
    },

    /// Only one of `dx`, `dy` may be non-zero in a single scroll.
    #[display("scroll along one axis at a time")]
    DiagonalScroll,
}
