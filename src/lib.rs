//! A driver for NeoPixel-style (WS2812) LED matrices built on an RGB565 pixel buffer.
//!
//! Draw into a [`Frame565`](crate::matrix::Frame565) (directly or with
//! [`embedded-graphics`](https://docs.rs/embedded-graphics)), then call
//! [`NeopixelMatrix::show`](crate::matrix::NeopixelMatrix::show). Each refresh converts
//! every packed color through the [`ColorPipeline`](crate::color::ColorPipeline)
//! (565→888 expansion, gamma, brightness, per-channel balance, channel order)
//! and places it at the physical LED slot computed by the
//! [`Layout`](crate::matrix::layout::Layout) (rotation, flips, linear or serpentine wiring).
//! The slot array is handed to the [`Transport`](crate::transport::Transport) once per refresh.
//!
//! # Example
//!
//! ```rust
//! use neopixel_matrix::{
//!     Result,
//!     color::{self, ChannelOrder},
//!     matrix::{MatrixConfig, NeopixelMatrix, layout::Wiring},
//!     transport::{Transport, TransportError, Triple},
//! };
//!
//! /// Stand-in for a real WS2812 driver.
//! struct Strip([Triple; 16]);
//!
//! impl Transport for Strip {
//!     fn len(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn set_slot(&mut self, index: usize, triple: Triple) {
//!         self.0[index] = triple;
//!     }
//!     fn transmit(&mut self) -> core::result::Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let config = MatrixConfig::new(4, 4)
//!     .with_wiring(Wiring::Serpentine)
//!     .with_order(ChannelOrder::Grb)
//!     .with_brightness(0.5);
//! let mut matrix: NeopixelMatrix<Strip, 16> = NeopixelMatrix::new(config, Strip([[0; 3]; 16]))?;
//!
//! matrix.set_pixel(1, 1, color::RED)?;
//! matrix.show()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Glossary
//!
//! - **RGB565:** 16-bit packed color, 5 bits red, 6 bits green, 5 bits blue.
//! - **Slot:** one position on the physical LED strand, in wiring order.
//! - **Serpentine:** wiring where every odd row runs right-to-left.
#![cfg_attr(not(feature = "host"), no_std)]

#[macro_use]
mod fmt;

pub mod animation;
pub mod color;
mod error;
pub mod image;
pub mod matrix;
pub mod text;
#[cfg(feature = "host")]
pub mod to_png;
pub mod transport;

// Re-export error types and result (used throughout)
pub use crate::error::{ConfigError, Error, Result};
