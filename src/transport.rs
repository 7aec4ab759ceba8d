//! The hand-off between the matrix and the physical LED strand.
//!
//! The matrix fills every slot it owns, then calls [`Transport::transmit`]
//! exactly once per refresh. [`StripTransport`] adapts any
//! [`smart_leds::SmartLedsWrite`] driver (WS2812 over SPI, PIO, RMT, ...).

use derive_more::{Display, Error};
use smart_leds::{RGB8, SmartLedsWrite};

/// Three bytes for one LED, already in the configured channel order.
pub type Triple = [u8; 3];

/// Transmission failed. The matrix does not retry.
#[derive(Debug, Display, Error, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The underlying LED driver reported a write error.
    #[display("LED driver write failed")]
    Write,
}

/// An ordered array of LED slots that can be pushed to the strand.
pub trait Transport {
    /// Number of slots (LEDs on the strand).
    fn len(&self) -> usize;

    /// `true` if the strand has no LEDs.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store the color for slot `index`. Callers keep `index < len()`.
    fn set_slot(&mut self, index: usize, triple: Triple);

    /// Send every slot to the strand, blocking until done.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on I/O failure.
    fn transmit(&mut self) -> Result<(), TransportError>;
}

/// [`Transport`] over a [`SmartLedsWrite`] driver with `N` LEDs.
///
/// Each slot's three bytes are handed to the driver as its `(r, g, b)` input,
/// so pick the matrix [`ChannelOrder`](crate::color::ChannelOrder) relative to
/// whatever reordering the driver itself applies on the wire.
pub struct StripTransport<W, const N: usize> {
    writer: W,
    slots: [RGB8; N],
}

impl<W, const N: usize> StripTransport<W, N>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    /// Wrap `writer`; all slots start black.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            slots: [RGB8::new(0, 0, 0); N],
        }
    }

    /// The slots as they will be (or were last) transmitted.
    #[must_use]
    pub const fn slots(&self) -> &[RGB8; N] {
        &self.slots
    }

    /// Borrow the wrapped driver.
    #[must_use]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Give back the wrapped driver.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W, const N: usize> Transport for StripTransport<W, N>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    fn len(&self) -> usize {
        N
    }

    fn set_slot(&mut self, index: usize, triple: Triple) {
        let [first, second, third] = triple;
        self.slots[index] = RGB8::new(first, second, third);
    }

    fn transmit(&mut self) -> Result<(), TransportError> {
        self.writer
            .write(self.slots.iter().copied())
            .map_err(|_| TransportError::Write)
    }
}
