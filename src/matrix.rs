//! The LED matrix device: configuration, pixel buffer, refresh, and scrolling.
//!
//! See [`NeopixelMatrix`] for the refresh flow and [`MatrixConfig`] for the
//! settings and their defaults.

pub mod frame;
pub mod layout;
pub mod shared;

pub use frame::{Frame565, PixelSurface, ScrollMode};
pub use shared::SharedMatrix;

use crate::{
    Error, Result,
    color::{ChannelOrder, ColorPipeline, Expansion, Gamma, validate_balance, validate_brightness},
    error::ConfigError,
    image::{self, ImageRecord},
    text::{self, MatrixFont},
    transport::Transport,
};
use embedded_graphics::prelude::Point;
use layout::{Layout, Rotation, Wiring};

/// Construction-time settings for a [`NeopixelMatrix`].
///
/// Defaults: linear wiring, no rotation, no flips, [`ChannelOrder::Brg`],
/// brightness `0.2`, linear gamma, and full balance on every channel.
///
/// ```rust
/// use neopixel_matrix::{
///     color::{ChannelOrder, Gamma},
///     matrix::{MatrixConfig, layout::{Rotation, Wiring}},
/// };
///
/// const CONFIG: MatrixConfig = MatrixConfig::new(8, 8)
///     .with_wiring(Wiring::Serpentine)
///     .with_rotation(Rotation::Deg90)
///     .with_order(ChannelOrder::Grb)
///     .with_gamma(Gamma::uniform(2.2));
///
/// assert!(CONFIG.validate().is_ok());
/// assert!(MatrixConfig::new(8, 8).with_brightness(1.5).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Row chaining on the strand.
    pub wiring: Wiring,
    /// Clockwise rotation.
    pub rotation: Rotation,
    /// Mirror left/right after rotating.
    pub flip_h: bool,
    /// Mirror top/bottom after rotating.
    pub flip_v: bool,
    /// Byte order on the wire.
    pub order: ChannelOrder,
    /// Global brightness in `[0, 1]`.
    pub brightness: f32,
    /// Per-channel gamma exponents.
    pub gamma: Gamma,
    /// Per-channel `[red, green, blue]` multipliers in `[0, 1]`.
    pub balance: [f32; 3],
}

impl MatrixConfig {
    /// Default brightness.
    pub const DEFAULT_BRIGHTNESS: f32 = 0.2;

    /// A `width × height` configuration with every other setting at its default.
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            wiring: Wiring::Linear,
            rotation: Rotation::Deg0,
            flip_h: false,
            flip_v: false,
            order: ChannelOrder::Brg,
            brightness: Self::DEFAULT_BRIGHTNESS,
            gamma: Gamma::LINEAR,
            balance: [1.0; 3],
        }
    }

    /// Set the wiring.
    #[must_use]
    pub const fn with_wiring(self, wiring: Wiring) -> Self {
        Self { wiring, ..self }
    }

    /// Set the rotation.
    #[must_use]
    pub const fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    /// Set the horizontal flip.
    #[must_use]
    pub const fn with_flip_h(self, flip_h: bool) -> Self {
        Self { flip_h, ..self }
    }

    /// Set the vertical flip.
    #[must_use]
    pub const fn with_flip_v(self, flip_v: bool) -> Self {
        Self { flip_v, ..self }
    }

    /// Set the channel order.
    #[must_use]
    pub const fn with_order(self, order: ChannelOrder) -> Self {
        Self { order, ..self }
    }

    /// Set the brightness (validated later).
    #[must_use]
    pub const fn with_brightness(self, brightness: f32) -> Self {
        Self { brightness, ..self }
    }

    /// Set the gamma exponents (validated later).
    #[must_use]
    pub const fn with_gamma(self, gamma: Gamma) -> Self {
        Self { gamma, ..self }
    }

    /// Set the channel balance (validated later).
    #[must_use]
    pub const fn with_balance(self, balance: [f32; 3]) -> Self {
        Self { balance, ..self }
    }

    /// The validated [`Layout`] this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDimension`] or
    /// [`ConfigError::RotationRequiresSquare`].
    pub const fn layout(&self) -> core::result::Result<Layout, ConfigError> {
        match Layout::new(self.width, self.height) {
            Ok(layout) => layout
                .with_wiring(self.wiring)
                .with_flips(self.flip_h, self.flip_v)
                .with_rotation(self.rotation),
            Err(err) => Err(err),
        }
    }

    /// Run every check without building anything.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        self.layout()?;
        validate_brightness(self.brightness)?;
        validate_balance(self.balance)?;
        self.gamma.validate()
    }
}

/// An inclusive rectangle of cells, `(x1, y1)` to `(x2, y2)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    /// Left column.
    pub x1: usize,
    /// Top row.
    pub y1: usize,
    /// Right column.
    pub x2: usize,
    /// Bottom row.
    pub y2: usize,
}

impl Region {
    /// The region from `(x1, y1)` to `(x2, y2)`, both inclusive.
    #[must_use]
    pub const fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Every cell of a `width × height` grid.
    #[must_use]
    pub const fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width - 1, height - 1)
    }

    fn validate(self, width: usize, height: usize) -> Result<Self> {
        if self.x1 > self.x2 || self.y1 > self.y2 || self.x2 >= width || self.y2 >= height {
            return Err(Error::InvalidRegion {
                x1: self.x1,
                y1: self.y1,
                x2: self.x2,
                y2: self.y2,
            });
        }
        Ok(self)
    }
}

/// A WS2812 matrix: RGB565 frame, color pipeline, wiring table, and transport.
///
/// A refresh reads each cell of the region from the frame, converts it with
/// the [`ColorPipeline`], writes the [`Triple`](crate::transport::Triple) to
/// the precomputed physical slot, and then calls
/// [`Transport::transmit`] exactly once. Slots outside the region keep
/// whatever they held from earlier refreshes.
///
/// `N` is the LED capacity; the matrix needs `width * height <= N`.
///
/// ```rust
/// use neopixel_matrix::{
///     color::{self, ChannelOrder},
///     matrix::{MatrixConfig, NeopixelMatrix, Region, ScrollMode},
///     transport::{Transport, TransportError, Triple},
/// };
///
/// struct Slots([Triple; 8], usize);
///
/// impl Transport for Slots {
///     fn len(&self) -> usize { self.0.len() }
///     fn set_slot(&mut self, index: usize, triple: Triple) { self.0[index] = triple; }
///     fn transmit(&mut self) -> Result<(), TransportError> { self.1 += 1; Ok(()) }
/// }
///
/// let config = MatrixConfig::new(4, 2).with_order(ChannelOrder::Rgb).with_brightness(1.0);
/// let mut matrix = NeopixelMatrix::<_, 8>::new(config, Slots([[0; 3]; 8], 0))?;
///
/// matrix.set_pixel(0, 0, color::RED)?;
/// matrix.scroll(1, 0, color::BLACK, ScrollMode::Wrap)?;
/// matrix.show_region(Region::new(0, 0, 1, 0))?;
///
/// assert_eq!(matrix.transport().0[1], [248, 0, 0]);
/// assert_eq!(matrix.transport().1, 1);
/// # Ok::<(), neopixel_matrix::Error>(())
/// ```
pub struct NeopixelMatrix<T, const N: usize> {
    config: MatrixConfig,
    pipeline: ColorPipeline,
    index_by_xy: [u16; N],
    frame: Frame565<N>,
    transport: T,
}

impl<T: Transport, const N: usize> NeopixelMatrix<T, N> {
    /// Validate `config` and take ownership of `transport`.
    ///
    /// Nothing is built unless every check passes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration, a grid larger
    /// than `N`, or a transport with fewer slots than the grid has cells.
    pub fn new(config: MatrixConfig, transport: T) -> Result<Self> {
        let layout = config.layout()?;
        let pipeline = ColorPipeline::new(config.order, config.brightness, config.gamma, config.balance)?;
        let index_by_xy = layout.index_table::<N>()?;
        let frame = Frame565::new(config.width, config.height)?;
        let needed = layout.len();
        let available = transport.len();
        if available < needed {
            return Err(ConfigError::TransportTooShort { needed, available }.into());
        }

        info!(
            "matrix {}x{}: {} LEDs, rotation {}",
            config.width,
            config.height,
            needed,
            config.rotation.degrees()
        );
        Ok(Self {
            config,
            pipeline,
            index_by_xy,
            frame,
            transport,
        })
    }

    /// The active configuration (reflecting runtime changes).
    #[must_use]
    pub const fn config(&self) -> &MatrixConfig {
        &self.config
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.config.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.config.height
    }

    /// The color pipeline in use.
    #[must_use]
    pub const fn pipeline(&self) -> &ColorPipeline {
        &self.pipeline
    }

    /// Change the brightness for subsequent refreshes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Brightness`] outside `[0, 1]`; nothing changes.
    pub fn set_brightness(&mut self, brightness: f32) -> Result<()> {
        self.pipeline.set_brightness(brightness)?;
        self.config.brightness = brightness;
        debug!("brightness set to {}", brightness);
        Ok(())
    }

    /// Change the channel order for subsequent refreshes.
    pub fn set_order(&mut self, order: ChannelOrder) {
        self.pipeline.set_order(order);
        self.config.order = order;
        debug!("channel order set to {:?}", order);
    }

    /// Change the gamma exponents for subsequent refreshes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Gamma`]; nothing changes.
    pub fn set_gamma(&mut self, gamma: Gamma) -> Result<()> {
        self.pipeline.set_gamma(gamma)?;
        self.config.gamma = gamma;
        debug!("gamma set to {} {} {}", gamma.red, gamma.green, gamma.blue);
        Ok(())
    }

    /// Change the channel balance for subsequent refreshes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Balance`]; nothing changes.
    pub fn set_balance(&mut self, balance: [f32; 3]) -> Result<()> {
        self.pipeline.set_balance(balance)?;
        self.config.balance = balance;
        debug!("balance set to {} {} {}", balance[0], balance[1], balance[2]);
        Ok(())
    }

    /// Change how 5/6-bit channels are widened to 8 bits.
    pub fn set_expansion(&mut self, expansion: Expansion) {
        self.pipeline.set_expansion(expansion);
        debug!("expansion set to {:?}", expansion);
    }

    /// Packed color at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the matrix.
    pub fn pixel(&self, x: usize, y: usize) -> Result<u16> {
        self.frame
            .try_get(x, y)
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Store a packed color at `(x, y)`. It appears on the next refresh.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the matrix; nothing changes.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u16) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(self.out_of_bounds(x, y));
        }
        self.frame.set(x, y, color);
        Ok(())
    }

    /// Set every cell to `color`.
    pub fn fill(&mut self, color: u16) {
        self.frame.fill(color);
    }

    /// The pixel buffer.
    #[must_use]
    pub const fn frame(&self) -> &Frame565<N> {
        &self.frame
    }

    /// Mutable pixel buffer, for `embedded-graphics` drawing.
    pub const fn frame_mut(&mut self) -> &mut Frame565<N> {
        &mut self.frame
    }

    /// The transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable transport.
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Refresh every cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if transmission fails.
    pub fn show(&mut self) -> Result<()> {
        self.show_region(Region::full(self.width(), self.height()))
    }

    /// Refresh the inclusive `region`, then transmit once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] for inverted or out-of-range corners
    /// (before touching any slot), or [`Error::Transport`] if transmission fails.
    pub fn show_region(&mut self, region: Region) -> Result<()> {
        let Region { x1, y1, x2, y2 } = region.validate(self.width(), self.height())?;
        let width = self.width();
        for y in y1..=y2 {
            for x in x1..=x2 {
                let cell = y * width + x;
                let triple = self.pipeline.to_physical(self.frame.as_slice()[cell]);
                self.transport.set_slot(usize::from(self.index_by_xy[cell]), triple);
            }
        }
        trace!("refresh ({},{})-({},{})", x1, y1, x2, y2);
        self.transport.transmit()?;
        Ok(())
    }

    /// Shift the buffer by `(dx, dy)`; see [`Frame565::scroll`]. Does not refresh.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DiagonalScroll`] if both offsets are non-zero.
    pub fn scroll(&mut self, dx: i32, dy: i32, clear: u16, mode: ScrollMode) -> Result<()> {
        self.frame.scroll(dx, dy, clear, mode)?;
        Ok(())
    }

    /// Validate `record` and draw it at `(offset_x, offset_y)`, clipped. Does not refresh.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if the record is malformed; the buffer is untouched.
    pub fn draw_image<const MAX: usize>(
        &mut self,
        record: &ImageRecord<MAX>,
        offset_x: i32,
        offset_y: i32,
    ) -> Result<()> {
        let view = record.validate(self.width())?;
        image::draw_image(&mut self.frame, &view, offset_x, offset_y);
        Ok(())
    }

    /// Render `text` into the buffer with its top-left corner at `origin`. Does
    /// not refresh.
    ///
    /// See [`text::render_text`].
    pub fn draw_text(&mut self, font: MatrixFont, text: &str, colors: &[u16], origin: Point) {
        let Ok(()) = text::render_text(&mut self.frame, font, text, colors, origin);
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> Error {
        Error::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        }
    }
}
