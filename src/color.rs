//! Packed RGB565 colors and the pipeline that turns them into physical LED bytes.
//!
//! The pipeline runs once per pixel per refresh, so everything configurable
//! (gamma, brightness, balance) is folded into small per-channel lookup tables
//! when the configuration changes. A refresh is then three table lookups and
//! a reorder.
//!
//! # Example
//!
//! ```rust
//! use neopixel_matrix::color::{self, ChannelOrder, ColorPipeline, Expansion, Gamma};
//!
//! let mut pipeline = ColorPipeline::new(ChannelOrder::Rgb, 1.0, Gamma::LINEAR, [1.0; 3])?;
//! // The default expansion shifts: 5-bit 31 becomes 248.
//! assert_eq!(pipeline.to_physical(color::RED), [248, 0, 0]);
//!
//! // Bit replication reaches full scale.
//! pipeline.set_expansion(Expansion::Replicate);
//! assert_eq!(pipeline.to_physical(color::RED), [255, 0, 0]);
//! # Ok::<(), neopixel_matrix::ConfigError>(())
//! ```

#[cfg(not(feature = "host"))]
use micromath::F32Ext;

use crate::error::ConfigError;
use crate::transport::Triple;

/// Black.
pub const BLACK: u16 = 0x0000;
/// White.
pub const WHITE: u16 = 0xFFFF;
/// Red.
pub const RED: u16 = 0xF800;
/// Green.
pub const GREEN: u16 = 0x07E0;
/// Blue.
pub const BLUE: u16 = 0x001F;
/// Yellow.
pub const YELLOW: u16 = 0xFFE0;
/// Cyan.
pub const CYAN: u16 = 0x07FF;
/// Magenta.
pub const MAGENTA: u16 = 0xF81F;

/// Split a packed color into its raw 5-bit red, 6-bit green, and 5-bit blue fields.
#[must_use]
#[allow(clippy::cast_possible_truncation, reason = "every field is masked to 6 bits or fewer")]
pub const fn unpack565(packed: u16) -> (u8, u8, u8) {
    (
        ((packed >> 11) & 0x1F) as u8,
        ((packed >> 5) & 0x3F) as u8,
        (packed & 0x1F) as u8,
    )
}

/// Expand a packed color to 8 bits per channel using bit replication.
///
/// Full-scale channels map to 255, zero maps to 0.
///
/// ```rust
/// use neopixel_matrix::color::expand565;
///
/// assert_eq!(expand565(0xFFFF), (255, 255, 255));
/// assert_eq!(expand565(0xF800), (255, 0, 0));
/// ```
#[must_use]
pub const fn expand565(packed: u16) -> (u8, u8, u8) {
    let (red, green, blue) = unpack565(packed);
    (expand5(red), expand6(green), expand5(blue))
}

/// Pack 8-bit channels into RGB565 by dropping the low bits.
#[must_use]
#[allow(clippy::cast_lossless, reason = "`u16::from` is not const")]
pub const fn pack565(red: u8, green: u8, blue: u8) -> u16 {
    ((red as u16 >> 3) << 11) | ((green as u16 >> 2) << 5) | (blue as u16 >> 3)
}

const fn expand5(value: u8) -> u8 {
    (value << 3) | (value >> 2)
}

const fn expand6(value: u8) -> u8 {
    (value << 2) | (value >> 4)
}

const fn shift5(value: u8) -> u8 {
    value << 3
}

const fn shift6(value: u8) -> u8 {
    value << 2
}

/// How the pipeline widens 5- and 6-bit channels to 8 bits.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Expansion {
    /// Left shift only: 31 → 248, 63 → 252. Matches the classic
    /// MicroPython NeoPixel matrix output.
    #[default]
    Shift,
    /// Bit replication: 31 → 255, 63 → 255. White reaches full scale.
    Replicate,
}

impl Expansion {
    const fn functions(self) -> (fn(u8) -> u8, fn(u8) -> u8) {
        match self {
            Self::Shift => (shift5, shift6),
            Self::Replicate => (expand5, expand6),
        }
    }
}

// ============================================================================
// Channel order
// ============================================================================

/// Byte order the LED modules expect on the wire.
///
/// WS2812 variants differ; most are [`ChannelOrder::Grb`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelOrder {
    /// Red, green, blue.
    Rgb,
    /// Green, red, blue.
    Grb,
    /// Blue, green, red.
    Bgr,
    /// Blue, red, green.
    #[default]
    Brg,
    /// Red, blue, green.
    Rbg,
    /// Green, blue, red.
    Gbr,
}

impl ChannelOrder {
    /// Every supported order.
    pub const ALL: [Self; 6] = [
        Self::Rgb,
        Self::Grb,
        Self::Bgr,
        Self::Brg,
        Self::Rbg,
        Self::Gbr,
    ];

    /// Arrange red, green, and blue into this order.
    #[must_use]
    #[inline]
    pub const fn arrange(self, red: u8, green: u8, blue: u8) -> Triple {
        match self {
            Self::Rgb => [red, green, blue],
            Self::Grb => [green, red, blue],
            Self::Bgr => [blue, green, red],
            Self::Brg => [blue, red, green],
            Self::Rbg => [red, blue, green],
            Self::Gbr => [green, blue, red],
        }
    }
}

// ============================================================================
// Gamma Correction
// ============================================================================

/// Per-channel gamma exponents.
///
/// `1.0` is linear. Larger exponents lift dark values:
/// `table[i] = round(255 × (i/255)^(1/γ))`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gamma {
    /// Red exponent.
    pub red: f32,
    /// Green exponent.
    pub green: f32,
    /// Blue exponent.
    pub blue: f32,
}

impl Gamma {
    /// No correction.
    pub const LINEAR: Self = Self::uniform(1.0);

    /// The same exponent on all three channels.
    #[must_use]
    pub const fn uniform(exponent: f32) -> Self {
        Self {
            red: exponent,
            green: exponent,
            blue: exponent,
        }
    }

    /// Check that every exponent is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Gamma`] otherwise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if [self.red, self.green, self.blue]
            .iter()
            .all(|exponent| exponent.is_finite() && *exponent > 0.0)
        {
            Ok(())
        } else {
            Err(ConfigError::Gamma)
        }
    }
}

impl Default for Gamma {
    fn default() -> Self {
        Self::LINEAR
    }
}

/// Identity table used for `γ = 1.0`.
#[allow(clippy::cast_possible_truncation, reason = "index < 256")]
const LINEAR_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        table[index] = index as u8;
        index += 1;
    }
    table
};

/// 256-entry gamma correction lookup table for one channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GammaTable([u8; 256]);

impl GammaTable {
    /// Identity table.
    pub const LINEAR: Self = Self(LINEAR_TABLE);

    /// Build the table for `exponent`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Gamma`] if `exponent` is not finite and positive.
    pub fn new(exponent: f32) -> Result<Self, ConfigError> {
        if !(exponent.is_finite() && exponent > 0.0) {
            return Err(ConfigError::Gamma);
        }
        if exponent.to_bits() == 1.0_f32.to_bits() {
            return Ok(Self::LINEAR);
        }

        let inverse = 1.0 / exponent;
        let mut table = [0u8; 256];
        for (value, entry) in (0..=u8::MAX).zip(table.iter_mut()) {
            let normalized = f32::from(value) / 255.0;
            let corrected = (255.0 * normalized.powf(inverse)).round();
            *entry = clamp_to_u8(corrected);
        }
        Ok(Self(table))
    }

    /// Look up one 8-bit value.
    #[must_use]
    #[inline]
    #[allow(clippy::cast_lossless, reason = "`usize::from` is not const")]
    pub const fn apply(&self, value: u8) -> u8 {
        self.0[value as usize]
    }

    /// The raw table.
    #[must_use]
    pub const fn as_array(&self) -> &[u8; 256] {
        &self.0
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clamped to 0..=255 first"
)]
fn clamp_to_u8(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

impl Default for GammaTable {
    fn default() -> Self {
        Self::LINEAR
    }
}

// ============================================================================
// Brightness and balance
// ============================================================================

/// Check that `brightness` is within `[0, 1]`. NaN is rejected.
///
/// # Errors
///
/// Returns [`ConfigError::Brightness`] otherwise.
pub fn validate_brightness(brightness: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&brightness) {
        Ok(())
    } else {
        Err(ConfigError::Brightness)
    }
}

/// Check that every `[red, green, blue]` balance multiplier is within `[0, 1]`.
///
/// # Errors
///
/// Returns [`ConfigError::Balance`] otherwise.
pub fn validate_balance(balance: [f32; 3]) -> Result<(), ConfigError> {
    if balance.iter().all(|factor| (0.0..=1.0).contains(factor)) {
        Ok(())
    } else {
        Err(ConfigError::Balance)
    }
}

/// `f32` settings such as `0.53` sit just below their decimal value; products
/// within this distance under an integer truncate to that integer.
const TRUNCATION_TOLERANCE: f32 = 1e-3;

/// Build the final lookup table for one channel: gamma, then
/// `brightness × balance`, truncated.
///
/// The table is indexed by the raw channel field (32 entries for 5-bit red and
/// blue, 64 for 6-bit green); `expand` widens that field to 8 bits.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    reason = "scale within [0, 1] keeps the product within 0..=255"
)]
fn combo_table<const BITS_LEN: usize>(
    gamma: &GammaTable,
    scale: f32,
    expand: fn(u8) -> u8,
) -> [u8; BITS_LEN] {
    let mut table = [0u8; BITS_LEN];
    for (raw, entry) in (0..=u8::MAX).zip(table.iter_mut()) {
        let corrected = gamma.apply(expand(raw));
        *entry = (f32::from(corrected) * scale + TRUNCATION_TOLERANCE) as u8;
    }
    table
}

// ============================================================================
// Pipeline
// ============================================================================

/// Converts packed RGB565 colors into physical [`Triple`]s.
///
/// Steps, in order: unpack 5/6/5 bits, widen each channel to 8 bits (see
/// [`Expansion`]), apply the channel's [`GammaTable`], multiply by
/// `brightness × balance` (truncating), and arrange in [`ChannelOrder`].
///
/// Steps two through four are precomputed into per-channel tables. Every
/// setter rebuilds those tables before returning, so stale results are never
/// observable. The 256-entry gamma tables are only rebuilt by
/// [`set_gamma`](Self::set_gamma).
#[derive(Clone, Debug)]
pub struct ColorPipeline {
    order: ChannelOrder,
    brightness: f32,
    gamma: Gamma,
    balance: [f32; 3],
    expansion: Expansion,
    gamma_tables: [GammaTable; 3],
    red: [u8; 32],
    green: [u8; 64],
    blue: [u8; 32],
}

impl ColorPipeline {
    /// Create a pipeline after validating every setting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Brightness`], [`ConfigError::Gamma`], or
    /// [`ConfigError::Balance`] for out-of-range settings.
    pub fn new(
        order: ChannelOrder,
        brightness: f32,
        gamma: Gamma,
        balance: [f32; 3],
    ) -> Result<Self, ConfigError> {
        validate_brightness(brightness)?;
        validate_balance(balance)?;
        let mut pipeline = Self {
            order,
            brightness,
            gamma,
            balance,
            expansion: Expansion::default(),
            gamma_tables: gamma_tables(gamma)?,
            red: [0; 32],
            green: [0; 64],
            blue: [0; 32],
        };
        pipeline.rebuild_combo_tables();
        Ok(pipeline)
    }

    fn rebuild_combo_tables(&mut self) {
        let (widen5, widen6) = self.expansion.functions();
        let [red_gamma, green_gamma, blue_gamma] = &self.gamma_tables;
        let [red_balance, green_balance, blue_balance] = self.balance;
        self.red = combo_table(red_gamma, self.brightness * red_balance, widen5);
        self.green = combo_table(green_gamma, self.brightness * green_balance, widen6);
        self.blue = combo_table(blue_gamma, self.brightness * blue_balance, widen5);
    }

    /// Convert one packed color.
    #[must_use]
    #[inline]
    #[allow(clippy::cast_lossless, reason = "`usize::from` is not const")]
    pub const fn to_physical(&self, packed: u16) -> Triple {
        let (red, green, blue) = unpack565(packed);
        self.order.arrange(
            self.red[red as usize],
            self.green[green as usize],
            self.blue[blue as usize],
        )
    }

    /// Current channel order.
    #[must_use]
    pub const fn order(&self) -> ChannelOrder {
        self.order
    }

    /// Current brightness.
    #[must_use]
    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Current gamma exponents.
    #[must_use]
    pub const fn gamma(&self) -> Gamma {
        self.gamma
    }

    /// The per-channel `[red, green, blue]` gamma tables.
    #[must_use]
    pub const fn gamma_tables(&self) -> &[GammaTable; 3] {
        &self.gamma_tables
    }

    /// Current channel expansion.
    #[must_use]
    pub const fn expansion(&self) -> Expansion {
        self.expansion
    }

    /// Current `[red, green, blue]` balance.
    #[must_use]
    pub const fn balance(&self) -> [f32; 3] {
        self.balance
    }

    /// Change the brightness. The gamma tables are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Brightness`] and leaves the pipeline unchanged
    /// if `brightness` is outside `[0, 1]`.
    pub fn set_brightness(&mut self, brightness: f32) -> Result<(), ConfigError> {
        validate_brightness(brightness)?;
        self.brightness = brightness;
        self.rebuild_combo_tables();
        Ok(())
    }

    /// Change the channel order. Tables are unaffected.
    pub const fn set_order(&mut self, order: ChannelOrder) {
        self.order = order;
    }

    /// Change how channels are widened to 8 bits. The gamma tables are kept.
    pub fn set_expansion(&mut self, expansion: Expansion) {
        self.expansion = expansion;
        self.rebuild_combo_tables();
    }

    /// Change the gamma exponents, rebuilding every table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Gamma`] and leaves the pipeline unchanged on a
    /// non-finite or non-positive exponent.
    pub fn set_gamma(&mut self, gamma: Gamma) -> Result<(), ConfigError> {
        self.gamma_tables = gamma_tables(gamma)?;
        self.gamma = gamma;
        self.rebuild_combo_tables();
        Ok(())
    }

    /// Change the per-channel balance. The gamma tables are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Balance`] and leaves the pipeline unchanged if
    /// any multiplier is outside `[0, 1]`.
    pub fn set_balance(&mut self, balance: [f32; 3]) -> Result<(), ConfigError> {
        validate_balance(balance)?;
        self.balance = balance;
        self.rebuild_combo_tables();
        Ok(())
    }
}

fn gamma_tables(gamma: Gamma) -> Result<[GammaTable; 3], ConfigError> {
    Ok([
        GammaTable::new(gamma.red)?,
        GammaTable::new(gamma.green)?,
        GammaTable::new(gamma.blue)?,
    ])
}
