//! Monospace text for small matrices.
//!
//! Text is drawn through `embedded-graphics`, so any
//! `DrawTarget<Color = Rgb565>` works, including [`Frame565`](crate::matrix::Frame565).
//! Glyphs that cross the right or bottom edge are clipped pixel by pixel;
//! there is no automatic wrapping, only explicit `\n`.

use embedded_graphics::{
    mono_font::{
        DecorationDimensions, MonoFont, MonoTextStyle,
        ascii::{FONT_4X6, FONT_5X7, FONT_5X8, FONT_6X9, FONT_6X10},
        mapping::StrGlyphMapping,
    },
    pixelcolor::Rgb565,
    prelude::*,
    text::Text,
};

use crate::{color, matrix::frame::to_rgb565};

// Packed bitmap for the built-in 3x4 font (ASCII 0x20-0x7E).
const FONT_3X4_DATA: [u8; 144] = [
    0x0a, 0xd5, 0x10, 0x4a, 0xa0, 0x01, 0x0a, 0xfe, 0x68, 0x85, 0x70, 0x02, 0x08, 0x74, 0x90, 0x86,
    0xa5, 0xc4, 0x08, 0x5e, 0x68, 0x48, 0x08, 0x10, 0xeb, 0x7b, 0xe7, 0xfd, 0x22, 0x27, 0xb8, 0x9b,
    0x39, 0xb4, 0x05, 0xd1, 0xa9, 0x3e, 0xea, 0x5d, 0x28, 0x0a, 0xff, 0xf3, 0xfc, 0xe4, 0x45, 0xd2,
    0xff, 0x7d, 0xff, 0xbc, 0xd9, 0xff, 0xb7, 0xcb, 0xb4, 0xe8, 0xe9, 0xfd, 0xfe, 0xcb, 0x25, 0xaa,
    0xd9, 0x7d, 0x97, 0x7d, 0xe7, 0xbf, 0xdf, 0x6f, 0xdf, 0x7f, 0x6d, 0xb7, 0xe0, 0xd0, 0xf7, 0xe5,
    0x6d, 0x48, 0xc0, 0x68, 0xdf, 0x35, 0x6f, 0x49, 0x40, 0x40, 0x86, 0xf5, 0xd7, 0xab, 0xe0, 0xc7,
    0x5f, 0x7d, 0xff, 0xbc, 0xd9, 0xff, 0x37, 0xcb, 0xb4, 0xe8, 0xe9, 0xfd, 0x1e, 0xcb, 0x25, 0xaa,
    0xd9, 0x7d, 0x17, 0x7d, 0xe7, 0xbf, 0xdf, 0x6f, 0xdf, 0x7f, 0x6d, 0xb7, 0xb1, 0x80, 0xf7, 0xe5,
    0x6d, 0x48, 0xa0, 0xa8, 0xdf, 0x35, 0x6f, 0x49, 0x20, 0x90, 0x86, 0xf5, 0xd7, 0xab, 0xb1, 0x80,
];
const FONT_3X4_IMAGE_WIDTH: u32 = 48;
const FONT_3X4_GLYPH_MAPPING: StrGlyphMapping<'static> = StrGlyphMapping::new("\0 \u{7e}", 0);

/// The built-in 3×4 font, for 4-row matrices.
#[must_use]
pub fn font_3x4() -> MonoFont<'static> {
    MonoFont {
        image: embedded_graphics::image::ImageRaw::new(&FONT_3X4_DATA, FONT_3X4_IMAGE_WIDTH),
        glyph_mapping: &FONT_3X4_GLYPH_MAPPING,
        character_size: Size::new(3, 4),
        character_spacing: 0,
        baseline: 3,
        underline: DecorationDimensions::new(3, 1),
        strikethrough: DecorationDimensions::new(2, 1),
    }
}

/// Font choices for matrix text.
///
/// `Trim` variants reuse the next font up but advance one column and one row
/// less per character, dropping the blank padding built into the glyphs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixFont {
    /// Built-in 3×4, already tight.
    #[default]
    Font3x4Trim,
    /// 4×6 ASCII.
    Font4x6,
    /// 4×6 ASCII on a 3×5 grid.
    Font3x5Trim,
    /// 5×7 ASCII.
    Font5x7,
    /// 5×7 ASCII on a 4×6 grid.
    Font4x6Trim,
    /// 5×8 ASCII.
    Font5x8,
    /// 5×8 ASCII on a 4×7 grid.
    Font4x7Trim,
    /// 6×9 ASCII.
    Font6x9,
    /// 6×9 ASCII on a 5×8 grid.
    Font5x8Trim,
    /// 6×10 ASCII.
    Font6x10,
    /// 6×10 ASCII on a 5×9 grid.
    Font5x9Trim,
}

impl MatrixFont {
    /// The `MonoFont` that supplies the glyphs.
    #[must_use]
    pub fn to_font(self) -> MonoFont<'static> {
        match self {
            Self::Font3x4Trim => font_3x4(),
            Self::Font4x6 | Self::Font3x5Trim => FONT_4X6,
            Self::Font5x7 | Self::Font4x6Trim => FONT_5X7,
            Self::Font5x8 | Self::Font4x7Trim => FONT_5X8,
            Self::Font6x9 | Self::Font5x8Trim => FONT_6X9,
            Self::Font6x10 | Self::Font5x9Trim => FONT_6X10,
        }
    }

    /// Columns and rows removed from each advance.
    #[must_use]
    pub const fn spacing_reduction(self) -> (i32, i32) {
        match self {
            Self::Font3x4Trim
            | Self::Font4x6
            | Self::Font5x7
            | Self::Font5x8
            | Self::Font6x9
            | Self::Font6x10 => (0, 0),
            Self::Font3x5Trim
            | Self::Font4x6Trim
            | Self::Font4x7Trim
            | Self::Font5x8Trim
            | Self::Font5x9Trim => (1, 1),
        }
    }

    /// Horizontal and vertical advance per character.
    #[must_use]
    pub fn advance(self) -> (i32, i32) {
        let size = self.to_font().character_size;
        let (reduce_x, reduce_y) = self.spacing_reduction();
        (
            i32::try_from(size.width).unwrap_or(i32::MAX) - reduce_x,
            i32::try_from(size.height).unwrap_or(i32::MAX) - reduce_y,
        )
    }
}

/// Width in pixels of the first line of `text`.
#[must_use]
pub fn text_width(font: MatrixFont, text: &str) -> usize {
    let (advance_x, _) = font.advance();
    let chars = text.chars().take_while(|&ch| ch != '\n').count();
    chars * usize::try_from(advance_x).unwrap_or(0)
}

/// Draw `text` with its top-left corner at `origin`.
///
/// Characters advance left to right; `\n` returns to `origin.x` on the next
/// line and rendering stops once a line starts below the target. Colors cycle
/// per character (newlines excluded); an empty `colors` draws white.
///
/// # Errors
///
/// Returns whatever the target reports; [`Frame565`](crate::matrix::Frame565)
/// never fails.
pub fn render_text<D>(
    target: &mut D,
    font: MatrixFont,
    text: &str,
    colors: &[u16],
    origin: Point,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let mono_font = font.to_font();
    let (advance_x, advance_y) = font.advance();
    let bounds = target.bounding_box();
    let width_limit = i32::try_from(bounds.size.width).unwrap_or(i32::MAX);
    let height_limit = i32::try_from(bounds.size.height).unwrap_or(i32::MAX);
    let baseline = i32::try_from(mono_font.baseline).unwrap_or(0);

    let mut x = origin.x;
    let mut y = origin.y + baseline;
    let mut color_index: usize = 0;

    for ch in text.chars() {
        if ch == '\n' {
            x = origin.x;
            y += advance_y;
            if y - baseline >= height_limit {
                break;
            }
            continue;
        }

        let packed = if colors.is_empty() {
            color::WHITE
        } else {
            colors[color_index % colors.len()]
        };
        color_index = color_index.wrapping_add(1);

        // Off-screen glyphs still consume a color so a scrolling line keeps its colors.
        if x < width_limit && x + advance_x > 0 {
            let mut buf = [0u8; 4];
            let style = MonoTextStyle::new(&mono_font, to_rgb565(packed));
            Text::new(ch.encode_utf8(&mut buf), Point::new(x, y), style).draw(target)?;
        }

        x += advance_x;
    }

    Ok(())
}
