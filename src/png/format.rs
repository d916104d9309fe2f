// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Color types and the (color type, bit depth) → pixel layout table.

use std::fmt::Display;

/// PNG color type: the channel layout declared in IHDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorType {
    /// One grayscale sample per pixel.
    Grayscale = 0,
    /// Red, green, blue.
    Truecolor = 2,
    /// One palette index per pixel, resolved through the PLTE chunk.
    Indexed = 3,
    /// Grayscale sample plus alpha.
    GrayscaleAlpha = 4,
    /// Red, green, blue, alpha.
    TruecolorAlpha = 6,
}

impl ColorType {
    /// Interprets the raw IHDR color type byte.
    pub const fn from_byte(byte: u8) -> Option<ColorType> {
        match byte {
            0 => Some(ColorType::Grayscale),
            2 => Some(ColorType::Truecolor),
            3 => Some(ColorType::Indexed),
            4 => Some(ColorType::GrayscaleAlpha),
            6 => Some(ColorType::TruecolorAlpha),
            _ => None,
        }
    }

    /// The byte written into IHDR.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Samples per pixel for this layout.
    pub(crate) const fn channels(self) -> u8 {
        match self {
            ColorType::Grayscale | ColorType::Indexed => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::Truecolor => 3,
            ColorType::TruecolorAlpha => 4,
        }
    }
}

/// Semantic pixel format of a decoded buffer.
///
/// `Display` is a fixed lookup table suitable for logs and asset tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    Grayscale8,
    Grayscale16,
    Rgb888,
    Rgb161616,
    Indexed,
    GrayscaleAlpha8,
    GrayscaleAlpha16,
    Rgba8888,
    Rgba16161616,
}

impl Display for FormatTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FormatTag::Grayscale8 => "Grayscale 8-bit",
            FormatTag::Grayscale16 => "Grayscale 16-bit",
            FormatTag::Rgb888 => "RGB888",
            FormatTag::Rgb161616 => "RGB161616",
            FormatTag::Indexed => "Indexed",
            FormatTag::GrayscaleAlpha8 => "Grayscale-alpha 8-bit",
            FormatTag::GrayscaleAlpha16 => "Grayscale-alpha 16-bit",
            FormatTag::Rgba8888 => "RGBA8888",
            FormatTag::Rgba16161616 => "RGBA16161616",
        };
        f.write_str(name)
    }
}

/// Byte layout of one decoded pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    pub tag: FormatTag,
    pub bytes_per_pixel: u8,
}

impl PixelLayout {
    /// Resolves a (color type, bit depth) pair to its pixel layout.
    ///
    /// This mapping is total over the supported pairs and fails closed
    /// everywhere else: an unlisted pairing returns `None` and the caller
    /// must reject the image rather than proceed with a guessed format.
    /// Indexed images accept the PNG-legal depths 1, 2, 4 and 8; decoded
    /// indexed pixels are always one palette index byte each.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixels_and_chunks::png::{ColorType, FormatTag, PixelLayout};
    ///
    /// let layout = PixelLayout::resolve(ColorType::TruecolorAlpha, 8).expect("legal pair");
    /// assert_eq!(layout.bytes_per_pixel, 4);
    /// assert_eq!(layout.tag, FormatTag::Rgba8888);
    /// assert_eq!(layout.tag.to_string(), "RGBA8888");
    ///
    /// // 12 is not a PNG bit depth for any color type
    /// assert!(PixelLayout::resolve(ColorType::Truecolor, 12).is_none());
    /// ```
    pub const fn resolve(color_type: ColorType, bit_depth: u8) -> Option<PixelLayout> {
        let (tag, bytes_per_pixel) = match (color_type, bit_depth) {
            (ColorType::Grayscale, 8) => (FormatTag::Grayscale8, 1),
            (ColorType::Grayscale, 16) => (FormatTag::Grayscale16, 2),
            (ColorType::Truecolor, 8) => (FormatTag::Rgb888, 3),
            (ColorType::Truecolor, 16) => (FormatTag::Rgb161616, 6),
            (ColorType::Indexed, 1 | 2 | 4 | 8) => (FormatTag::Indexed, 1),
            (ColorType::GrayscaleAlpha, 8) => (FormatTag::GrayscaleAlpha8, 2),
            (ColorType::GrayscaleAlpha, 16) => (FormatTag::GrayscaleAlpha16, 4),
            (ColorType::TruecolorAlpha, 8) => (FormatTag::Rgba8888, 4),
            (ColorType::TruecolorAlpha, 16) => (FormatTag::Rgba16161616, 8),
            _ => return None,
        };
        Some(PixelLayout {
            tag,
            bytes_per_pixel,
        })
    }
}
