// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Bridges compile-time pixel formats to the PNG codec's runtime metadata.

use crate::pixel_formats::{R8UNorm, RGB8UNorm, RGBA8UNorm};
use crate::png::ColorType;

/// Declares which PNG (color type, bit depth) pairing a pixel format matches.
///
/// # Safety
///
/// Implementors assert that the format's `CPixel` memory layout is exactly
/// the decoded byte stream for the declared pairing; texture loading
/// reinterprets decoded bytes as `CPixel` values on that basis.
pub unsafe trait PngPixelFormat {
    fn png_color_type() -> ColorType;
    fn png_bit_depth() -> u8;
}

unsafe impl PngPixelFormat for R8UNorm {
    fn png_color_type() -> ColorType {
        ColorType::Grayscale
    }

    fn png_bit_depth() -> u8 {
        8
    }
}

unsafe impl PngPixelFormat for RGB8UNorm {
    fn png_color_type() -> ColorType {
        ColorType::Truecolor
    }

    fn png_bit_depth() -> u8 {
        8
    }
}

unsafe impl PngPixelFormat for RGBA8UNorm {
    fn png_color_type() -> ColorType {
        ColorType::TruecolorAlpha
    }

    fn png_bit_depth() -> u8 {
        8
    }
}
