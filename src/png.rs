// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The PNG codec: a pure, stateless byte-buffer transform in each direction.

Decoding ([`decode`]) turns a byte buffer into structured metadata plus a
caller-owned pixel buffer; encoding ([`encode`]) turns a raw pixel buffer
plus metadata into a complete, spec-valid PNG byte stream.  The pieces are
also exposed individually: [`has_png_signature`], [`Ihdr::parse`],
[`PixelLayout::resolve`], [`total_idat_len`] and the [`Crc32`] checksum.

All failures for bad input data are reported synchronously through
[`Error`]; nothing is retried internally and no default format is ever
silently substituted.  The caller (typically an asset loader) decides
whether to abort or substitute a placeholder.
*/

mod chunk;
mod crc;
mod decode;
mod encode;
mod format;

pub use chunk::{SIGNATURE, has_png_signature, total_idat_len};
pub use crc::{Crc32, crc32};
pub use decode::{DecodedImage, Ihdr, decode};
pub use encode::{encode, encode_rgba};
pub use format::{ColorType, FormatTag, PixelLayout};

use std::fmt::Display;

/// Why a PNG buffer was rejected.
///
/// These are expected data-quality failures, not programmer errors; they are
/// returned, never panicked.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input does not begin with the 8-byte PNG magic.
    MalformedSignature,
    /// A chunk tag, length or CRC does not hold together at its expected
    /// offset.
    MalformedChunk(&'static str),
    /// The (color type, bit depth) pair is not in the supported table.
    UnsupportedFormat { color_type: u8, bit_depth: u8 },
    /// Valid PNG, but a feature this codec does not implement.
    Unsupported(&'static str),
    /// On encode: the pixel buffer length disagrees with
    /// width × height × bytes-per-pixel.
    SizeMismatch { expected: u64, actual: u64 },
    /// The zlib stream inside IDAT failed to inflate.
    Inflate(miniz_oxide::inflate::TINFLStatus),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedSignature => write!(f, "not a PNG: missing 8-byte signature"),
            Error::MalformedChunk(reason) => write!(f, "malformed chunk: {}", reason),
            Error::UnsupportedFormat {
                color_type,
                bit_depth,
            } => write!(
                f,
                "unsupported color type {} / bit depth {} combination",
                color_type, bit_depth
            ),
            Error::Unsupported(feature) => write!(f, "unsupported PNG feature: {}", feature),
            Error::SizeMismatch { expected, actual } => write!(
                f,
                "pixel buffer is {} bytes but width*height*bytes_per_pixel is {}",
                actual, expected
            ),
            Error::Inflate(status) => write!(f, "zlib inflate failed: {:?}", status),
        }
    }
}
