// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Type-safe pixel format definitions for CPU textures.
//!
//! Pixel formats are zero-sized types rather than enum values so that texture
//! operations can be typechecked at compile time: a [`crate::texture::Texture`]
//! parameterized on [`RGBA8UNorm`] can only be read and written with
//! [`Unorm4`] pixels, with no runtime dispatch.
//!
//! # Available formats
//!
//! - [`R8UNorm`] - single 8-bit channel (grayscale, masks, height maps)
//! - [`RGB8UNorm`] - three 8-bit channels, 3 bytes per pixel
//! - [`RGBA8UNorm`] - four 8-bit channels, 4 bytes per pixel

pub(crate) mod png_support;

use crate::pixel_formats::sealed::{PixelFormat, ReprC};
use std::fmt::Debug;

/// Sealed traits for pixel format type safety.
///
/// The sealed trait pattern ensures only the formats defined in this crate
/// can be used with texture APIs.
pub(crate) mod sealed {
    use std::fmt::Debug;

    /// Core trait for pixel format types.
    pub trait PixelFormat: Debug + Send + Sync + 'static {
        /// Number of bytes per pixel for this format.
        const BYTES_PER_PIXEL: u8;

        /// The concrete pixel type with guaranteed C-compatible memory layout.
        type CPixel: Clone + Debug + Send + ReprC;
    }

    /// Marker trait indicating C-compatible memory layout.
    ///
    /// # Safety
    ///
    /// Implementors must have no padding, no uninitialized bytes, stable
    /// field ordering, and must accept any byte pattern; this is relied on
    /// when casting between pixel slices and byte slices.
    pub unsafe trait ReprC {}
}

/// Convert a slice of C-compatible pixels to raw bytes.
pub(crate) fn pixel_as_bytes<T: ReprC>(pixels: &[T]) -> &[u8] {
    //safe because ReprC guarantees no padding or uninitialized bytes
    unsafe {
        std::slice::from_raw_parts(pixels.as_ptr() as *const u8, std::mem::size_of_val(pixels))
    }
}

/// Reinterpret raw bytes as a vector of C-compatible pixels.
///
/// `bytes.len()` must be a multiple of the pixel size; callers validate
/// buffer sizes before converting.
pub(crate) fn pixels_from_bytes<T: ReprC>(bytes: &[u8]) -> Vec<T> {
    let size = std::mem::size_of::<T>();
    debug_assert_eq!(bytes.len() % size, 0);
    let count = bytes.len() / size;
    let mut vec = Vec::<T>::with_capacity(count);
    //safe because ReprC types accept any byte pattern and have no padding
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), vec.as_mut_ptr() as *mut u8, count * size);
        vec.set_len(count);
    }
    vec
}

/// 8-bit normalized unsigned integer format with a single channel.
///
/// Values are stored as 0-255 and interpreted as 0.0-1.0 when sampled.
/// Commonly used for grayscale images, alpha masks and height maps; the
/// pixel type is plain `u8`.
#[derive(Debug, Clone)]
pub struct R8UNorm;
impl PixelFormat for R8UNorm {
    const BYTES_PER_PIXEL: u8 = 1;
    type CPixel = u8;
}
unsafe impl ReprC for u8 {}

/// C-compatible RGB pixel with 8-bit normalized unsigned values.
#[repr(C)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Unorm3 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
unsafe impl ReprC for Unorm3 {}

/// 8-bit normalized unsigned integer format with RGB channels.
///
/// Total size is 3 bytes per pixel.  Note that many GPU upload paths prefer
/// a 4-byte format; this one exists for matching RGB888 assets on disk.
#[derive(Debug, Clone)]
pub struct RGB8UNorm;
impl PixelFormat for RGB8UNorm {
    const BYTES_PER_PIXEL: u8 = 3;
    type CPixel = Unorm3;
}

/// C-compatible RGBA pixel with 8-bit normalized unsigned values.
///
/// # Examples
///
/// ```
/// use pixels_and_chunks::pixel_formats::Unorm4;
///
/// let opaque_red = Unorm4 { r: 255, g: 0, b: 0, a: 255 };
/// assert_eq!(opaque_red.a, 255);
/// ```
#[repr(C)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Unorm4 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}
unsafe impl ReprC for Unorm4 {}

impl Unorm4 {
    /// Transparent black constant.
    pub const ZERO: Unorm4 = Unorm4 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
}

/// 8-bit normalized unsigned integer format with RGBA channels.
///
/// The most common texture format for color images; 4 bytes per pixel and
/// the natural match for RGBA8888 PNG assets.
#[derive(Debug, Clone)]
pub struct RGBA8UNorm;
impl PixelFormat for RGBA8UNorm {
    const BYTES_PER_PIXEL: u8 = 4;
    type CPixel = Unorm4;
}
