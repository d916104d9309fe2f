// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! PNG encoding: raw pixels to a complete, spec-valid byte stream.

The encoder emits the signature, an IHDR with compression/filter/interlace
all zero, a single IDAT holding the zlib-deflated scanlines (each prefixed
with filter type 0, "None"), and a zero-length IEND.  Every chunk carries a
big-endian length and a CRC-32 over its type + data, produced by the same
table the decoder validates with.
*/

use crate::png::Error;
use crate::png::chunk::{self, write_chunk};
use crate::png::format::{ColorType, PixelLayout};
use miniz_oxide::deflate::CompressionLevel;

/// Encodes a raw pixel buffer as a PNG byte stream.
///
/// `pixels` is row-major with no padding; its length must equal
/// `width * height * bytes_per_pixel` for the resolved layout, otherwise
/// [`Error::SizeMismatch`] is returned.  Sub-byte bit depths are not
/// encodable; pass depth 8 for indexed data.
///
/// # Examples
///
/// ```
/// use pixels_and_chunks::png::{ColorType, encode, has_png_signature};
///
/// let pixels = [255u8, 0, 0, 255].repeat(16);
/// let file = encode(&pixels, 4, 4, ColorType::TruecolorAlpha, 8).expect("encode");
/// assert!(has_png_signature(&file));
/// ```
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    color_type: ColorType,
    bit_depth: u8,
) -> Result<Vec<u8>, Error> {
    let layout = PixelLayout::resolve(color_type, bit_depth).ok_or(Error::UnsupportedFormat {
        color_type: color_type.byte(),
        bit_depth,
    })?;
    if bit_depth < 8 {
        return Err(Error::Unsupported("sub-byte bit depths on encode"));
    }
    if width == 0 || height == 0 {
        return Err(Error::Unsupported("zero image dimension"));
    }
    // an indexed stream without a PLTE is not a valid PNG; this encoder does
    // not build palettes
    if color_type == ColorType::Indexed {
        return Err(Error::Unsupported("indexed images on encode"));
    }
    let expected = width as u64 * height as u64 * layout.bytes_per_pixel as u64;
    if pixels.len() as u64 != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: pixels.len() as u64,
        });
    }

    // prefix every scanline with filter type 0 ("None")
    let row_bytes = width as usize * layout.bytes_per_pixel as usize;
    let mut filtered = Vec::with_capacity(pixels.len() + height as usize);
    for row in pixels.chunks_exact(row_bytes.max(1)) {
        filtered.push(0u8);
        filtered.extend_from_slice(row);
    }
    let compressed =
        miniz_oxide::deflate::compress_to_vec_zlib(&filtered, CompressionLevel::BestCompression as u8);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[bit_depth, color_type.byte(), 0, 0, 0]);

    let mut out = Vec::with_capacity(compressed.len() + 64);
    out.extend_from_slice(&chunk::SIGNATURE);
    write_chunk(&mut out, chunk::IHDR, &ihdr);
    write_chunk(&mut out, chunk::IDAT, &compressed);
    write_chunk(&mut out, chunk::IEND, &[]);
    Ok(out)
}

/// Convenience wrapper for the common RGBA8888 case.
pub fn encode_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, Error> {
    encode(pixels, width, height, ColorType::TruecolorAlpha, 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::png::chunk::be_u32;
    use crate::png::crc::chunk_crc;

    #[test]
    fn emitted_layout_is_bit_exact() {
        let file = encode(&[7u8; 6], 3, 2, ColorType::Grayscale, 8).unwrap();
        assert_eq!(file[0..8], chunk::SIGNATURE);
        assert_eq!(be_u32(&file, 8), 13); // IHDR length
        assert_eq!(&file[12..16], b"IHDR");
        assert_eq!(be_u32(&file, 16), 3); // width
        assert_eq!(be_u32(&file, 20), 2); // height
        assert_eq!(file[24], 8); // bit depth
        assert_eq!(file[25], 0); // color type
        assert_eq!(&file[26..29], &[0, 0, 0]); // compression, filter, interlace
        assert_eq!(be_u32(&file, 29), chunk_crc(*b"IHDR", &file[16..29]));
        assert_eq!(&file[37..41], b"IDAT");
        // zero-length IEND terminator with its fixed CRC
        let tail = &file[file.len() - 12..];
        assert_eq!(be_u32(tail, 0), 0);
        assert_eq!(&tail[4..8], b"IEND");
        assert_eq!(be_u32(tail, 8), 0xAE42_6082);
    }

    #[test]
    fn size_mismatch_is_a_hard_failure() {
        let err = encode(&[0u8; 63], 4, 4, ColorType::TruecolorAlpha, 8).unwrap_err();
        assert!(matches!(
            err,
            Error::SizeMismatch {
                expected: 64,
                actual: 63
            }
        ));
    }

    #[test]
    fn illegal_pairing_rejects() {
        assert!(matches!(
            encode(&[0u8; 4], 2, 2, ColorType::Grayscale, 12),
            Err(Error::UnsupportedFormat {
                color_type: 0,
                bit_depth: 12
            })
        ));
    }

    #[test]
    fn sub_byte_depth_rejects() {
        assert!(matches!(
            encode(&[0u8; 4], 2, 2, ColorType::Indexed, 4),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn scanlines_carry_filter_byte_zero() {
        let file = encode(&[1u8, 2, 3, 4], 2, 2, ColorType::Grayscale, 8).unwrap();
        let idat_start = 41; // right after the IDAT tag
        let idat_len = be_u32(&file, 33) as usize;
        let inflated =
            miniz_oxide::inflate::decompress_to_vec_zlib(&file[idat_start..idat_start + idat_len])
                .unwrap();
        assert_eq!(inflated, vec![0, 1, 2, 0, 3, 4]);
    }
}
