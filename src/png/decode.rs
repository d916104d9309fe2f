// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! PNG decoding: IHDR parsing, chunk walking, IDAT inflation and scanline
reconstruction.

Decoding is a pure transform from a byte buffer to a caller-owned
[`DecodedImage`]; no state survives the call.
*/

use crate::png::Error;
use crate::png::chunk::{self, ChunkIter, be_u32, has_png_signature};
use crate::png::format::{ColorType, PixelLayout};

const FILTER_NONE: u8 = 0;
const FILTER_SUB: u8 = 1;
const FILTER_UP: u8 = 2;
const FILTER_AVERAGE: u8 = 3;
const FILTER_PAETH: u8 = 4;

/// The IHDR record: image dimensions and pixel-format metadata.
///
/// Width and height are parsed as big-endian unsigned 32-bit integers
/// regardless of host byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ihdr {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression: u8,
    pub filter: u8,
    pub interlace: u8,
    /// The CRC stored in the file, as-is.  [`decode`] verifies it; `parse`
    /// only records it.
    pub crc: u32,
}

impl Ihdr {
    /// Parses the IHDR record at its standard fixed offsets in a whole-file
    /// buffer (signature, then a 13-byte IHDR chunk).
    ///
    /// The chunk type bytes at offset 12 must literally be ASCII `IHDR`;
    /// anything else is malformed input and rejects, it does not guess.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixels_and_chunks::png::{ColorType, Ihdr, encode};
    ///
    /// let file = encode(&[0u8; 12], 2, 2, ColorType::Truecolor, 8).expect("encode");
    /// let ihdr = Ihdr::parse(&file).expect("parse");
    /// assert_eq!((ihdr.width, ihdr.height), (2, 2));
    /// assert_eq!(ihdr.color_type, ColorType::Truecolor);
    /// ```
    pub fn parse(data: &[u8]) -> Result<Ihdr, Error> {
        if !has_png_signature(data) {
            return Err(Error::MalformedSignature);
        }
        if data.len() < 33 {
            return Err(Error::MalformedChunk("buffer too short for IHDR"));
        }
        if be_u32(data, 8) != 13 {
            return Err(Error::MalformedChunk("IHDR length is not 13"));
        }
        if data[12..16] != chunk::IHDR {
            return Err(Error::MalformedChunk("expected IHDR tag at offset 12"));
        }
        let bit_depth = data[24];
        let color_byte = data[25];
        let color_type = ColorType::from_byte(color_byte).ok_or(Error::UnsupportedFormat {
            color_type: color_byte,
            bit_depth,
        })?;
        Ok(Ihdr {
            width: be_u32(data, 16),
            height: be_u32(data, 20),
            bit_depth,
            color_type,
            compression: data[26],
            filter: data[27],
            interlace: data[28],
            crc: be_u32(data, 29),
        })
    }

    /// The pixel layout for this header, or `None` for an unsupported
    /// (color type, bit depth) pairing.
    pub fn layout(&self) -> Option<PixelLayout> {
        PixelLayout::resolve(self.color_type, self.bit_depth)
    }

    /// Bits per complete pixel.
    fn bits_per_pixel(&self) -> usize {
        self.color_type.channels() as usize * self.bit_depth as usize
    }

    /// Bytes in one unfiltered scanline, excluding the leading filter byte.
    pub(crate) fn scanline_bytes(&self) -> usize {
        (self.width as usize * self.bits_per_pixel()).div_ceil(8)
    }

    /// Filter stride: bytes per complete pixel, rounded up to one.
    fn filter_stride(&self) -> usize {
        self.bits_per_pixel().div_ceil(8).max(1)
    }
}

/// A decoded image: metadata plus the caller-owned pixel buffer.
///
/// Pixels are row-major with no padding.  Multi-byte samples keep the file's
/// big-endian sample order.  Indexed images hold one palette index byte per
/// pixel, with the palette alongside.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub color_type: ColorType,
    pub bit_depth: u8,
    pub layout: PixelLayout,
    pub pixels: Vec<u8>,
    /// RGB palette entries, present only for indexed images.
    pub palette: Option<Vec<[u8; 3]>>,
}

/// Decodes a PNG byte buffer.
///
/// Validates the signature, walks chunks verifying each CRC, concatenates
/// IDAT payloads, inflates the zlib stream and reverses the per-scanline
/// filters.  All five standard filters are accepted; only non-interlaced
/// images are supported.
///
/// # Examples
///
/// ```
/// use pixels_and_chunks::png::{ColorType, decode, encode};
///
/// let file = encode(&[128u8], 1, 1, ColorType::Grayscale, 8).expect("encode");
/// let image = decode(&file).expect("decode");
/// assert_eq!(image.layout.bytes_per_pixel, 1);
/// assert_eq!(image.layout.tag.to_string(), "Grayscale 8-bit");
/// assert_eq!(image.pixels, vec![128]);
/// ```
pub fn decode(data: &[u8]) -> Result<DecodedImage, Error> {
    let ihdr = Ihdr::parse(data)?;
    if ihdr.width == 0 || ihdr.height == 0 {
        return Err(Error::MalformedChunk("zero image dimension"));
    }
    if ihdr.compression != 0 {
        return Err(Error::MalformedChunk("nonzero compression method"));
    }
    if ihdr.filter != 0 {
        return Err(Error::MalformedChunk("nonzero filter method"));
    }
    if ihdr.interlace != 0 {
        return Err(Error::Unsupported("Adam7 interlaced images"));
    }
    let layout = ihdr.layout().ok_or(Error::UnsupportedFormat {
        color_type: ihdr.color_type.byte(),
        bit_depth: ihdr.bit_depth,
    })?;

    logwise::trace_sync!(
        "png decode {width}x{height} {tag}",
        width = logwise::privacy::LogIt(ihdr.width),
        height = logwise::privacy::LogIt(ihdr.height),
        tag = logwise::privacy::LogIt(layout.tag)
    );

    let (idat, palette) = gather_chunks(data)?;
    if idat.is_empty() {
        return Err(Error::MalformedChunk("no IDAT data"));
    }
    if ihdr.color_type == ColorType::Indexed && palette.is_none() {
        return Err(Error::MalformedChunk("indexed image missing PLTE"));
    }

    let scanline_bytes = ihdr.scanline_bytes();
    let stride = ihdr.filter_stride();
    let expected = (ihdr.height as u64)
        .checked_mul(1 + scanline_bytes as u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(Error::MalformedChunk("image too large"))?;

    let inflated = miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(&idat, expected)
        .map_err(|e| Error::Inflate(e.status))?;
    if inflated.len() < expected {
        return Err(Error::MalformedChunk("truncated scanline data"));
    }

    let mut pixels =
        Vec::with_capacity(ihdr.height as usize * ihdr.width as usize * layout.bytes_per_pixel as usize);
    let mut prev_row = vec![0u8; scanline_bytes];
    let mut curr_row = vec![0u8; scanline_bytes];
    for y in 0..ihdr.height as usize {
        let row_start = y * (1 + scanline_bytes);
        let filter = inflated[row_start];
        curr_row.copy_from_slice(&inflated[row_start + 1..row_start + 1 + scanline_bytes]);
        unfilter_row(filter, &mut curr_row, &prev_row, stride)?;
        if ihdr.color_type == ColorType::Indexed && ihdr.bit_depth < 8 {
            unpack_indices(&curr_row, ihdr.width as usize, ihdr.bit_depth, &mut pixels);
        } else {
            pixels.extend_from_slice(&curr_row);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    Ok(DecodedImage {
        width: ihdr.width,
        height: ihdr.height,
        color_type: ihdr.color_type,
        bit_depth: ihdr.bit_depth,
        layout,
        pixels,
        palette,
    })
}

/// Walks all chunks, verifying CRCs, and returns the concatenated IDAT
/// payload plus the palette if one is present.
fn gather_chunks(data: &[u8]) -> Result<(Vec<u8>, Option<Vec<[u8; 3]>>), Error> {
    let mut idat = Vec::new();
    let mut palette = None;
    let mut seen_iend = false;
    for chunk in ChunkIter::new(data)? {
        let chunk = chunk?;
        chunk.verify_crc()?;
        match chunk.tag {
            chunk::IDAT => idat.extend_from_slice(chunk.data),
            chunk::PLTE => {
                if chunk.data.len() % 3 != 0 || chunk.data.len() > 768 {
                    return Err(Error::MalformedChunk("invalid PLTE length"));
                }
                let entries = chunk
                    .data
                    .chunks_exact(3)
                    .map(|rgb| [rgb[0], rgb[1], rgb[2]])
                    .collect();
                palette = Some(entries);
            }
            chunk::IEND => {
                seen_iend = true;
            }
            _ => {} // ancillary chunks are skipped
        }
    }
    if !seen_iend {
        return Err(Error::MalformedChunk("missing IEND chunk"));
    }
    Ok((idat, palette))
}

/// Reconstructs one scanline in place given the previous unfiltered row.
fn unfilter_row(filter: u8, row: &mut [u8], prev: &[u8], stride: usize) -> Result<(), Error> {
    match filter {
        FILTER_NONE => {}
        FILTER_SUB => {
            for i in stride..row.len() {
                row[i] = row[i].wrapping_add(row[i - stride]);
            }
        }
        FILTER_UP => {
            for i in 0..row.len() {
                row[i] = row[i].wrapping_add(prev[i]);
            }
        }
        FILTER_AVERAGE => {
            for i in 0..row.len() {
                let left = if i >= stride { row[i - stride] as u16 } else { 0 };
                let above = prev[i] as u16;
                row[i] = row[i].wrapping_add(((left + above) / 2) as u8);
            }
        }
        FILTER_PAETH => {
            for i in 0..row.len() {
                let a = if i >= stride { row[i - stride] } else { 0 };
                let b = prev[i];
                let c = if i >= stride { prev[i - stride] } else { 0 };
                row[i] = row[i].wrapping_add(paeth(a, b, c));
            }
        }
        _ => return Err(Error::MalformedChunk("unknown scanline filter")),
    }
    Ok(())
}

#[inline]
fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).unsigned_abs();
    let pb = (p - b as i16).unsigned_abs();
    let pc = (p - c as i16).unsigned_abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Unpacks sub-byte palette indices (1/2/4 bit, MSB first) to one byte each.
fn unpack_indices(row: &[u8], width: usize, bit_depth: u8, out: &mut Vec<u8>) {
    let bits = bit_depth as usize;
    let per_byte = 8 / bits;
    let mask = (1u8 << bits) - 1;
    for x in 0..width {
        let byte = row[x / per_byte];
        let shift = (per_byte - 1 - x % per_byte) * bits;
        out.push((byte >> shift) & mask);
    }
}
