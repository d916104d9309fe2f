// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! PNG file structure: the 8-byte signature and the chunk framing.
//!
//! A chunk is a 4-byte big-endian length, a 4-byte ASCII type tag, that many
//! bytes of data, and a 4-byte CRC-32 over tag + data.

use crate::png::Error;
use crate::png::crc::chunk_crc;

/// The fixed 8-byte PNG signature.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub(crate) const IHDR: [u8; 4] = *b"IHDR";
pub(crate) const PLTE: [u8; 4] = *b"PLTE";
pub(crate) const IDAT: [u8; 4] = *b"IDAT";
pub(crate) const IEND: [u8; 4] = *b"IEND";

/// Returns whether `data` begins with the full 8-byte PNG signature.
///
/// Inputs shorter than 8 bytes fail validation rather than panicking.
///
/// # Examples
///
/// ```
/// use pixels_and_chunks::png::has_png_signature;
///
/// assert!(has_png_signature(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]));
/// assert!(!has_png_signature(b"GIF89a"));
/// assert!(!has_png_signature(&[0x89, b'P']));
/// ```
pub fn has_png_signature(data: &[u8]) -> bool {
    data.len() >= 8 && data[..8] == SIGNATURE
}

/// Big-endian u32 at `offset` (PNG uses network byte order throughout).
#[inline]
pub(crate) fn be_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// A chunk borrowed from the file buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawChunk<'a> {
    pub tag: [u8; 4],
    pub data: &'a [u8],
    pub crc: u32,
}

impl RawChunk<'_> {
    /// Recomputes the CRC over tag + data and compares with the stored field.
    pub fn verify_crc(&self) -> Result<(), Error> {
        if chunk_crc(self.tag, self.data) != self.crc {
            return Err(Error::MalformedChunk("chunk CRC mismatch"));
        }
        Ok(())
    }
}

/// Walks chunks in order, starting right after the signature.
///
/// Stops after IEND.  A chunk whose declared length runs past the end of the
/// buffer yields an error and ends iteration.
pub(crate) struct ChunkIter<'a> {
    data: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> ChunkIter<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, Error> {
        if !has_png_signature(data) {
            return Err(Error::MalformedSignature);
        }
        Ok(Self {
            data,
            pos: 8,
            done: false,
        })
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<RawChunk<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.data.len() {
            return None;
        }
        if self.pos + 8 > self.data.len() {
            self.done = true;
            return Some(Err(Error::MalformedChunk("truncated chunk header")));
        }
        let len = be_u32(self.data, self.pos) as usize;
        let tag: [u8; 4] = self.data[self.pos + 4..self.pos + 8].try_into().unwrap();
        let data_start = self.pos + 8;
        let Some(crc_start) = data_start.checked_add(len) else {
            self.done = true;
            return Some(Err(Error::MalformedChunk("chunk length overflows")));
        };
        if crc_start + 4 > self.data.len() {
            self.done = true;
            return Some(Err(Error::MalformedChunk(
                "declared chunk length exceeds buffer",
            )));
        }
        let chunk = RawChunk {
            tag,
            data: &self.data[data_start..crc_start],
            crc: be_u32(self.data, crc_start),
        };
        self.pos = crc_start + 4;
        if tag == IEND {
            self.done = true;
        }
        Some(Ok(chunk))
    }
}

/// Sums the declared lengths of every IDAT chunk in the file.
///
/// The scan moves forward byte by byte looking for the ASCII tag `IDAT`
/// sitting 4 bytes after its length field; on a match the declared length is
/// added to the running total and the scan skips the chunk body (length +
/// tag + data + CRC) to the next candidate position.  Lengths of multiple
/// IDAT chunks are summed, never overwritten.
///
/// A declared length that would read past the end of the buffer halts
/// accumulation with [`Error::MalformedChunk`] instead of reading out of
/// bounds.
///
/// # Examples
///
/// ```
/// use pixels_and_chunks::png::{ColorType, encode, total_idat_len};
///
/// let file = encode(&[128u8; 9], 3, 3, ColorType::Grayscale, 8).expect("encode");
/// let total = total_idat_len(&file).expect("scan");
/// assert!(total > 0);
/// ```
pub fn total_idat_len(data: &[u8]) -> Result<u64, Error> {
    if !has_png_signature(data) {
        return Err(Error::MalformedSignature);
    }
    let mut total = 0u64;
    let mut i = 8;
    while i + 4 <= data.len() {
        if data[i..i + 4] == IDAT {
            let len = be_u32(data, i - 4) as u64;
            // tag ends at i+4; data and CRC follow
            if i as u64 + 8 + len > data.len() as u64 {
                return Err(Error::MalformedChunk(
                    "declared chunk length exceeds buffer",
                ));
            }
            total += len;
            // next candidate tag sits length + 12 bytes past this one
            i += len as usize + 12;
        } else {
            i += 1;
        }
    }
    Ok(total)
}

/// Appends a complete chunk: big-endian length, tag, data, CRC over tag + data.
pub(crate) fn write_chunk(out: &mut Vec<u8>, tag: [u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(&tag);
    out.extend_from_slice(data);
    out.extend_from_slice(&chunk_crc(tag, data).to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_file(idat_lens: &[usize]) -> Vec<u8> {
        let mut file = SIGNATURE.to_vec();
        write_chunk(&mut file, IHDR, &[0u8; 13]);
        for &len in idat_lens {
            write_chunk(&mut file, IDAT, &vec![0xABu8; len]);
        }
        write_chunk(&mut file, IEND, &[]);
        file
    }

    #[test]
    fn signature_checks_all_eight_bytes() {
        assert!(has_png_signature(&SIGNATURE));
        let mut bad = SIGNATURE;
        bad[7] = 0x0B;
        assert!(!has_png_signature(&bad));
    }

    #[test]
    fn signature_tolerates_short_input() {
        assert!(!has_png_signature(&[]));
        assert!(!has_png_signature(&SIGNATURE[..7]));
    }

    #[test]
    fn idat_lengths_are_summed() {
        let file = synthetic_file(&[100, 200, 50]);
        assert_eq!(total_idat_len(&file).unwrap(), 350);
    }

    #[test]
    fn no_idat_sums_to_zero() {
        let file = synthetic_file(&[]);
        assert_eq!(total_idat_len(&file).unwrap(), 0);
    }

    #[test]
    fn corrupt_idat_length_halts_accumulation() {
        let mut file = synthetic_file(&[100]);
        // inflate the declared length of the only IDAT chunk far past the buffer
        let tag_at = file
            .windows(4)
            .position(|w| w == IDAT)
            .expect("IDAT present");
        file[tag_at - 4..tag_at].copy_from_slice(&0xFFFF_FFF0u32.to_be_bytes());
        assert!(matches!(
            total_idat_len(&file),
            Err(Error::MalformedChunk(_))
        ));
    }

    #[test]
    fn idat_scan_requires_signature() {
        assert!(matches!(
            total_idat_len(b"not a png at all"),
            Err(Error::MalformedSignature)
        ));
    }

    #[test]
    fn chunk_iter_walks_in_order() {
        let file = synthetic_file(&[4, 2]);
        let tags: Vec<[u8; 4]> = ChunkIter::new(&file)
            .unwrap()
            .map(|c| c.unwrap().tag)
            .collect();
        assert_eq!(tags, vec![IHDR, IDAT, IDAT, IEND]);
    }

    #[test]
    fn chunk_iter_verifies_crc() {
        let mut file = synthetic_file(&[4]);
        let last = file.len() - 1;
        file[last] ^= 0xFF; // corrupt the IEND CRC
        let results: Vec<_> = ChunkIter::new(&file).unwrap().collect();
        let iend = results.last().unwrap().as_ref().unwrap();
        assert!(matches!(
            iend.verify_crc(),
            Err(Error::MalformedChunk("chunk CRC mismatch"))
        ));
    }

    #[test]
    fn truncated_chunk_reports_malformed() {
        let mut file = synthetic_file(&[4]);
        file.truncate(file.len() - 6); // cut into the IEND chunk
        let last = ChunkIter::new(&file).unwrap().last().unwrap();
        assert!(matches!(last, Err(Error::MalformedChunk(_))));
    }
}
