// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! CRC-32 as used by PNG chunks.
//!
//! Reflected CRC-32 with polynomial `0xEDB88320`, initial value `0xFFFFFFFF`
//! and a final complement, computed over a chunk's type bytes followed by its
//! data bytes.  The decoder uses it to validate chunks and the encoder uses
//! the same table to generate the CRC field, so a round trip is verifiably
//! consistent.

/// Reversed polynomial of the PNG (IEEE 802.3) CRC-32.
const POLYNOMIAL: u32 = 0xEDB8_8320;

const CRC_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 {
                POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

/// Incremental CRC-32 state.
///
/// Chunk CRCs cover the type bytes and the data bytes, which usually live in
/// separate slices; the incremental form avoids concatenating them.
///
/// # Examples
///
/// ```
/// use pixels_and_chunks::png::Crc32;
///
/// let mut crc = Crc32::new();
/// crc.update(b"IEND");
/// assert_eq!(crc.finalize(), 0xAE42_6082);
/// ```
#[derive(Debug, Clone)]
pub struct Crc32(u32);

impl Crc32 {
    /// Starts a new checksum at the standard initial value.
    pub const fn new() -> Self {
        Crc32(0xFFFF_FFFF)
    }

    /// Folds `bytes` into the running checksum.
    pub fn update(&mut self, bytes: &[u8]) {
        let mut c = self.0;
        for &byte in bytes {
            c = CRC_TABLE[((c ^ byte as u32) & 0xFF) as usize] ^ (c >> 8);
        }
        self.0 = c;
    }

    /// Returns the complemented checksum.
    pub const fn finalize(&self) -> u32 {
        self.0 ^ 0xFFFF_FFFF
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot CRC-32 over a single byte slice.
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(bytes);
    crc.finalize()
}

/// CRC over a chunk's type tag followed by its data, as stored in the file.
pub(crate) fn chunk_crc(tag: [u8; 4], data: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(&tag);
    crc.update(data);
    crc.finalize()
}
