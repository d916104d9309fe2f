// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! End-to-end codec behavior over whole files.

use pixels_and_chunks::png::{
    ColorType, Crc32, Error, Ihdr, SIGNATURE, decode, encode, encode_rgba, has_png_signature,
    total_idat_len,
};

/// Appends a chunk with a correct length field and CRC.
fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(data);
    let mut crc = Crc32::new();
    crc.update(tag);
    crc.update(data);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
}

#[test]
fn rgba8888_round_trip() {
    // 4x4, all pixels opaque red
    let pixels = [255u8, 0, 0, 255].repeat(16);
    assert_eq!(pixels.len(), 64);

    let file = encode_rgba(&pixels, 4, 4).expect("encode");
    assert!(has_png_signature(&file));

    let image = decode(&file).expect("decode");
    assert_eq!(image.width, 4);
    assert_eq!(image.height, 4);
    assert_eq!(image.color_type, ColorType::TruecolorAlpha);
    assert_eq!(image.bit_depth, 8);
    assert_eq!(image.pixels, pixels);
}

#[test]
fn grayscale_1x1_scenario() {
    let file = encode(&[128u8], 1, 1, ColorType::Grayscale, 8).expect("encode");
    let image = decode(&file).expect("decode");
    assert_eq!(image.layout.bytes_per_pixel, 1);
    assert_eq!(image.layout.tag.to_string(), "Grayscale 8-bit");
    assert_eq!(image.pixels, vec![128]);
}

#[test]
fn ihdr_crc_is_consistent() {
    let file = encode(&[0u8; 27], 3, 3, ColorType::Truecolor, 8).expect("encode");
    let ihdr = Ihdr::parse(&file).expect("parse");

    // recompute the CRC over the chunk's type + data bytes
    let mut crc = Crc32::new();
    crc.update(&file[12..29]);
    assert_eq!(crc.finalize(), ihdr.crc);
}

#[test]
fn non_png_rejected_before_any_parsing() {
    let mut bogus = vec![0x89u8, b'J', b'P', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bogus.extend_from_slice(&[0u8; 64]);
    assert!(matches!(decode(&bogus), Err(Error::MalformedSignature)));
    assert!(matches!(
        Ihdr::parse(&bogus),
        Err(Error::MalformedSignature)
    ));
    assert!(matches!(
        total_idat_len(&bogus),
        Err(Error::MalformedSignature)
    ));
}

#[test]
fn multiple_idat_chunks_are_concatenated() {
    // encode, then split the single IDAT payload into two chunks
    let pixels: Vec<u8> = (0u8..=255).collect();
    let file = encode(&pixels, 16, 16, ColorType::Grayscale, 8).expect("encode");

    let idat_len = u32::from_be_bytes(file[33..37].try_into().unwrap()) as usize;
    let payload = &file[41..41 + idat_len];
    let (front, back) = payload.split_at(idat_len / 2);

    let mut split_file = SIGNATURE.to_vec();
    split_file.extend_from_slice(&file[8..33]); // original IHDR chunk
    push_chunk(&mut split_file, b"IDAT", front);
    push_chunk(&mut split_file, b"IDAT", back);
    push_chunk(&mut split_file, b"IEND", &[]);

    assert_eq!(total_idat_len(&split_file).unwrap(), idat_len as u64);
    let image = decode(&split_file).expect("decode split file");
    assert_eq!(image.pixels, pixels);
}

#[test]
fn idat_lengths_sum_across_synthetic_chunks() {
    let mut file = SIGNATURE.to_vec();
    push_chunk(&mut file, b"IHDR", &[0u8; 13]);
    for len in [100usize, 200, 50] {
        push_chunk(&mut file, b"IDAT", &vec![0x11u8; len]);
    }
    push_chunk(&mut file, b"IEND", &[]);
    assert_eq!(total_idat_len(&file).unwrap(), 350);
}

#[test]
fn oversized_idat_length_is_malformed_not_a_panic() {
    let mut file = SIGNATURE.to_vec();
    push_chunk(&mut file, b"IHDR", &[0u8; 13]);
    push_chunk(&mut file, b"IDAT", &[0x22u8; 10]);
    // rewrite the declared IDAT length to point far past the buffer
    file[33..37].copy_from_slice(&1_000_000u32.to_be_bytes());
    assert!(matches!(
        total_idat_len(&file),
        Err(Error::MalformedChunk(_))
    ));
}

#[test]
fn every_byte_aligned_layout_round_trips() {
    let cases: [(ColorType, u8, u8); 7] = [
        (ColorType::Grayscale, 8, 1),
        (ColorType::Grayscale, 16, 2),
        (ColorType::Truecolor, 8, 3),
        (ColorType::Truecolor, 16, 6),
        (ColorType::GrayscaleAlpha, 8, 2),
        (ColorType::GrayscaleAlpha, 16, 4),
        (ColorType::TruecolorAlpha, 16, 8),
    ];
    for (color_type, bit_depth, bpp) in cases {
        let pixels: Vec<u8> = (0..2 * 2 * bpp as usize)
            .map(|i| (i as u8).wrapping_mul(17))
            .collect();
        let file = encode(&pixels, 2, 2, color_type, bit_depth)
            .unwrap_or_else(|e| panic!("{color_type:?}/{bit_depth}: {e}"));
        let image = decode(&file).unwrap_or_else(|e| panic!("{color_type:?}/{bit_depth}: {e}"));
        assert_eq!(image.layout.bytes_per_pixel, bpp);
        assert_eq!(image.pixels, pixels, "{color_type:?}/{bit_depth}");
    }
}
