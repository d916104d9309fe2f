// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! pixels_and_chunks is the image-codec corner of a game texture pipeline:
a PNG decoder/encoder plus the CPU-side texture type that consumes decoded
pixels before they are handed off to a GPU upload path.

# What's here

| Module | Purpose |
|--------|---------|
| [`png`] | The codec: signature validation, chunk walking, CRC-32, IHDR parsing, pixel-layout resolution, zlib-backed decode and encode |
| [`pixel_formats`] | Type-safe, zero-sized pixel format types with C-layout pixel structs |
| [`texture`] | A software (CPU) texture built on the codec, with texel indexing |

# Design notes

The codec is a pure, stateless transform per call.  Decoding returns an
independent, caller-owned [`png::DecodedImage`]; there is no process-wide
"last decoded" state, so concurrent decodes of independent buffers are safe
by construction.

Expected data-quality failures (bad signature, malformed chunk, unsupported
format, size mismatch) are reported through [`png::Error`] rather than
panics; panics are reserved for contract violations by the caller.

# Example

```
use pixels_and_chunks::png;
use pixels_and_chunks::png::ColorType;

// Encode a 2x2 opaque red RGBA8888 image, then decode it back.
let pixels = [255u8, 0, 0, 255].repeat(4);
let file = png::encode(&pixels, 2, 2, ColorType::TruecolorAlpha, 8).expect("encode");
let decoded = png::decode(&file).expect("decode");
assert_eq!(decoded.width, 2);
assert_eq!(decoded.pixels, pixels);
```
*/

pub mod pixel_formats;
pub mod png;
pub mod texture;
