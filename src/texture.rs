// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Software textures: CPU-side 2D pixel arrays built on the PNG codec.

A [`Texture`] is a row-major array of typed pixels with texture-like
operations.  It is the consumer side of the codec: decoded width, height and
pixel bytes land here, ready for whatever upload path sits downstream.

# Coordinate conventions

- Origin (0, 0) is at the top-left
- X increases to the right, Y increases downward

# Example

```
use pixels_and_chunks::texture::{Texture, Texel};
use pixels_and_chunks::pixel_formats::R8UNorm;

let mut texture = Texture::<R8UNorm>::new(4, 4, 128u8);
texture[Texel { x: 1, y: 2 }] = 255u8;
assert_eq!(texture[Texel { x: 1, y: 2 }], 255u8);
```
*/

use crate::pixel_formats::png_support::PngPixelFormat;
use crate::pixel_formats::sealed::PixelFormat;
use crate::pixel_formats::{pixel_as_bytes, pixels_from_bytes};
use crate::png;
use std::ops::{Index, IndexMut};
use std::path::Path;

/// A CPU texture: a 2D array of typed pixels in GPU-friendly row-major layout.
#[derive(Debug)]
pub struct Texture<Format: PixelFormat> {
    data: Vec<Format::CPixel>,
    width: u16,
    height: u16,
}

/// Integer texture coordinates for a specific pixel location.
///
/// 16-bit coordinates support textures up to 65535x65535; the origin (0, 0)
/// is the top-left corner.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Texel {
    pub x: u16,
    pub y: u16,
}

impl Texel {
    /// The origin texel at coordinates (0, 0).
    pub const ZERO: Texel = Texel { x: 0, y: 0 };

    const fn vec_offset(&self, width: u16) -> usize {
        width as usize * self.y as usize + self.x as usize
    }
}

impl<Format: PixelFormat> Texture<Format> {
    /// Creates a new texture with all pixels initialized to the same value.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixels_and_chunks::texture::Texture;
    /// use pixels_and_chunks::pixel_formats::R8UNorm;
    ///
    /// let texture = Texture::<R8UNorm>::new(64, 64, 128u8);
    /// assert_eq!(texture.width(), 64);
    /// ```
    pub fn new(width: u16, height: u16, initialize_element: Format::CPixel) -> Self {
        let mut vec = Vec::with_capacity(width as usize * height as usize);
        for _ in 0..(width as u32 * height as u32) {
            vec.push(initialize_element.clone())
        }
        Self {
            width,
            height,
            data: vec,
        }
    }

    /// Creates a new texture with pixels initialized by a function.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixels_and_chunks::texture::{Texture, Texel};
    /// use pixels_and_chunks::pixel_formats::R8UNorm;
    ///
    /// // horizontal gradient
    /// let texture = Texture::<R8UNorm>::new_with(16, 16, |texel| (texel.x * 16) as u8);
    /// assert_eq!(texture[Texel { x: 2, y: 0 }], 32);
    /// ```
    pub fn new_with<F: Fn(Texel) -> Format::CPixel>(
        width: u16,
        height: u16,
        initialize_with: F,
    ) -> Self {
        let mut vec = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                vec.push(initialize_with(Texel { x, y }))
            }
        }
        Self {
            width,
            height,
            data: vec,
        }
    }

    /// Builds a texture by decoding an in-memory PNG.
    ///
    /// The PNG's (color type, bit depth) must match the pixel format's
    /// declared pairing; a mismatch is rejected as
    /// [`png::Error::UnsupportedFormat`] rather than silently converted.
    ///
    /// # Panics
    ///
    /// Panics if a decoded dimension exceeds 65535.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixels_and_chunks::pixel_formats::RGBA8UNorm;
    /// use pixels_and_chunks::png;
    /// use pixels_and_chunks::texture::{Texel, Texture};
    ///
    /// let file = png::encode_rgba(&[255u8, 0, 0, 255].repeat(4), 2, 2).expect("encode");
    /// let texture = Texture::<RGBA8UNorm>::new_from_png_bytes(&file).expect("decode");
    /// assert_eq!(texture[Texel::ZERO].r, 255);
    /// ```
    pub fn new_from_png_bytes(data: &[u8]) -> Result<Self, png::Error>
    where
        Format: PngPixelFormat,
    {
        let image = png::decode(data)?;
        if image.color_type != Format::png_color_type()
            || image.bit_depth != Format::png_bit_depth()
        {
            return Err(png::Error::UnsupportedFormat {
                color_type: image.color_type.byte(),
                bit_depth: image.bit_depth,
            });
        }
        Ok(Self {
            data: pixels_from_bytes(&image.pixels),
            width: image.width.try_into().expect("texture width exceeds u16"),
            height: image.height.try_into().expect("texture height exceeds u16"),
        })
    }

    /// Loads a texture from a PNG file.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be opened or read; decode failures are
    /// returned as errors.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # //this is no_run due to file IO
    /// # async fn example() {
    /// use pixels_and_chunks::pixel_formats::RGBA8UNorm;
    /// use pixels_and_chunks::texture::Texture;
    /// use std::path::Path;
    /// # let priority: async_file::Priority = todo!();
    ///
    /// let texture = Texture::<RGBA8UNorm>::new_from_path(Path::new("assets/road.png"), priority)
    ///     .await
    ///     .expect("valid asset");
    /// # }
    /// ```
    pub async fn new_from_path(
        path: &Path,
        priority: async_file::Priority,
    ) -> Result<Self, png::Error>
    where
        Format: PngPixelFormat,
    {
        let file = async_file::File::open(path, priority).await.unwrap();
        let data = file.read_all(priority).await.unwrap();
        logwise::info_sync!(
            "decoding texture from {path}",
            path = logwise::privacy::LogIt(path)
        );
        Self::new_from_png_bytes(&data)
    }

    /// Returns the width of the texture in pixels.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Returns the height of the texture in pixels.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The pixel data in row-major order (Y-major, X-minor), as stored.
    #[inline]
    pub fn texture_data(&self) -> &[Format::CPixel] {
        &self.data
    }

    /// The pixel data as raw bytes, suitable for handing to an upload path.
    pub fn as_bytes(&self) -> &[u8] {
        pixel_as_bytes(&self.data)
    }

    /// Encodes the texture back to a PNG byte stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixels_and_chunks::pixel_formats::{RGBA8UNorm, Unorm4};
    /// use pixels_and_chunks::texture::Texture;
    ///
    /// let texture = Texture::<RGBA8UNorm>::new(2, 2, Unorm4 { r: 0, g: 255, b: 0, a: 255 });
    /// let file = texture.encode_png().expect("encode");
    /// assert!(pixels_and_chunks::png::has_png_signature(&file));
    /// ```
    pub fn encode_png(&self) -> Result<Vec<u8>, png::Error>
    where
        Format: PngPixelFormat,
    {
        png::encode(
            self.as_bytes(),
            self.width as u32,
            self.height as u32,
            Format::png_color_type(),
            Format::png_bit_depth(),
        )
    }
}

impl<Format: PixelFormat> Index<Texel> for Texture<Format> {
    type Output = Format::CPixel;

    fn index(&self, index: Texel) -> &Self::Output {
        assert!(index.x < self.width && index.y < self.height);
        &self.data[index.vec_offset(self.width)]
    }
}

impl<Format: PixelFormat> IndexMut<Texel> for Texture<Format> {
    fn index_mut(&mut self, index: Texel) -> &mut Self::Output {
        assert!(index.x < self.width && index.y < self.height);
        let offset = index.vec_offset(self.width);
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_formats::{R8UNorm, RGBA8UNorm, Unorm4};

    #[test]
    fn indexing_is_row_major() {
        let texture = Texture::<R8UNorm>::new_with(3, 2, |t| (t.y * 3 + t.x) as u8);
        assert_eq!(texture.texture_data(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(texture[Texel { x: 2, y: 1 }], 5);
    }

    #[test]
    fn png_bytes_round_trip_through_texture() {
        let original = Texture::<RGBA8UNorm>::new_with(3, 3, |t| Unorm4 {
            r: t.x as u8 * 10,
            g: t.y as u8 * 10,
            b: 7,
            a: 255,
        });
        let file = original.encode_png().unwrap();
        let loaded = Texture::<RGBA8UNorm>::new_from_png_bytes(&file).unwrap();
        assert_eq!(loaded.width(), 3);
        assert_eq!(loaded.height(), 3);
        assert_eq!(loaded.texture_data(), original.texture_data());
    }

    #[test]
    fn format_mismatch_rejects() {
        let file = crate::png::encode(&[128u8; 4], 2, 2, crate::png::ColorType::Grayscale, 8)
            .unwrap();
        let result = Texture::<RGBA8UNorm>::new_from_png_bytes(&file);
        assert!(matches!(
            result,
            Err(crate::png::Error::UnsupportedFormat {
                color_type: 0,
                bit_depth: 8
            })
        ));
    }
}
