// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Loading textures from PNG files on disk.

use pixels_and_chunks::pixel_formats::{RGBA8UNorm, Unorm4};
use pixels_and_chunks::png;
use pixels_and_chunks::texture::{Texel, Texture};

#[test]
fn load_png_from_disk() {
    // write an asset with the encoder, then load it back as a texture
    let pixels = [10u8, 20, 30, 255].repeat(8 * 4);
    let file = png::encode_rgba(&pixels, 8, 4).expect("encode");

    let mut path = std::env::temp_dir();
    path.push(format!("pixels_and_chunks_load_test_{}.png", std::process::id()));
    std::fs::write(&path, &file).expect("write asset");

    let fut = Texture::<RGBA8UNorm>::new_from_path(&path, async_file::Priority::unit_test());
    let texture = test_executors::spin_on(fut).expect("load texture");

    assert_eq!(texture.width(), 8);
    assert_eq!(texture.height(), 4);
    assert_eq!(
        texture[Texel { x: 3, y: 2 }],
        Unorm4 {
            r: 10,
            g: 20,
            b: 30,
            a: 255
        }
    );
    assert_eq!(texture.as_bytes(), &pixels[..]);

    std::fs::remove_file(&path).ok();
}

#[test]
fn texture_encodes_back_to_identical_pixels() {
    let texture = Texture::<RGBA8UNorm>::new_with(5, 5, |t| Unorm4 {
        r: t.x as u8,
        g: t.y as u8,
        b: 128,
        a: 255,
    });
    let file = texture.encode_png().expect("encode");
    let reloaded = Texture::<RGBA8UNorm>::new_from_png_bytes(&file).expect("decode");
    assert_eq!(reloaded.texture_data(), texture.texture_data());
}
