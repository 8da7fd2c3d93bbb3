//! Shared test utilities for the image-editor test suite.
//!
//! Synthetic images are generated on the fly, so no binary fixtures live in
//! the repository.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("source.jpg");
//! create_test_jpeg(&path, 800, 600);
//! ```

use crate::imaging::ImageKind;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, RgbaImage};
use std::path::Path;

// =========================================================================
// Synthetic images
// =========================================================================

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write an RGBA buffer in the given format, bypassing the editor.
pub fn write_rgba(path: &Path, img: &RgbaImage, kind: ImageKind) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = std::io::BufWriter::new(file);
    let (width, height) = img.dimensions();
    match kind {
        ImageKind::Png => image::codecs::png::PngEncoder::new(&mut writer)
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
            .unwrap(),
        ImageKind::Gif => image::codecs::gif::GifEncoder::new(&mut writer)
            .encode(img.as_raw(), width, height, ExtendedColorType::Rgba8)
            .unwrap(),
        ImageKind::Jpeg => panic!("use create_test_jpeg for JPEG fixtures"),
    }
}

// =========================================================================
// Metadata segments
// =========================================================================

/// Insert a minimal EXIF APP1 segment (IFD0 with a single Make tag) right
/// after the SOI marker of a JPEG.
pub fn with_exif_make(jpeg: &[u8], make: &str) -> Vec<u8> {
    let mut value = make.as_bytes().to_vec();
    value.push(0);
    assert!(value.len() > 4, "Make must not fit inline in the IFD entry");

    // Little-endian TIFF: header (8) + IFD0 (2 + 12 + 4) + value
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II*\0");
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x010Fu16.to_le_bytes()); // Make
    tiff.extend_from_slice(&2u16.to_le_bytes()); // ASCII
    tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
    tiff.extend_from_slice(&26u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes()); // no next IFD
    tiff.extend_from_slice(&value);

    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((tiff.len() + 6 + 2) as u16).to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&segment);
    out.extend_from_slice(&jpeg[2..]);
    out
}
