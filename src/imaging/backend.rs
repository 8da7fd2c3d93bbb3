//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the five operations the editor
//! delegates: decode, resize, encode, read_exif and read_iptc. The editor
//! itself only does dimension arithmetic and bookkeeping.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! and `kamadak-exif` crates.

use super::iptc_parser::IptcData;
use super::params::{ImageKind, Quality, ResizeParams};
use image::RgbaImage;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("File '{}' doesn't exist", .0.display())]
    FileNotFound(PathBuf),
    #[error("No support for {0}")]
    UnsupportedFormat(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("No resized image to save, call resize first")]
    NoOutput,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("EXIF error: {0}")]
    Exif(#[from] exif::Error),
}

/// Width and height of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

/// A decoded source image: true-color pixels plus the detected kind.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub kind: ImageKind,
    pub pixels: RgbaImage,
}

/// EXIF fields rendered as display strings, keyed by tag name.
///
/// `primary` holds the main image IFD (plus its EXIF/GPS sub-IFDs);
/// `thumbnail` holds the embedded thumbnail IFD, usually small or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExifData {
    pub primary: BTreeMap<String, String>,
    pub thumbnail: BTreeMap<String, String>,
}

impl ExifData {
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.primary.get(tag).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.thumbnail.is_empty()
    }
}

/// Trait for image processing backends.
///
/// Every backend must implement all five operations so the editor stays
/// backend-agnostic.
pub trait ImageBackend {
    /// Decode a file into a true-color buffer, classifying it by content.
    fn decode(&self, path: &Path) -> Result<DecodedImage, EditorError>;

    /// Produce a new buffer of exactly `params.width` × `params.height`.
    fn resize(&self, source: &RgbaImage, params: &ResizeParams) -> Result<RgbaImage, EditorError>;

    /// Encode `image` as `kind` and write it to `path`, replacing any existing file.
    fn encode(
        &self,
        image: &RgbaImage,
        path: &Path,
        kind: ImageKind,
        quality: Quality,
    ) -> Result<(), EditorError>;

    /// Read embedded EXIF data. `Ok(None)` when the file carries none.
    fn read_exif(&self, path: &Path) -> Result<Option<ExifData>, EditorError>;

    /// Read IPTC-IIM data from the APP13 segment. `Ok(None)` when absent.
    fn read_iptc(&self, path: &Path) -> Result<Option<IptcData>, EditorError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{ResampleFilter, ResizeMode};
    use std::sync::Mutex;

    /// Mock backend that records operations without touching the filesystem.
    #[derive(Default)]
    pub struct MockBackend {
        pub decode_result: Option<Dimensions>,
        pub exif_result: Option<ExifData>,
        pub iptc_result: Option<IptcData>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Resize {
            width: u32,
            height: u32,
            mode: ResizeMode,
            filter: ResampleFilter,
        },
        Encode {
            path: String,
            width: u32,
            height: u32,
            kind: ImageKind,
            quality: u8,
        },
        ReadExif(String),
        ReadIptc(String),
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(width: u32, height: u32) -> Self {
            Self {
                decode_result: Some(Dimensions { width, height }),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path) -> Result<DecodedImage, EditorError> {
            self.record(RecordedOp::Decode(path.to_string_lossy().to_string()));

            let dims = self
                .decode_result
                .ok_or_else(|| EditorError::FileNotFound(path.to_path_buf()))?;
            Ok(DecodedImage {
                kind: ImageKind::Jpeg,
                pixels: RgbaImage::new(dims.width, dims.height),
            })
        }

        fn resize(
            &self,
            _source: &RgbaImage,
            params: &ResizeParams,
        ) -> Result<RgbaImage, EditorError> {
            self.record(RecordedOp::Resize {
                width: params.width,
                height: params.height,
                mode: params.mode,
                filter: params.filter,
            });
            Ok(RgbaImage::new(params.width, params.height))
        }

        fn encode(
            &self,
            image: &RgbaImage,
            path: &Path,
            kind: ImageKind,
            quality: Quality,
        ) -> Result<(), EditorError> {
            self.record(RecordedOp::Encode {
                path: path.to_string_lossy().to_string(),
                width: image.width(),
                height: image.height(),
                kind,
                quality: quality.value(),
            });
            Ok(())
        }

        fn read_exif(&self, path: &Path) -> Result<Option<ExifData>, EditorError> {
            self.record(RecordedOp::ReadExif(path.to_string_lossy().to_string()));
            Ok(self.exif_result.clone())
        }

        fn read_iptc(&self, path: &Path) -> Result<Option<IptcData>, EditorError> {
            self.record(RecordedOp::ReadIptc(path.to_string_lossy().to_string()));
            Ok(self.iptc_result.clone())
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::with_dimensions(800, 600);

        let decoded = backend.decode(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(Dimensions::of(&decoded.pixels), Dimensions { width: 800, height: 600 });

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_without_dimensions_fails_decode() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.decode(Path::new("/missing.jpg")),
            Err(EditorError::FileNotFound(_))
        ));
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();
        let source = RgbaImage::new(10, 10);

        let out = backend
            .resize(
                &source,
                &ResizeParams {
                    width: 5,
                    height: 4,
                    mode: ResizeMode::Resize,
                    filter: ResampleFilter::default(),
                },
            )
            .unwrap();

        assert_eq!(Dimensions::of(&out), Dimensions { width: 5, height: 4 });
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::Resize {
                width: 5,
                height: 4,
                mode: ResizeMode::Resize,
                ..
            }
        ));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = EditorError::FileNotFound(PathBuf::from("/x/y.jpg"));
        assert_eq!(err.to_string(), "File '/x/y.jpg' doesn't exist");

        let err = EditorError::UnsupportedFormat("file extension 'bmp'".into());
        assert_eq!(err.to_string(), "No support for file extension 'bmp'");
    }

    #[test]
    fn exif_data_lookup() {
        let mut exif = ExifData::default();
        assert!(exif.is_empty());
        exif.primary.insert("Make".into(), "\"Canon\"".into());
        assert_eq!(exif.get("Make"), Some("\"Canon\""));
        assert_eq!(exif.get("Model"), None);
        assert!(!exif.is_empty());
    }
}
