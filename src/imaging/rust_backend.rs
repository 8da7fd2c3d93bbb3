//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Detect type | `image::guess_format` (magic bytes, never the extension) |
//! | Decode (JPEG, PNG, GIF) | `image::load_from_memory_with_format` |
//! | Resize | `image::imageops::resize` (`Nearest` or the configured filter) |
//! | Encode | `JpegEncoder` / `PngEncoder` / `GifEncoder` |
//! | EXIF | `kamadak-exif` (`exif::Reader::read_from_container`) |
//! | IPTC | custom `iptc_parser` (JPEG APP13) |

use super::backend::{DecodedImage, EditorError, ExifData, ImageBackend};
use super::iptc_parser::{self, IptcData};
use super::params::{ImageKind, Quality, ResizeParams};
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage, imageops};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a file that must exist, mapping absence to [`EditorError::FileNotFound`].
fn read_source(path: &Path) -> Result<Vec<u8>, EditorError> {
    if !path.is_file() {
        return Err(EditorError::FileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read(path)?)
}

/// Sniff the image kind from the leading bytes.
fn detect_kind(bytes: &[u8]) -> Result<ImageKind, EditorError> {
    ImageKind::from_detected(image::guess_format(bytes).ok())
}

/// Copy a decoded GIF onto an opaque black true-color canvas.
///
/// Transparent palette entries are not drawn, so they end up black.
fn flatten_gif(decoded: DynamicImage) -> RgbaImage {
    let frame = decoded.into_rgba8();
    let mut canvas = RgbaImage::from_pixel(frame.width(), frame.height(), Rgba([0, 0, 0, 255]));
    imageops::overlay(&mut canvas, &frame, 0, 0);
    canvas
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DecodedImage, EditorError> {
        let bytes = read_source(path)?;
        let kind = detect_kind(&bytes)?;
        let decoded = image::load_from_memory_with_format(&bytes, kind.image_format())?;
        debug!(
            path = %path.display(),
            mime = kind.mime_type(),
            width = decoded.width(),
            height = decoded.height(),
            "decoded source image"
        );

        let pixels = match kind {
            ImageKind::Gif => flatten_gif(decoded),
            ImageKind::Jpeg | ImageKind::Png => decoded.into_rgba8(),
        };
        Ok(DecodedImage { kind, pixels })
    }

    fn resize(&self, source: &RgbaImage, params: &ResizeParams) -> Result<RgbaImage, EditorError> {
        if params.width == 0 || params.height == 0 {
            return Err(EditorError::InvalidArgument(format!(
                "cannot resize to {}x{}",
                params.width, params.height
            )));
        }
        let filter = params.filter_type();
        debug!(
            from_width = source.width(),
            from_height = source.height(),
            to_width = params.width,
            to_height = params.height,
            ?filter,
            "resizing"
        );
        // Pixels, alpha included, are written as computed: no compositing.
        Ok(imageops::resize(source, params.width, params.height, filter))
    }

    fn encode(
        &self,
        image: &RgbaImage,
        path: &Path,
        kind: ImageKind,
        quality: Quality,
    ) -> Result<(), EditorError> {
        let (width, height) = image.dimensions();
        // Encode fully before touching the target so a codec error leaves it intact
        let mut encoded = Vec::new();

        match kind {
            ImageKind::Jpeg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
                JpegEncoder::new_with_quality(&mut encoded, quality.value()).write_image(
                    rgb.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgb8,
                )?;
            }
            ImageKind::Png => {
                PngEncoder::new(&mut encoded).write_image(
                    image.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgba8,
                )?;
            }
            ImageKind::Gif => {
                GifEncoder::new(&mut encoded).encode(
                    image.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgba8,
                )?;
            }
        }

        std::fs::write(path, &encoded)?;
        debug!(path = %path.display(), mime = kind.mime_type(), width, height, "encoded image");
        Ok(())
    }

    fn read_exif(&self, path: &Path) -> Result<Option<ExifData>, EditorError> {
        let bytes = read_source(path)?;
        // GIF has no EXIF container
        if !matches!(detect_kind(&bytes), Ok(ImageKind::Jpeg | ImageKind::Png)) {
            return Ok(None);
        }

        match exif::Reader::new().read_from_container(&mut Cursor::new(&bytes)) {
            Ok(exif) => Ok(Some(collect_exif_fields(&exif))),
            Err(exif::Error::NotFound(_)) => Ok(None),
            Err(e) => Err(EditorError::Exif(e)),
        }
    }

    fn read_iptc(&self, path: &Path) -> Result<Option<IptcData>, EditorError> {
        let bytes = read_source(path)?;
        Ok(iptc_parser::read_iptc(&bytes))
    }
}

/// Flatten parsed EXIF into tag name → display value maps.
///
/// Unnamed tags become `Tag_<Context>_<number>`; a key seen twice in the same
/// IFD gets a `_2`, `_3`, … suffix.
fn collect_exif_fields(exif: &exif::Exif) -> ExifData {
    let mut data = ExifData::default();

    for field in exif.fields() {
        let map = match field.ifd_num {
            exif::In::PRIMARY => &mut data.primary,
            exif::In::THUMBNAIL => &mut data.thumbnail,
            _ => continue,
        };

        let mut name = field.tag.to_string();
        if name.starts_with("Tag(") {
            let context = match field.tag.0 {
                exif::Context::Tiff => "Tiff",
                exif::Context::Exif => "Exif",
                exif::Context::Gps => "Gps",
                exif::Context::Interop => "Interop",
                #[allow(unreachable_patterns)]
                _ => "Unknown",
            };
            name = format!("Tag_{}_{}", context, field.tag.1);
        }

        let value = field.display_value().with_unit(exif).to_string();
        insert_unique(map, name, value);
    }

    data
}

fn insert_unique(map: &mut BTreeMap<String, String>, name: String, value: String) {
    if !map.contains_key(&name) {
        map.insert(name, value);
        return;
    }
    let mut index = 2;
    while map.contains_key(&format!("{name}_{index}")) {
        index += 1;
    }
    map.insert(format!("{name}_{index}"), value);
}
