//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the [`editor`](crate::editor) (which decides sizes and
//! owns the buffers) and the [`backend`](super::backend) (which does the pixel
//! and codec work). This separation allows swapping backends (e.g. for
//! testing with a mock) without changing editor logic.
//!
//! ## Types
//!
//! - [`ResizeMode`] — Quality resampling (default) or fast nearest-neighbour resize.
//! - [`ResampleFilter`] — Interpolation filter used by [`ResizeMode::Resample`].
//! - [`Quality`] — JPEG encoding quality (1–100, default 75). Clamped on construction.
//! - [`ImageKind`] — JPEG, PNG or GIF; sniffed from content on read, from extension on write.
//! - [`ResizeParams`] — Everything a resize needs: target size, mode, filter.

use super::backend::EditorError;
use image::ImageFormat;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How pixels are sampled when the output size differs from the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeMode {
    /// Interpolated scaling through a [`ResampleFilter`].
    #[default]
    Resample,
    /// Fast block scaling: every output pixel copies its nearest source pixel.
    Resize,
}

/// Interpolation filter for [`ResizeMode::Resample`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// The three formats the editor reads and writes.
///
/// Inputs are classified by content ([`from_detected`](Self::from_detected));
/// outputs by file extension ([`from_extension`](Self::from_extension)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    /// Classify a format sniffed from file content.
    ///
    /// `None` means the content was not recognised at all.
    pub fn from_detected(format: Option<ImageFormat>) -> Result<Self, EditorError> {
        match format {
            Some(ImageFormat::Jpeg) => Ok(Self::Jpeg),
            Some(ImageFormat::Png) => Ok(Self::Png),
            Some(ImageFormat::Gif) => Ok(Self::Gif),
            Some(other) => Err(EditorError::UnsupportedFormat(format!(
                "image type '{}'",
                other.to_mime_type()
            ))),
            None => Err(EditorError::UnsupportedFormat(
                "image type 'unknown'".to_string(),
            )),
        }
    }

    /// Pick the encoder for `path` from its extension, case-insensitively.
    pub fn from_extension(path: &Path) -> Result<Self, EditorError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            other => Err(EditorError::UnsupportedFormat(format!(
                "file extension '{other}'"
            ))),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Gif => ImageFormat::Gif,
        }
    }
}

/// Parameters for a resize operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
    pub mode: ResizeMode,
    /// Only consulted for [`ResizeMode::Resample`].
    pub filter: ResampleFilter,
}

impl ResizeParams {
    /// The sampling filter actually applied for this mode.
    pub fn filter_type(&self) -> FilterType {
        match self.mode {
            ResizeMode::Resize => FilterType::Nearest,
            ResizeMode::Resample => self.filter.into(),
        }
    }
}
