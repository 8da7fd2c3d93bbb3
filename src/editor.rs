//! The stateful editor: one decoded source, at most one resized output.
//!
//! ```no_run
//! use image_editor::{ImageEditor, ResizeMode};
//!
//! let mut editor = ImageEditor::open("photo.jpg")?;
//! editor.resize(400, 400, ResizeMode::Resample)?;
//! editor.save("photo-400.png")?;
//! # Ok::<(), image_editor::EditorError>(())
//! ```
//!
//! ## Ownership
//!
//! The original buffer is acquired by [`ImageEditor::open`] and lives as long
//! as the editor. The output starts out empty; each [`resize`](ImageEditor::resize)
//! drops the previous output before storing the new one. Both buffers are
//! released when the editor is dropped, whether or not a resize ever happened.
//!
//! Every operation either succeeds or leaves the editor exactly as it was.

use crate::imaging::{
    Dimensions, EditorError, ExifData, ImageBackend, ImageKind, IptcData, Quality,
    ResampleFilter, ResizeMode, ResizeParams, RustBackend, compute_dimensions,
};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Defaults applied by an editor when the caller doesn't say otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorOptions {
    /// Mode used by [`ImageEditor::resize_default`].
    pub mode: ResizeMode,
    /// Filter used whenever the mode is [`ResizeMode::Resample`].
    pub filter: ResampleFilter,
    /// Quality for JPEG output.
    pub jpeg_quality: Quality,
}

/// Quick edits for a single image file.
///
/// See the [module docs](self) for the ownership rules.
pub struct ImageEditor<B: ImageBackend = RustBackend> {
    backend: B,
    options: EditorOptions,
    source: PathBuf,
    kind: ImageKind,
    original: RgbaImage,
    output: Option<RgbaImage>,
}

impl ImageEditor<RustBackend> {
    /// Open and decode `path` with the default backend and options.
    ///
    /// Fails with [`EditorError::FileNotFound`] if the path is not a file and
    /// [`EditorError::UnsupportedFormat`] unless the content is JPEG, PNG or GIF.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, RustBackend::new(), EditorOptions::default())
    }
}

impl<B: ImageBackend> ImageEditor<B> {
    /// Open and decode `path` through a specific backend.
    pub fn open_with(path: impl AsRef<Path>, backend: B, options: EditorOptions) -> Result<Self> {
        let source = path.as_ref().to_path_buf();
        let decoded = backend.decode(&source)?;
        if decoded.pixels.width() == 0 || decoded.pixels.height() == 0 {
            return Err(EditorError::InvalidArgument(format!(
                "'{}' decodes to an empty image",
                source.display()
            )));
        }

        Ok(Self {
            backend,
            options,
            source,
            kind: decoded.kind,
            original: decoded.pixels,
            output: None,
        })
    }

    pub fn source_path(&self) -> &Path {
        &self.source
    }

    /// Kind detected from the source file's content.
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    pub fn original_width(&self) -> u32 {
        self.original.width()
    }

    pub fn original_height(&self) -> u32 {
        self.original.height()
    }

    pub fn original_dimensions(&self) -> Dimensions {
        Dimensions::of(&self.original)
    }

    /// Resize into the box `width` × `height`, preserving aspect ratio.
    ///
    /// A zero bound leaves that dimension free; see
    /// [`compute_dimensions`] for the exact policy. Replaces any previous
    /// output.
    pub fn resize(&mut self, width: u32, height: u32, mode: ResizeMode) -> Result<()> {
        let (new_width, new_height) = compute_dimensions(
            self.original_width(),
            self.original_height(),
            width,
            height,
        )?;
        if new_width == 0 || new_height == 0 {
            return Err(EditorError::InvalidArgument(format!(
                "{}x{} in a {width}x{height} box rounds down to {new_width}x{new_height}",
                self.original_width(),
                self.original_height()
            )));
        }

        let params = ResizeParams {
            width: new_width,
            height: new_height,
            mode,
            filter: self.options.filter,
        };
        let resized = self.backend.resize(&self.original, &params)?;
        debug!(
            source = %self.source.display(),
            width = new_width,
            height = new_height,
            ?mode,
            "stored resized output"
        );

        // Release the previous buffer before taking ownership of the new one.
        self.output = None;
        self.output = Some(resized);
        Ok(())
    }

    /// [`resize`](Self::resize) with the mode from this editor's options.
    pub fn resize_default(&mut self, width: u32, height: u32) -> Result<()> {
        self.resize(width, height, self.options.mode)
    }

    /// The current resized output, if any.
    pub fn output(&self) -> Option<&RgbaImage> {
        self.output.as_ref()
    }

    pub fn new_dimensions(&self) -> Option<Dimensions> {
        self.output.as_ref().map(Dimensions::of)
    }

    pub fn new_width(&self) -> Option<u32> {
        self.new_dimensions().map(|d| d.width)
    }

    pub fn new_height(&self) -> Option<u32> {
        self.new_dimensions().map(|d| d.height)
    }

    /// Write the current output to `path`.
    ///
    /// The extension picks the format (`jpg`/`jpeg`, `png`, `gif`, any case).
    /// Nothing is written when the extension is unsupported or no resize has
    /// happened yet.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let kind = ImageKind::from_extension(path)?;
        let output = self.output.as_ref().ok_or(EditorError::NoOutput)?;
        self.backend
            .encode(output, path, kind, self.options.jpeg_quality)
    }

    /// EXIF data of the source file (not the resized output).
    pub fn exif(&self) -> Result<Option<ExifData>> {
        self.backend.read_exif(&self.source)
    }

    /// IPTC data from the source file's APP13 segment.
    pub fn iptc(&self) -> Result<Option<IptcData>> {
        self.backend.read_iptc(&self.source)
    }
}
