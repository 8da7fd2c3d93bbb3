//! # Image Editor
//!
//! Quick edits for a single image file: open a JPEG, PNG or GIF, shrink or
//! grow it into a bounding box without distorting it, save the result in
//! whichever of those formats the output file name asks for, and read the
//! source's EXIF and IPTC metadata along the way.
//!
//! ```text
//! open      photo.jpg  →  original buffer   (type sniffed from content)
//! resize    400 × 400  →  output buffer     (aspect preserved, floor rounding)
//! save      thumb.png  →  PNG on disk       (format picked by extension)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | [`ImageEditor`]: owns the original and resized buffers |
//! | [`imaging`] | Dimension math, the [`ImageBackend`](imaging::ImageBackend) trait, codecs, EXIF/IPTC readers |
//! | [`config`] | `image-editor.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Content Decides the Input, Name Decides the Output
//!
//! A file's bytes are the only thing consulted when decoding: a JPEG saved as
//! `photo.png` still opens as `image/jpeg`. Saving is the opposite: the
//! extension of the destination is the only thing consulted, so converting a
//! GIF to PNG is a matter of naming the output `.png`.
//!
//! ## Integer Dimension Math
//!
//! Bounding-box results are computed as `floor(a * b / c)` in 64-bit
//! integers. No floating point is involved, so a given input box always
//! produces the same pixel size on every platform.
//!
//! ## Swappable Backend
//!
//! Every pixel and file operation goes through the
//! [`ImageBackend`](imaging::ImageBackend) trait. [`RustBackend`] is the
//! pure-Rust implementation built on the `image` and `kamadak-exif` crates;
//! tests substitute a recording mock to check what the editor asks for.

pub mod config;
pub mod editor;
pub mod imaging;
pub mod output;

pub use editor::{EditorOptions, ImageEditor};
pub use imaging::{
    Dimensions, EditorError, ExifData, ImageKind, IptcData, Quality, ResampleFilter, ResizeMode,
    RustBackend, compute_dimensions,
};

#[cfg(test)]
pub(crate) mod test_helpers;
