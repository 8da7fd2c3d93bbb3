//! Image processing — decode, resize, encode, metadata.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Dimensions** | [`compute_dimensions`] (pure integer math) |
//! | **Decode** | `image` crate, type sniffed from content |
//! | **Resize** | `image::imageops::resize` |
//! | **Encode** | `image` JPEG/PNG/GIF encoders, picked by extension |
//! | **EXIF** | `kamadak-exif` |
//! | **IPTC** | custom parser (JPEG APP13) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
pub mod iptc_parser;
mod params;
pub mod rust_backend;

pub use backend::{DecodedImage, Dimensions, EditorError, ExifData, ImageBackend};
pub use calculations::compute_dimensions;
pub use iptc_parser::IptcData;
pub use params::{ImageKind, Quality, ResampleFilter, ResizeMode, ResizeParams};
pub use rust_backend::RustBackend;
