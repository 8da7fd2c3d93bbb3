//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Resize
//!
//! ```text
//! photo.jpg → photo-small.png
//!     Source: 800x600 image/jpeg
//!     Output: 400x300 (resample)
//! ```
//!
//! ## Info
//!
//! ```text
//! photo.jpg
//!     Type: image/jpeg
//!     Size: 800x600
//! EXIF
//!     Make: "Acme"
//! IPTC
//!     2#005: Harbour
//! ```

use crate::imaging::{Dimensions, ExifData, IptcData, ResizeMode};
use serde::Serialize;
use std::path::Path;

/// Longest value shown per metadata line before truncation.
const MAX_VALUE_LEN: usize = 60;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_value(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn mode_label(mode: ResizeMode) -> &'static str {
    match mode {
        ResizeMode::Resample => "resample",
        ResizeMode::Resize => "resize",
    }
}

// ============================================================================
// resize
// ============================================================================

/// Outcome of a `resize` command.
#[derive(Debug, Clone)]
pub struct ResizeReport<'a> {
    pub source: &'a Path,
    pub output: &'a Path,
    pub mime_type: &'a str,
    pub original: Dimensions,
    pub resized: Dimensions,
    pub mode: ResizeMode,
}

pub fn format_resize_output(report: &ResizeReport<'_>) -> Vec<String> {
    vec![
        format!("{} → {}", file_label(report.source), file_label(report.output)),
        format!(
            "{}Source: {}x{} {}",
            indent(1),
            report.original.width,
            report.original.height,
            report.mime_type
        ),
        format!(
            "{}Output: {}x{} ({})",
            indent(1),
            report.resized.width,
            report.resized.height,
            mode_label(report.mode)
        ),
    ]
}

/// Print resize output to stdout.
pub fn print_resize_output(report: &ResizeReport<'_>) {
    for line in format_resize_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// info
// ============================================================================

/// Everything `info` knows about a source file. Serialized as-is for `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct InfoReport {
    pub path: String,
    pub mime_type: String,
    pub dimensions: Dimensions,
    pub exif: Option<ExifData>,
    pub iptc: Option<IptcData>,
}

pub fn format_info_output(report: &InfoReport) -> Vec<String> {
    let mut lines = vec![
        file_label(Path::new(&report.path)),
        format!("{}Type: {}", indent(1), report.mime_type),
        format!(
            "{}Size: {}x{}",
            indent(1),
            report.dimensions.width,
            report.dimensions.height
        ),
    ];

    lines.push("EXIF".to_string());
    match &report.exif {
        Some(exif) if !exif.is_empty() => {
            for (tag, value) in &exif.primary {
                lines.push(format!(
                    "{}{}: {}",
                    indent(1),
                    tag,
                    truncate_value(value, MAX_VALUE_LEN)
                ));
            }
            if !exif.thumbnail.is_empty() {
                lines.push(format!("{}Thumbnail", indent(1)));
                for (tag, value) in &exif.thumbnail {
                    lines.push(format!(
                        "{}{}: {}",
                        indent(2),
                        tag,
                        truncate_value(value, MAX_VALUE_LEN)
                    ));
                }
            }
        }
        _ => lines.push(format!("{}(none)", indent(1))),
    }

    lines.push("IPTC".to_string());
    match &report.iptc {
        Some(iptc) if !iptc.is_empty() => {
            for (key, values) in &iptc.datasets {
                for value in values {
                    lines.push(format!(
                        "{}{}: {}",
                        indent(1),
                        key,
                        truncate_value(value.trim(), MAX_VALUE_LEN)
                    ));
                }
            }
        }
        _ => lines.push(format!("{}(none)", indent(1))),
    }

    lines
}

/// Print info output to stdout.
pub fn print_info_output(report: &InfoReport) {
    for line in format_info_output(report) {
        println!("{}", line);
    }
}
