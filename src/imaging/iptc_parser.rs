//! Minimal IPTC-IIM parser for JPEG files.
//!
//! IPTC lives in the JPEG APP13 marker, wrapped in a Photoshop 3.0 image
//! resource block: `"Photoshop 3.0\0"`, then `8BIM` resources, of which
//! resource 0x0404 holds the raw IIM datasets.
//!
//! Every dataset is kept, keyed `"<record>#<dataset>"` with a three-digit
//! dataset number (`"2#005"`, `"2#120"`), in the order found. Repeatable
//! datasets such as Keywords (`2#025`) collect all their values.

use serde::Serialize;
use std::collections::BTreeMap;

/// IPTC-IIM datasets extracted from an image file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IptcData {
    pub datasets: BTreeMap<String, Vec<String>>,
}

impl IptcData {
    /// All values of a dataset, e.g. `get("2#025")` for keywords.
    pub fn get(&self, key: &str) -> &[String] {
        self.datasets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First non-empty, trimmed value of a dataset.
    fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .iter()
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }

    /// Object Name (2:05), the "Title" field in Lightroom.
    pub fn object_name(&self) -> Option<&str> {
        self.first("2#005")
    }

    /// Caption-Abstract (2:120).
    pub fn caption(&self) -> Option<&str> {
        self.first("2#120")
    }

    /// Keywords (2:25), trimmed, empty entries dropped.
    pub fn keywords(&self) -> Vec<&str> {
        self.get("2#025")
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// Read IPTC metadata from the bytes of an image file.
///
/// Only JPEG carries an APP13 segment; anything else yields `None`, as does
/// a JPEG without IPTC.
pub fn read_iptc(bytes: &[u8]) -> Option<IptcData> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let iim = find_jpeg_app13_iptc(bytes)?;
    let parsed = parse_iptc_iim(iim);
    (!parsed.is_empty()).then_some(parsed)
}

// ---------------------------------------------------------------------------
// IPTC-IIM record parsing
// ---------------------------------------------------------------------------

/// Parse raw IPTC-IIM bytes into datasets.
///
/// IIM dataset format:
///   Byte 0:    0x1C (tag marker)
///   Byte 1:    Record number
///   Byte 2:    Dataset number
///   Bytes 3-4: Data length (big-endian u16). With the high bit set, the low
///              15 bits give the size of an extended length field that follows.
///   Bytes 5+:  Data
fn parse_iptc_iim(data: &[u8]) -> IptcData {
    let mut result = IptcData::default();
    let mut pos = 0;

    while pos + 5 <= data.len() {
        if data[pos] != 0x1C {
            pos += 1;
            continue;
        }

        let record = data[pos + 1];
        let dataset = data[pos + 2];
        let raw_len = u16::from_be_bytes([data[pos + 3], data[pos + 4]]);
        pos += 5;

        let length = if raw_len & 0x8000 != 0 {
            let field_len = (raw_len & 0x7FFF) as usize;
            if field_len == 0 || field_len > 4 || pos + field_len > data.len() {
                break;
            }
            let len = data[pos..pos + field_len]
                .iter()
                .fold(0usize, |acc, &b| (acc << 8) | b as usize);
            pos += field_len;
            len
        } else {
            raw_len as usize
        };

        if pos + length > data.len() {
            break;
        }

        let value = String::from_utf8_lossy(&data[pos..pos + length]).into_owned();
        result
            .datasets
            .entry(format!("{record}#{dataset:03}"))
            .or_default()
            .push(value);

        pos += length;
    }

    result
}

// ---------------------------------------------------------------------------
// JPEG: extract IPTC from APP13 / Photoshop 8BIM
// ---------------------------------------------------------------------------

const PHOTOSHOP_HEADER: &[u8] = b"Photoshop 3.0\0";
const BIM_MARKER: &[u8] = b"8BIM";
const IPTC_RESOURCE_ID: u16 = 0x0404;

/// Find the raw IPTC-IIM bytes inside a JPEG's APP13 segment.
fn find_jpeg_app13_iptc(data: &[u8]) -> Option<&[u8]> {
    let mut pos = 2; // past SOI
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        let marker = data[pos + 1];

        // Fill bytes and stuffed zeros
        if marker == 0xFF || marker == 0x00 {
            pos += 1;
            continue;
        }
        // SOS (0xDA) means entropy-coded data starts; no more headers
        if marker == 0xDA || marker == 0xD9 {
            break;
        }
        // Markers without a length field
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }

        let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if seg_len < 2 {
            break;
        }
        let seg_end = (pos + 2 + seg_len).min(data.len());

        if marker == 0xED {
            let segment = &data[pos + 4..seg_end];
            if let Some(iptc) = extract_iptc_from_8bim(segment) {
                return Some(iptc);
            }
        }

        pos += 2 + seg_len;
    }
    None
}

/// Extract IPTC-IIM bytes from a Photoshop 8BIM resource block.
///
/// Input: APP13 payload, starting with "Photoshop 3.0\0" or directly with
/// "8BIM" entries.
fn extract_iptc_from_8bim(segment: &[u8]) -> Option<&[u8]> {
    let data = segment.strip_prefix(PHOTOSHOP_HEADER).unwrap_or(segment);

    let mut pos = 0;
    while pos + 12 <= data.len() {
        // Each resource: "8BIM" (4) + resource_id (2) + pascal_string + data_len (4) + data
        if &data[pos..pos + 4] != BIM_MARKER {
            pos += 1;
            continue;
        }
        pos += 4;

        let resource_id = u16::from_be_bytes([data[pos], data[pos + 1]]);
        pos += 2;

        // Pascal string: 1 byte length + string, padded to even total
        let pascal_len = data[pos] as usize;
        pos += 1 + pascal_len + ((1 + pascal_len) % 2);

        if pos + 4 > data.len() {
            break;
        }
        let res_len =
            u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]) as usize;
        pos += 4;

        if pos + res_len > data.len() {
            break;
        }

        if resource_id == IPTC_RESOURCE_ID {
            return Some(&data[pos..pos + res_len]);
        }

        // Advance past data, padded to even
        pos += res_len + (res_len % 2);
    }

    None
}
