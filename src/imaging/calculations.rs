//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::EditorError;

/// Calculate the output size of a bounding-box resize, preserving aspect ratio.
///
/// A target of `0` leaves that dimension unconstrained:
///
/// | target | result |
/// |---|---|
/// | `(0, h)` | height is `h`, width scaled by `h / original_height` |
/// | `(w, 0)` | width is `w`, height scaled by `w / original_width` |
/// | `(w, h)` | scale by width; if the height then overflows `h`, scale by height |
///
/// The scaled edge is floored, never rounded. Width always wins the
/// tie-break in the bounding-box case, so the result touches one edge of the
/// box exactly and stays at or below the other.
///
/// # Arguments
/// * `original_width`, `original_height` - Source dimensions, both non-zero
/// * `target_width`, `target_height` - Bounding box; `0` means unconstrained
///
/// # Errors
/// [`EditorError::InvalidArgument`] when both targets are zero, an
/// original dimension is zero, or the scaled edge does not fit in a `u32`.
///
/// # Examples
/// ```
/// # use image_editor::imaging::compute_dimensions;
/// // Landscape into a square box: width binds
/// assert_eq!(compute_dimensions(800, 600, 400, 400).unwrap(), (400, 300));
///
/// // Portrait into a square box: height binds
/// assert_eq!(compute_dimensions(600, 800, 400, 400).unwrap(), (300, 400));
/// ```
pub fn compute_dimensions(
    original_width: u32,
    original_height: u32,
    target_width: u32,
    target_height: u32,
) -> Result<(u32, u32), EditorError> {
    if original_width == 0 || original_height == 0 {
        return Err(EditorError::InvalidArgument(format!(
            "original dimensions must be positive, got {original_width}x{original_height}"
        )));
    }

    match (target_width, target_height) {
        (0, 0) => Err(EditorError::InvalidArgument(
            "at least one of width and height must be non-zero".into(),
        )),
        (0, h) => Ok((scale(original_width, h, original_height)?, h)),
        (w, 0) => Ok((w, scale(original_height, w, original_width)?)),
        (w, h) => match scale(original_height, w, original_width) {
            Ok(tentative_h) if tentative_h <= h => Ok((w, tentative_h)),
            // Taller than the box (or past u32): height binds
            _ => Ok((scale(original_width, h, original_height)?, h)),
        },
    }
}

/// `floor(value * numerator / denominator)` without intermediate overflow.
fn scale(value: u32, numerator: u32, denominator: u32) -> Result<u32, EditorError> {
    let scaled = value as u64 * numerator as u64 / denominator as u64;
    u32::try_from(scaled).map_err(|_| {
        EditorError::InvalidArgument(format!(
            "scaled edge {scaled} exceeds the largest supported dimension"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(ow: u32, oh: u32, tw: u32, th: u32) -> (u32, u32) {
        compute_dimensions(ow, oh, tw, th).unwrap()
    }

    // =========================================================================
    // Single-dimension targets
    // =========================================================================

    #[test]
    fn width_only_scales_height() {
        // 1500 * 1000 / 2000 = 750
        assert_eq!(ok(2000, 1500, 1000, 0), (1000, 750));
    }

    #[test]
    fn height_only_scales_width() {
        // 1500 * 1000 / 2000 = 750
        assert_eq!(ok(1500, 2000, 0, 1000), (750, 1000));
    }

    #[test]
    fn width_only_floors() {
        // 333 * 100 / 1000 = 33.3 → 33
        assert_eq!(ok(1000, 333, 100, 0), (100, 33));
    }

    #[test]
    fn height_only_floors_instead_of_rounding() {
        // 999 * 100 / 1000 = 99.9 → 99, not 100
        assert_eq!(ok(999, 1000, 0, 100), (99, 100));
    }

    #[test]
    fn width_only_matches_formula_across_inputs() {
        for (ow, oh) in [(1, 1), (7, 3), (640, 480), (4000, 3000), (123, 4567)] {
            for w in [1, 2, 17, 100, 1024] {
                let expected = (oh as u64 * w as u64 / ow as u64) as u32;
                assert_eq!(ok(ow, oh, w, 0), (w, expected), "{ow}x{oh} → w={w}");
            }
        }
    }

    #[test]
    fn height_only_matches_formula_across_inputs() {
        for (ow, oh) in [(1, 1), (7, 3), (640, 480), (4000, 3000), (123, 4567)] {
            for h in [1, 2, 17, 100, 1024] {
                let expected = (ow as u64 * h as u64 / oh as u64) as u32;
                assert_eq!(ok(ow, oh, 0, h), (expected, h), "{ow}x{oh} → h={h}");
            }
        }
    }

    #[test]
    fn upscaling_is_allowed() {
        assert_eq!(ok(100, 50, 400, 0), (400, 200));
    }

    // =========================================================================
    // Bounding box
    // =========================================================================

    #[test]
    fn landscape_into_square_box_binds_width() {
        // Tentative 400x300 fits inside 400x400
        assert_eq!(ok(800, 600, 400, 400), (400, 300));
    }

    #[test]
    fn portrait_into_square_box_binds_height() {
        // Tentative 400x533 overflows, fall back to height: 300x400
        assert_eq!(ok(600, 800, 400, 400), (300, 400));
    }

    #[test]
    fn exact_aspect_match_fills_box() {
        assert_eq!(ok(800, 600, 400, 300), (400, 300));
    }

    #[test]
    fn box_result_fits_and_touches_an_edge() {
        for (ow, oh) in [(800, 600), (600, 800), (1, 1000), (1000, 1), (333, 777)] {
            for (w, h) in [(400, 400), (100, 300), (300, 100), (1, 1), (2000, 50)] {
                let (nw, nh) = ok(ow, oh, w, h);
                assert!(nw <= w && nh <= h, "{ow}x{oh} in {w}x{h} gave {nw}x{nh}");
                assert!(nw == w || nh == h, "{ow}x{oh} in {w}x{h} gave {nw}x{nh}");
            }
        }
    }

    #[test]
    fn box_prefers_width_when_height_fits_exactly() {
        // Tentative height equals the bound: width result kept
        assert_eq!(ok(200, 100, 100, 50), (100, 50));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(ok(1234, 567, 300, 200), ok(1234, 567, 300, 200));
    }

    #[test]
    fn large_values_do_not_overflow() {
        assert_eq!(ok(100_000, 50_000, 90_000, 0), (90_000, 45_000));
    }

    // =========================================================================
    // Rejected inputs
    // =========================================================================

    #[test]
    fn both_targets_zero_is_invalid() {
        let err = compute_dimensions(100, 50, 0, 0).unwrap_err();
        assert!(matches!(err, EditorError::InvalidArgument(_)));
    }

    #[test]
    fn zero_original_is_invalid() {
        assert!(matches!(
            compute_dimensions(0, 50, 10, 10),
            Err(EditorError::InvalidArgument(_))
        ));
        assert!(matches!(
            compute_dimensions(50, 0, 10, 10),
            Err(EditorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn scaled_edge_past_u32_is_invalid() {
        assert!(matches!(
            compute_dimensions(2, 1, 0, u32::MAX),
            Err(EditorError::InvalidArgument(_))
        ));
        assert!(matches!(
            compute_dimensions(1, 2, u32::MAX, 0),
            Err(EditorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn box_with_overflowing_tentative_height_binds_height() {
        // Width-first height would be 2 * u32::MAX; the height bound wins
        assert_eq!(ok(1, 2, u32::MAX, 10), (5, 10));
    }

    #[test]
    fn extreme_aspect_can_floor_to_zero() {
        // Pure math: callers decide whether an empty edge is acceptable
        assert_eq!(ok(1000, 1, 10, 0), (10, 0));
    }
}
