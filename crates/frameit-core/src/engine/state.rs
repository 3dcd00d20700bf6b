//! View state: the square crop window and its pan offset.
//!
//! # Coordinate System
//!
//! - Offsets are the top-left corner of the `size × size` source rectangle,
//!   in photo pixels (the surface's backing-store space)
//! - Offsets may be fractional; a photo with odd slack centers on a half pixel
//! - Origin is top-left corner

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::decode::{stretch_square, DecodedImage};
use crate::error::{EditorError, Layer, Result};

/// Top-left corner of the source rectangle within the photo.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Everything needed to draw one composite.
///
/// Created by [`initialize`] when a photo finishes loading and replaced
/// wholesale by the next load. Only `current_offset` changes in between.
#[derive(Debug, Clone)]
pub struct ViewState {
    photo: DecodedImage,
    /// Overlay already stretched to `size × size`.
    overlay: DecodedImage,
    size: u32,
    origin_offset: Offset,
    current_offset: Offset,
}

/// Build the view state for a freshly decoded photo and overlay.
///
/// The crop is the largest square that fits the photo, centered on the
/// longer axis. The overlay is fitted to that square once here so every
/// later render reuses it.
///
/// # Errors
///
/// `EditorError::InvalidImage` if either image has a zero dimension or a
/// pixel buffer that does not match its dimensions. Nothing is kept on error.
pub fn initialize(photo: DecodedImage, overlay: DecodedImage) -> Result<ViewState> {
    validate(&photo, Layer::Photo)?;
    validate(&overlay, Layer::Overlay)?;

    let size = photo.width.min(photo.height);
    let origin_offset = Offset::new(
        (photo.width - size) as f64 / 2.0,
        (photo.height - size) as f64 / 2.0,
    );
    let overlay = stretch_square(&overlay, size).map_err(EditorError::decode(Layer::Overlay))?;

    debug!(
        "initialized {}x{} photo: crop size {}, origin ({}, {})",
        photo.width, photo.height, size, origin_offset.x, origin_offset.y
    );

    Ok(ViewState {
        photo,
        overlay,
        size,
        origin_offset,
        current_offset: origin_offset,
    })
}

fn validate(image: &DecodedImage, layer: Layer) -> Result<()> {
    if image.is_empty() || !image.is_consistent() {
        return Err(EditorError::InvalidImage {
            layer,
            width: image.width,
            height: image.height,
        });
    }
    Ok(())
}

#[inline]
fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

impl ViewState {
    pub fn photo(&self) -> &DecodedImage {
        &self.photo
    }

    /// The overlay, fitted to `size × size`.
    pub fn overlay(&self) -> &DecodedImage {
        &self.overlay
    }

    /// Side length of the square crop and of the output surface.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn origin_offset(&self) -> Offset {
        self.origin_offset
    }

    pub fn current_offset(&self) -> Offset {
        self.current_offset
    }

    /// Largest valid offset on each axis; one of the two is always zero.
    pub fn max_offset(&self) -> Offset {
        Offset::new(
            (self.photo.width - self.size) as f64,
            (self.photo.height - self.size) as f64,
        )
    }

    /// Pan the crop window by a drag delta measured from `start`.
    ///
    /// `dx`/`dy` are backing-store pixels since the drag began, and `start`
    /// is the offset snapshotted at that moment. The offset moves against
    /// the pointer so the photo appears to follow it, and the result is
    /// clamped into the photo. Non-finite deltas are ignored.
    pub fn pan(&mut self, start: Offset, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }

        let max = self.max_offset();
        self.current_offset = Offset::new(
            clamp(start.x - dx, 0.0, max.x),
            clamp(start.y - dy, 0.0, max.y),
        );

        trace!(
            "pan ({}, {}) -> offset ({}, {})",
            dx,
            dy,
            self.current_offset.x,
            self.current_offset.y
        );
    }

    /// Restore the centered crop.
    pub fn reset(&mut self) {
        self.current_offset = self.origin_offset;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for photo dimensions (small so buffers stay cheap).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=120, 1u32..=120)
    }

    fn deltas_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((-400.0f64..=400.0, -400.0f64..=400.0), 0..20)
    }

    fn state_for(width: u32, height: u32) -> ViewState {
        let overlay = DecodedImage::new(2, 2, vec![255u8; 16]);
        initialize(DecodedImage::transparent(width, height), overlay).unwrap()
    }

    proptest! {
        /// Property: the crop is the largest centered square.
        #[test]
        fn prop_initial_crop_centered(
            (width, height) in dimensions_strategy(),
        ) {
            let state = state_for(width, height);
            let size = state.size();
            let origin = state.origin_offset();

            prop_assert_eq!(size, width.min(height));
            prop_assert!(size > 0);
            prop_assert!(origin.x + size as f64 <= width as f64);
            prop_assert!(origin.y + size as f64 <= height as f64);
            prop_assert!((origin.x - (width - size) as f64 / 2.0).abs() <= 1.0);
            prop_assert!((origin.y - (height - size) as f64 / 2.0).abs() <= 1.0);
            prop_assert!(origin.x >= 0.0 && origin.y >= 0.0);
        }

        /// Property: no drag sequence escapes the photo bounds.
        #[test]
        fn prop_offset_always_in_bounds(
            (width, height) in dimensions_strategy(),
            drags in deltas_strategy(),
        ) {
            let mut state = state_for(width, height);
            let max = state.max_offset();

            for (dx, dy) in drags {
                let start = state.current_offset();
                state.pan(start, dx, dy);
                let current = state.current_offset();
                prop_assert!(current.x >= 0.0 && current.x <= max.x);
                prop_assert!(current.y >= 0.0 && current.y <= max.y);
            }
        }

        /// Property: reset always restores the origin exactly.
        #[test]
        fn prop_reset_restores_origin(
            (width, height) in dimensions_strategy(),
            drags in deltas_strategy(),
        ) {
            let mut state = state_for(width, height);
            for (dx, dy) in drags {
                let start = state.current_offset();
                state.pan(start, dx, dy);
            }
            state.reset();
            prop_assert_eq!(state.current_offset(), state.origin_offset());
        }

        /// Property: an unclamped pan and its inverse cancel out.
        #[test]
        fn prop_unclamped_round_trip(
            (width, height) in (60u32..=120, 1u32..=40),
            dx in -10.0f64..=10.0,
        ) {
            let mut state = state_for(width, height);
            let origin = state.origin_offset();
            let max = state.max_offset();
            prop_assume!(origin.x - dx >= 0.0 && origin.x - dx <= max.x);

            state.pan(origin, dx, 0.0);
            let moved = state.current_offset();
            state.pan(moved, -dx, 0.0);

            prop_assert!((state.current_offset().x - origin.x).abs() < 1e-9);
            prop_assert_eq!(state.current_offset().y, origin.y);
        }
    }
}
