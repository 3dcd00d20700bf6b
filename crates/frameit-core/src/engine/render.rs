//! Compositing the cropped photo and the overlay into the output surface.
//!
//! # Algorithm
//!
//! For every pixel of the `size × size` surface:
//! 1. Evaluate the circular clip; fully outside pixels stay transparent
//! 2. Sample the photo at `current_offset + (x, y)` (bilinear when the
//!    offset is fractional, exact copy otherwise)
//! 3. Scale both the photo sample and the fitted overlay pixel by the clip
//!    coverage, then blend the overlay over the photo (source-over)
//!
//! Coverage is applied per layer, as a canvas clip applies it to each
//! `drawImage`. Where two opaque layers overlap a partially covered edge
//! pixel with coverage `c`, the result has alpha `c(2 - c)`.
//!
//! Blending runs on premultiplied floats and converts back to straight
//! RGBA8 at the end, so the output is deterministic for a given state.

use super::clip::CircleClip;
use super::state::ViewState;
use crate::decode::{DecodedImage, CHANNELS};

/// Options for a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Anti-alias the clip edge.
    pub smooth_edge: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { smooth_edge: true }
    }
}

/// RGBA drawing target that the composite is rendered into.
#[derive(Debug, Clone)]
pub struct Surface {
    image: DecodedImage,
}

impl Surface {
    /// A transparent `size × size` surface.
    pub fn new(size: u32) -> Self {
        Self {
            image: DecodedImage::transparent(size, size),
        }
    }

    pub fn size(&self) -> u32 {
        self.image.width
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.image.pixels.fill(0);
    }

    /// Reallocate to `size × size` if the dimensions differ.
    fn fit(&mut self, size: u32) {
        if self.image.width != size || self.image.height != size {
            self.image = DecodedImage::transparent(size, size);
        }
    }

    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn into_image(self) -> DecodedImage {
        self.image
    }
}

/// Draw the clipped composite of `state` onto `surface`.
///
/// The surface is resized to the crop size if needed and always cleared
/// first, so repeated calls never build on earlier output.
pub fn render(state: &ViewState, surface: &mut Surface, options: RenderOptions) {
    let size = state.size();
    surface.fit(size);
    surface.clear();

    let clip = CircleClip::inscribed(size, options.smooth_edge);
    let sampler = PhotoSampler::new(state);
    let overlay = state.overlay();
    let out = &mut surface.image.pixels;

    for y in 0..size {
        for x in 0..size {
            let coverage = clip.coverage(x, y);
            if coverage <= 0.0 {
                continue;
            }

            let photo = scale(premultiply(sampler.sample(x, y)), coverage);
            let top = scale(premultiply(overlay.pixel(x, y)), coverage);
            let composite = source_over(top, photo);

            let idx = (y as usize * size as usize + x as usize) * CHANNELS;
            out[idx..idx + CHANNELS].copy_from_slice(&unpremultiply(composite));
        }
    }
}

/// Render into a fresh surface and return the pixels.
pub fn render_to_image(state: &ViewState, options: RenderOptions) -> DecodedImage {
    let mut surface = Surface::new(state.size());
    render(state, &mut surface, options);
    surface.into_image()
}

/// Reads the photo through the current source rectangle.
struct PhotoSampler<'a> {
    photo: &'a DecodedImage,
    base_x: u32,
    base_y: u32,
    frac_x: f32,
    frac_y: f32,
}

impl<'a> PhotoSampler<'a> {
    fn new(state: &'a ViewState) -> Self {
        let offset = state.current_offset();
        let (base_x, frac_x) = split(offset.x);
        let (base_y, frac_y) = split(offset.y);
        Self {
            photo: state.photo(),
            base_x,
            base_y,
            frac_x,
            frac_y,
        }
    }

    /// Photo color under surface pixel `(x, y)`.
    #[inline]
    fn sample(&self, x: u32, y: u32) -> [u8; 4] {
        let sx = self.base_x + x;
        let sy = self.base_y + y;

        if self.frac_x == 0.0 && self.frac_y == 0.0 {
            return self.photo.pixel(sx, sy);
        }

        // Neighbours clamp at the far edge; the offset bounds keep sx/sy valid
        let sx1 = (sx + 1).min(self.photo.width - 1);
        let sy1 = (sy + 1).min(self.photo.height - 1);

        let p00 = premultiply(self.photo.pixel(sx, sy));
        let p10 = premultiply(self.photo.pixel(sx1, sy));
        let p01 = premultiply(self.photo.pixel(sx, sy1));
        let p11 = premultiply(self.photo.pixel(sx1, sy1));

        let top = lerp(p00, p10, self.frac_x);
        let bottom = lerp(p01, p11, self.frac_x);
        unpremultiply(lerp(top, bottom, self.frac_y))
    }
}

fn split(value: f64) -> (u32, f32) {
    let floor = value.floor();
    (floor as u32, (value - floor) as f32)
}

#[inline]
fn premultiply(rgba: [u8; 4]) -> [f32; 4] {
    let a = rgba[3] as f32 / 255.0;
    [
        rgba[0] as f32 / 255.0 * a,
        rgba[1] as f32 / 255.0 * a,
        rgba[2] as f32 / 255.0 * a,
        a,
    ]
}

#[inline]
fn unpremultiply(p: [f32; 4]) -> [u8; 4] {
    let a = p[3].clamp(0.0, 1.0);
    if a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let channel = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        channel(p[0]),
        channel(p[1]),
        channel(p[2]),
        (a * 255.0).round() as u8,
    ]
}

/// Porter-Duff source-over on premultiplied colors.
#[inline]
fn source_over(src: [f32; 4], dst: [f32; 4]) -> [f32; 4] {
    let keep = 1.0 - src[3];
    [
        src[0] + dst[0] * keep,
        src[1] + dst[1] * keep,
        src[2] + dst[2] * keep,
        src[3] + dst[3] * keep,
    ]
}

#[inline]
fn scale(p: [f32; 4], factor: f32) -> [f32; 4] {
    [p[0] * factor, p[1] * factor, p[2] * factor, p[3] * factor]
}

#[inline]
fn lerp(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{initialize, Offset};

    const HARD: RenderOptions = RenderOptions { smooth_edge: false };

    /// Opaque photo whose red channel encodes x and green encodes y.
    fn coordinate_photo(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn clear_overlay() -> DecodedImage {
        DecodedImage::transparent(4, 4)
    }

    #[test]
    fn test_output_is_crop_sized() {
        let state = initialize(coordinate_photo(40, 30), clear_overlay()).unwrap();
        let out = render_to_image(&state, RenderOptions::default());

        assert_eq!(out.width, 30);
        assert_eq!(out.height, 30);
        assert_eq!(out.pixels.len(), 30 * 30 * 4);
    }

    #[test]
    fn test_outside_circle_transparent() {
        let state = initialize(coordinate_photo(40, 30), clear_overlay()).unwrap();
        let out = render_to_image(&state, RenderOptions::default());

        assert_eq!(out.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(out.pixel(29, 29), [0, 0, 0, 0]);
    }

    #[test]
    fn test_center_shows_photo_at_offset() {
        let state = initialize(coordinate_photo(40, 30), clear_overlay()).unwrap();
        let out = render_to_image(&state, HARD);

        // Origin offset is (5, 0): surface (15, 15) shows photo (20, 15)
        assert_eq!(out.pixel(15, 15), [20, 15, 0, 255]);
    }

    #[test]
    fn test_pan_shifts_content() {
        let mut state = initialize(coordinate_photo(40, 30), clear_overlay()).unwrap();
        state.pan(state.current_offset(), 5.0, 0.0);
        assert_eq!(state.current_offset(), Offset::new(0.0, 0.0));

        let out = render_to_image(&state, HARD);
        assert_eq!(out.pixel(15, 15), [15, 15, 0, 255]);
    }

    #[test]
    fn test_opaque_overlay_wins_inside_circle() {
        let overlay = DecodedImage::new(2, 2, [200u8, 100, 50, 255].repeat(4));
        let state = initialize(coordinate_photo(20, 20), overlay).unwrap();
        let out = render_to_image(&state, HARD);

        assert_eq!(out.pixel(10, 10), [200, 100, 50, 255]);
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_half_transparent_overlay_blends() {
        let photo = DecodedImage::new(10, 10, [0u8, 0, 0, 255].repeat(100));
        let overlay = DecodedImage::new(1, 1, vec![255, 255, 255, 128]);
        let state = initialize(photo, overlay).unwrap();
        let out = render_to_image(&state, HARD);

        let center = out.pixel(5, 5);
        assert_eq!(center[3], 255);
        assert!((center[0] as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_fractional_offset_interpolates() {
        // 3x2 photo: crop 2, origin (0.5, 0)
        let photo = coordinate_photo(3, 2);
        let state = initialize(photo, clear_overlay()).unwrap();
        assert_eq!(state.origin_offset(), Offset::new(0.5, 0.0));

        let mut surface = Surface::new(2);
        render(&state, &mut surface, HARD);
        let px = surface.image().pixel(0, 0);
        // Halfway between red 0 and red 1
        assert!(px[0] <= 1);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_smooth_edge_partial_alpha() {
        let photo = DecodedImage::new(64, 64, [255u8, 255, 255, 255].repeat(64 * 64));
        let state = initialize(photo, clear_overlay()).unwrap();
        let out = render_to_image(&state, RenderOptions { smooth_edge: true });

        let has_partial = out.pixels.chunks(4).any(|p| p[3] > 0 && p[3] < 255);
        assert!(has_partial);
    }

    #[test]
    fn test_edge_coverage_applies_to_each_layer() {
        let photo = DecodedImage::new(64, 64, [255u8, 255, 255, 255].repeat(64 * 64));
        let overlay = DecodedImage::new(1, 1, vec![0, 0, 0, 255]);
        let state = initialize(photo, overlay).unwrap();
        let out = render_to_image(&state, RenderOptions::default());

        let clip = CircleClip::inscribed(64, true);
        let mut edge_pixels = 0;
        for y in 0..64 {
            for x in 0..64 {
                let c = clip.coverage(x, y);
                if c > 0.0 && c < 1.0 {
                    let expected = (c * (2.0 - c) * 255.0).round() as i32;
                    assert!((out.pixel(x, y)[3] as i32 - expected).abs() <= 1);
                    edge_pixels += 1;
                }
            }
        }
        assert!(edge_pixels > 0);
    }

    #[test]
    fn test_edge_alpha_single_layer_is_coverage() {
        let photo = DecodedImage::new(64, 64, [255u8, 255, 255, 255].repeat(64 * 64));
        let state = initialize(photo, clear_overlay()).unwrap();
        let out = render_to_image(&state, RenderOptions::default());

        let clip = CircleClip::inscribed(64, true);
        for y in 0..64 {
            for x in 0..64 {
                let expected = (clip.coverage(x, y) * 255.0).round() as i32;
                assert!((out.pixel(x, y)[3] as i32 - expected).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_repeated_renders_identical() {
        let mut state = initialize(coordinate_photo(50, 30), clear_overlay()).unwrap();
        state.pan(state.current_offset(), 3.0, 0.0);

        let mut surface = Surface::new(30);
        render(&state, &mut surface, RenderOptions::default());
        let first = surface.image().clone();
        render(&state, &mut surface, RenderOptions::default());

        assert_eq!(surface.image(), &first);
        assert_eq!(render_to_image(&state, RenderOptions::default()), first);
    }

    #[test]
    fn test_render_clears_stale_pixels() {
        let state = initialize(coordinate_photo(20, 20), clear_overlay()).unwrap();
        let mut surface = Surface::new(20);
        surface.image.pixels.fill(255);

        render(&state, &mut surface, HARD);
        assert_eq!(surface.image().pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_surface_refit_to_new_size() {
        let state = initialize(coordinate_photo(20, 12), clear_overlay()).unwrap();
        let mut surface = Surface::new(99);

        render(&state, &mut surface, HARD);
        assert_eq!(surface.size(), 12);
    }

    #[test]
    fn test_premultiply_round_trip_opaque() {
        let px = [12, 34, 56, 255];
        assert_eq!(unpremultiply(premultiply(px)), px);
        assert_eq!(unpremultiply([0.0; 4]), [0, 0, 0, 0]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::engine::initialize;
    use proptest::prelude::*;

    proptest! {
        /// Property: the same state always renders the same pixels.
        #[test]
        fn prop_render_deterministic(
            (width, height) in (1u32..=40, 1u32..=40),
            dx in -50.0f64..=50.0,
            dy in -50.0f64..=50.0,
            smooth_edge in any::<bool>(),
        ) {
            let pixels: Vec<u8> = (0..width * height * 4).map(|i| (i * 7 % 256) as u8).collect();
            let photo = DecodedImage::new(width, height, pixels);
            let overlay = DecodedImage::new(2, 1, vec![255, 0, 0, 90, 0, 0, 255, 0]);
            let mut state = initialize(photo, overlay).unwrap();
            state.pan(state.current_offset(), dx, dy);

            let options = RenderOptions { smooth_edge };
            let a = render_to_image(&state, options);
            let b = render_to_image(&state, options);
            prop_assert_eq!(a, b);
        }

        /// Property: pixels whose center is outside the circle are transparent.
        #[test]
        fn prop_corners_transparent(size in 6u32..=48) {
            let photo = DecodedImage::new(size, size, vec![255u8; (size * size * 4) as usize]);
            let overlay = DecodedImage::new(1, 1, vec![255u8; 4]);
            let state = initialize(photo, overlay).unwrap();

            for smooth_edge in [false, true] {
                let out = render_to_image(&state, RenderOptions { smooth_edge });
                prop_assert_eq!(out.pixel(0, 0)[3], 0);
                prop_assert_eq!(out.pixel(size - 1, size - 1)[3], 0);
            }
        }
    }
}
