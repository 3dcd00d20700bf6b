//! Fitting the overlay onto the crop square.

use image::imageops::FilterType;

use super::{DecodeError, DecodedImage};

/// Stretch an image to a `size × size` square, ignoring aspect ratio.
///
/// This is how the frame overlay is fitted to whatever crop size the photo
/// produced; bilinear matches what a browser canvas does for `drawImage`.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if `size` is zero, and
/// `DecodeError::CorruptedFile` if the source buffer does not match its
/// dimensions.
pub fn stretch_square(image: &DecodedImage, size: u32) -> Result<DecodedImage, DecodeError> {
    if size == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width == size && image.height == size {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba, size, size, FilterType::Triangle);

    Ok(DecodedImage::from_rgba_image(resized))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_stretch_square_from_wide_overlay() {
        let img = create_test_image(300, 100);
        let square = stretch_square(&img, 64).unwrap();

        assert_eq!(square.width, 64);
        assert_eq!(square.height, 64);
        assert_eq!(square.pixels.len(), 64 * 64 * 4);
    }

    #[test]
    fn test_stretch_square_same_size_is_identity() {
        let img = create_test_image(40, 40);
        let square = stretch_square(&img, 40).unwrap();
        assert_eq!(square, img);
    }

    #[test]
    fn test_stretch_square_zero_size_error() {
        let img = create_test_image(100, 50);
        assert!(matches!(
            stretch_square(&img, 0),
            Err(DecodeError::InvalidFormat)
        ));
    }

    #[test]
    fn test_stretch_square_inconsistent_buffer_error() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 12],
        };
        assert!(matches!(
            stretch_square(&img, 5),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_stretch_keeps_uniform_color() {
        let img = DecodedImage::new(8, 8, [9u8, 8, 7, 200].repeat(64));
        let square = stretch_square(&img, 20).unwrap();
        assert!(square.pixels.chunks(4).all(|p| p == [9, 8, 7, 200]));
    }
}
