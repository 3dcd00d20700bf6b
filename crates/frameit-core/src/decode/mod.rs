//! Image decoding for the photo and the frame overlay.
//!
//! This module provides functionality for:
//! - Decoding PNG and JPEG images to RGBA
//! - Applying EXIF orientation to camera photos
//! - Stretching the overlay to the crop size
//!
//! # Architecture
//!
//! Decoding is synchronous and single-threaded. The browser side reads the
//! file and fetches the overlay asynchronously, then hands both byte buffers
//! over in one call.
//!
//! # Examples
//!
//! ```ignore
//! use frameit_core::decode::decode_image;
//!
//! let bytes = std::fs::read("portrait.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, decode_image_no_orientation};
pub use resize::stretch_square;
pub use types::{DecodeError, DecodedImage, CHANNELS};
