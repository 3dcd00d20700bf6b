//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a PNG or JPEG photo, applying EXIF orientation
//! - [`decode_overlay`] - Decode the frame overlay as authored
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@frameit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsDecodedImage;
use frameit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a photo from bytes into RGBA.
///
/// # Errors
///
/// Returns an error if the bytes are empty, not a recognized format, or
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode the overlay asset into RGBA without EXIF handling.
#[wasm_bindgen]
pub fn decode_overlay(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image_no_orientation(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
