//! Frameit WASM - WebAssembly bindings for Frameit
//!
//! This crate provides WASM bindings to expose the frameit-core functionality
//! to the editor page.
//!
//! # Module Structure
//!
//! - `editor` - The stateful editor object the page drives
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (PNG, JPEG)
//! - `encode` - Image encoding bindings (PNG export)
//! - `logger` - Forwarding of log records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsFrameEditor } from '@frameit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsFrameEditor();
//! editor.load(photoBytes, overlayBytes);
//! const png = editor.export_png();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod encode;
mod logger;
mod types;

// Re-export public types
pub use decode::{decode_image, decode_overlay};
pub use editor::JsFrameEditor;
pub use encode::{encode_png, encode_png_from_image};
pub use logger::init_logging;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
