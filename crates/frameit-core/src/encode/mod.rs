//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding the rendered composite to PNG
//!
//! # Examples
//!
//! ```ignore
//! use frameit_core::encode::encode_png;
//!
//! let pixels = vec![0u8; 256 * 256 * 4];
//! let png_bytes = encode_png(&pixels, 256, 256).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError, PNG_SIGNATURE};
