//! Frameit Core - profile photo framing library
//!
//! This crate provides the core functionality for Frameit: decoding a photo
//! and a decorative frame, choosing a square crop, panning it by dragging,
//! compositing both layers inside a circle, and exporting the result as PNG.
//!
//! # Module Structure
//!
//! - `decode` - PNG/JPEG decoding to RGBA, overlay fitting
//! - `encode` - PNG export
//! - `engine` - Crop/pan state and the circular composite
//! - `session` - The editor lifecycle the page drives
//! - `config` - Editor options
//!
//! # Example
//!
//! ```ignore
//! use frameit_core::{Editor, Point};
//!
//! let mut editor = Editor::default();
//! editor.load_bytes(&photo_bytes, &overlay_bytes)?;
//!
//! editor.pointer_down(Point::new(100.0, 100.0));
//! editor.pointer_move(Point::new(140.0, 100.0));
//! editor.pointer_up();
//!
//! let png = editor.export_png()?;
//! ```

pub mod config;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod error;
pub mod session;

pub use config::{EditorConfig, DEFAULT_EXPORT_FILENAME};
pub use decode::{DecodeError, DecodedImage};
pub use encode::EncodeError;
pub use engine::{
    display_to_backing, initialize, render, render_to_image, DisplayRect, DragSession, Offset,
    Point, RenderOptions, Surface, ViewState,
};
pub use error::{EditorError, Layer, Result};
pub use session::{Editor, LoadTicket};
