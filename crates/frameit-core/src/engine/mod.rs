//! Crop, pan and composite engine.
//!
//! This module owns the model behind the editor canvas:
//!
//! - [`initialize`] picks the largest centered square crop of a photo
//! - [`ViewState::pan`] moves the crop window by a drag delta, clamped to
//!   the photo
//! - [`ViewState::reset`] restores the centered crop
//! - [`render`] draws the photo region and the overlay inside a circle
//!
//! # Coordinate System
//!
//! All engine coordinates are backing-store pixels of the output surface,
//! which for this engine are also photo pixels. Pointer positions in
//! display space go through [`display_to_backing`] first.

mod clip;
mod coords;
mod drag;
mod render;
mod state;

pub use clip::CircleClip;
pub use coords::{display_to_backing, DisplayRect, Point};
pub use drag::DragSession;
pub use render::{render, render_to_image, RenderOptions, Surface};
pub use state::{initialize, Offset, ViewState};
