//! Conversion from on-screen display coordinates to backing-store pixels.
//!
//! The canvas is usually drawn smaller (or larger) than its pixel grid, so a
//! pointer position reported in CSS pixels must be scaled before it can be
//! used as a pan delta. This is the only place that scaling happens.

use serde::{Deserialize, Serialize};

/// A point in either display or backing-store space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the surface is shown on screen, in display pixels.
///
/// Mirrors what a browser's `getBoundingClientRect()` reports.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Map a display-space point into backing-store pixels.
///
/// `backing_width`/`backing_height` are the surface's pixel dimensions. A
/// degenerate (zero or negative) display extent maps with a scale of 1 on
/// that axis instead of dividing by zero.
pub fn display_to_backing(
    point: Point,
    rect: DisplayRect,
    backing_width: u32,
    backing_height: u32,
) -> Point {
    let scale_x = axis_scale(backing_width, rect.width);
    let scale_y = axis_scale(backing_height, rect.height);

    Point {
        x: (point.x - rect.left) * scale_x,
        y: (point.y - rect.top) * scale_y,
    }
}

#[inline]
fn axis_scale(backing: u32, displayed: f64) -> f64 {
    if displayed > 0.0 && displayed.is_finite() {
        backing as f64 / displayed
    } else {
        1.0
    }
}
