//! Circular clip region for the composite.
//!
//! Coverage is evaluated at pixel centers and returns 0.0 (outside) to 1.0
//! (inside). With a smooth edge, pixels straddling the circle get partial
//! coverage over a one-pixel band, the way a canvas arc clip anti-aliases.

/// A circle inscribed in a `size × size` square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleClip {
    center: f64,
    radius: f64,
    smooth: bool,
}

impl CircleClip {
    /// Circle of diameter `size` centered at `(size / 2, size / 2)`.
    pub fn inscribed(size: u32, smooth: bool) -> Self {
        let radius = size as f64 / 2.0;
        Self {
            center: radius,
            radius,
            smooth,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Fraction of pixel `(x, y)` that lies inside the circle.
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        let dx = x as f64 + 0.5 - self.center;
        let dy = y as f64 + 0.5 - self.center;
        let dist = (dx * dx + dy * dy).sqrt();

        if self.smooth {
            (self.radius - dist + 0.5).clamp(0.0, 1.0) as f32
        } else if dist <= self.radius {
            1.0
        } else {
            0.0
        }
    }
}
