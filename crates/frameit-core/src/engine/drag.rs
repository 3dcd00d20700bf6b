//! Pointer drag tracking for panning.

use super::coords::Point;
use super::state::{Offset, ViewState};

/// One press-move-release gesture.
///
/// Holds the pointer position and the crop offset captured at press time.
/// Every move pans by the total distance from that anchor, so repeated
/// clamping at an edge never accumulates drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    anchor: Point,
    start_offset: Offset,
}

impl DragSession {
    /// Start a drag at `pointer` (backing-store coordinates).
    pub fn begin(state: &ViewState, pointer: Point) -> Self {
        Self {
            anchor: pointer,
            start_offset: state.current_offset(),
        }
    }

    /// Apply the pointer's new position and return the resulting offset.
    pub fn update(&self, state: &mut ViewState, pointer: Point) -> Offset {
        let dx = pointer.x - self.anchor.x;
        let dy = pointer.y - self.anchor.y;
        state.pan(self.start_offset, dx, dy);
        state.current_offset()
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn start_offset(&self) -> Offset {
        self.start_offset
    }
}
