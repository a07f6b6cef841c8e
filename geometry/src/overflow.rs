//! How far a rectangle sticks out of a boundary.

use crate::{Rect, Side};

/// Per side overflow. Positive values are overflowing by that amount, negative values are the
/// space left before the boundary is reached.
pub type SideOffsets = euclid::SideOffsets2D<f64, euclid::UnknownUnit>;

pub trait SideOffsetsExtensions {
    fn side(&self, side: Side) -> f64;

    /// Sum of all positive overflows.
    fn total_overflow(&self) -> f64;

    /// `true` if the rectangle fits on all sides.
    fn fits(&self) -> bool;
}

impl SideOffsetsExtensions for SideOffsets {
    fn side(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    fn total_overflow(&self) -> f64 {
        Side::ALL
            .into_iter()
            .map(|side| self.side(side).max(0.0))
            .sum()
    }

    fn fits(&self) -> bool {
        Side::ALL.into_iter().all(|side| self.side(side) <= 0.0)
    }
}

/// Computes the overflow of `element` relative to `boundary`, where `padding` shrinks the
/// boundary on all sides.
pub fn detect_overflow(element: &Rect, boundary: &Rect, padding: f64) -> SideOffsets {
    SideOffsets::new(
        boundary.top - element.top + padding,
        element.right - boundary.right + padding,
        element.bottom - boundary.bottom + padding,
        boundary.left - element.left + padding,
    )
}
