//! Geometry primitives and placement math shared by the gesture recognizer and the floating
//! position engine.

mod axis;
mod overflow;
mod placement;
mod point;
mod rect;
mod size;

pub use axis::*;
pub use overflow::*;
pub use placement::*;
pub use point::*;
pub use rect::*;
pub use size::*;

pub trait Contains<Other> {
    fn contains(&self, other: Other) -> bool;
}

/// Clamps `value` into `min..=max`. Unlike [`f64::clamp`], this does not panic when `min > max`,
/// `min` wins then.
pub fn clamp(min: f64, value: f64, max: f64) -> f64 {
    min.max(value.min(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_prefers_min() {
        assert_eq!(clamp(0.0, 5.0, 10.0), 5.0);
        assert_eq!(clamp(0.0, -5.0, 10.0), 0.0);
        assert_eq!(clamp(0.0, 15.0, 10.0), 10.0);
        assert_eq!(clamp(10.0, 5.0, 0.0), 10.0);
    }
}
