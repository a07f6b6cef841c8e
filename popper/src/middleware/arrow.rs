use perch_geometry::{Axis, clamp};

use super::{Data, Middleware, MiddlewareOutput, MiddlewareState};

/// Positions an arrow on the edge of the floating element that faces the reference, pointing at
/// the reference's center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Arrow {
    /// Length of the arrow along the edge.
    pub size: f64,
    /// Minimum distance between the arrow and the corners of the floating element.
    pub padding: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ArrowData {
    /// Offset from the left edge, set for top and bottom placements.
    pub x: Option<f64>,
    /// Offset from the top edge, set for left and right placements.
    pub y: Option<f64>,
    /// How far the arrow had to be moved away from the reference's center.
    pub center_offset: f64,
}

impl Arrow {
    /// The arrow's offset along an edge of `length`, `None` if it does not fit between the
    /// paddings.
    pub fn offset(&self, length: f64, center: f64) -> Option<f64> {
        let min = self.padding;
        let max = length - self.size - self.padding;
        (max >= min).then(|| clamp(min, center, max))
    }
}

impl Middleware for Arrow {
    fn name(&self) -> &str {
        "arrow"
    }

    fn apply(&self, state: &MiddlewareState<'_>) -> MiddlewareOutput {
        let axis = state.placement.cross_axis();
        let length = axis.length_of(state.floating);
        let coord = axis.coord_of(state.coords);
        let reference_start = axis.start_of(&state.reference);
        let reference_end = axis.end_of(&state.reference);

        let end_diff = reference_end - coord - length;
        let start_diff = coord - reference_start;
        let center_to_reference = end_diff / 2.0 - start_diff / 2.0;
        let center = length / 2.0 - self.size / 2.0 + center_to_reference;

        let offset = self.offset(length, center);
        let data = ArrowData {
            x: offset.filter(|_| axis == Axis::X),
            y: offset.filter(|_| axis == Axis::Y),
            center_offset: offset.map(|offset| center - offset).unwrap_or_default(),
        };
        MiddlewareOutput::default().with_data(Data::Arrow(data))
    }
}
