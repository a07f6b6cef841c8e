use perch_geometry::{Axis, Side, SideOffsetsExtensions, clamp};

use super::{Data, Middleware, MiddlewareOutput, MiddlewareState};

/// Slides the floating element along the cross axis to keep it inside the boundary.
///
/// The shift is limited so that the floating element always stays adjacent to the reference: at
/// the limits, their edges touch.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Shift {
    pub padding: f64,
}

impl Middleware for Shift {
    fn name(&self) -> &str {
        "shift"
    }

    fn apply(&self, state: &MiddlewareState<'_>) -> MiddlewareOutput {
        let axis = state.placement.cross_axis();
        let overflow = state.overflow(self.padding);
        let (min_side, max_side) = match axis {
            Axis::X => (Side::Left, Side::Right),
            Axis::Y => (Side::Top, Side::Bottom),
        };

        let coord = axis.coord_of(state.coords);
        let shifted = clamp(
            coord + overflow.side(min_side),
            coord,
            coord - overflow.side(max_side),
        );

        let length = axis.length_of(state.floating);
        let limited = clamp(
            axis.start_of(&state.reference) - length,
            shifted,
            axis.end_of(&state.reference),
        );

        let mut coords = state.coords;
        axis.set_coord(&mut coords, limited);
        MiddlewareOutput::moved_to(coords).with_data(Data::Shift(coords - state.coords))
    }
}
