use perch_geometry::{Axis, Vector};

use super::{Data, Middleware, MiddlewareOutput, MiddlewareState};

/// Pushes the floating element away from the reference along the main axis and moves it along
/// the cross axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Offset {
    pub main_axis: f64,
    pub cross_axis: f64,
}

impl Middleware for Offset {
    fn name(&self) -> &str {
        "offset"
    }

    fn apply(&self, state: &MiddlewareState<'_>) -> MiddlewareOutput {
        let side = state.placement.side;
        let main = if side.is_leading() {
            -self.main_axis
        } else {
            self.main_axis
        };
        let delta = match side.main_axis() {
            Axis::Y => Vector::new(self.cross_axis, main),
            Axis::X => Vector::new(main, self.cross_axis),
        };
        MiddlewareOutput::moved_to(state.coords + delta).with_data(Data::Offset(delta))
    }
}
