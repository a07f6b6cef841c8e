use super::{Middleware, MiddlewareOutput, MiddlewareState, Reset};

/// Gives the floating element the width of the reference.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SameWidth;

impl Middleware for SameWidth {
    fn name(&self) -> &str {
        "size"
    }

    fn apply(&self, state: &MiddlewareState<'_>) -> MiddlewareOutput {
        let width = state.reference.width();
        if state.floating.width == width {
            return MiddlewareOutput::default();
        }
        // The previous rules worked with the old width, so they have to run again.
        MiddlewareOutput {
            reset: Some(Reset::floating(state.floating.with_width(width))),
            ..Default::default()
        }
    }
}
