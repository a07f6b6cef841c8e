use log::debug;
use perch_geometry::{Placement, SideOffsetsExtensions};

use super::{Data, Middleware, MiddlewareOutput, MiddlewareState, Reset};

/// Moves the floating element to the opposite side of the reference if it overflows the boundary
/// along its main axis.
///
/// If neither side fits, the side with the least overflow wins.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Flip {
    /// Space to keep to the boundary.
    pub padding: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlipData {
    /// Index into the candidate list of the placement that is currently tried.
    pub index: usize,
    /// Main axis overflow of every placement tried so far.
    pub overflows: Vec<(Placement, f64)>,
}

impl Middleware for Flip {
    fn name(&self) -> &str {
        "flip"
    }

    fn apply(&self, state: &MiddlewareState<'_>) -> MiddlewareOutput {
        let placement = state.placement;
        let overflow = state.overflow(self.padding).side(placement.side);
        if overflow <= 0.0 {
            return MiddlewareOutput::default();
        }

        let candidates = [state.initial_placement, state.initial_placement.opposite()];
        let previous = state.data.flip.clone().unwrap_or_default();
        let mut overflows = previous.overflows;
        overflows.push((placement, overflow));

        let next = previous.index + 1;
        if let Some(&next_placement) = candidates.get(next) {
            debug!("{placement} overflows by {overflow}, trying {next_placement}");
            return MiddlewareOutput {
                reset: Some(Reset::placement(next_placement)),
                ..Default::default()
            }
            .with_data(Data::Flip(FlipData {
                index: next,
                overflows,
            }));
        }

        // Nothing fits: use the first placement with the least overflow.
        let best = overflows
            .iter()
            .copied()
            .reduce(|best, candidate| if candidate.1 < best.1 { candidate } else { best })
            .map(|(placement, _)| placement)
            .unwrap_or(placement);

        let output = MiddlewareOutput::default().with_data(Data::Flip(FlipData {
            index: next,
            overflows,
        }));

        if best != placement {
            debug!("No placement fits, falling back to {best}");
            return MiddlewareOutput {
                reset: Some(Reset::placement(best)),
                ..output
            };
        }
        output
    }
}
