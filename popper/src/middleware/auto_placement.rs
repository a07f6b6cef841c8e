use log::debug;
use perch_geometry::{Alignment, Placement, Rect, Side, SideOffsetsExtensions, detect_overflow};

use super::{Data, Middleware, MiddlewareOutput, MiddlewareState, Reset};
use crate::coords_from_placement;

/// Chooses the side of the reference with the most space for the floating element.
///
/// All four sides are evaluated with the given alignment. Ties resolve to the earlier side in
/// clockwise order starting at the top.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct AutoPlacement {
    pub alignment: Option<Alignment>,
    pub padding: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutoPlacementData {
    /// Index of the chosen placement in `overflows`.
    pub index: usize,
    /// Main axis overflow of every candidate.
    pub overflows: Vec<(Placement, f64)>,
}

impl AutoPlacement {
    pub fn candidates(&self) -> impl Iterator<Item = Placement> + '_ {
        Side::ALL
            .into_iter()
            .map(|side| Placement::new(side, self.alignment))
    }
}

impl Middleware for AutoPlacement {
    fn name(&self) -> &str {
        "autoPlacement"
    }

    fn apply(&self, state: &MiddlewareState<'_>) -> MiddlewareOutput {
        let overflows: Vec<(Placement, f64)> = self
            .candidates()
            .map(|placement| {
                let coords = coords_from_placement(&state.reference, state.floating, placement);
                let rect = Rect::new(coords, state.floating);
                let overflow = detect_overflow(&rect, &state.boundary, self.padding);
                (placement, overflow.side(placement.side))
            })
            .collect();

        // Least overflow is most available space.
        let mut index = 0;
        for (i, (_, overflow)) in overflows.iter().enumerate() {
            if *overflow < overflows[index].1 {
                index = i;
            }
        }
        let chosen = overflows[index].0;

        let output =
            MiddlewareOutput::default().with_data(Data::AutoPlacement(AutoPlacementData {
                index,
                overflows,
            }));

        if chosen != state.placement {
            debug!("Auto placement chose {chosen}");
            return MiddlewareOutput {
                reset: Some(Reset::placement(chosen)),
                ..output
            };
        }
        output
    }
}
