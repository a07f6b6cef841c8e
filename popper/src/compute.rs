use std::sync::Arc;

use log::{trace, warn};
use perch_geometry::{Alignment, Placement, Point, Rect, Side, Size};

use crate::{Middleware, MiddlewareData, MiddlewareState};

/// The maximum number of times the middlewares may restart one computation.
pub const MAX_RESETS: usize = 50;

/// The position of the floating element after all middlewares ran.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedPosition {
    pub coords: Point,
    pub placement: Placement,
    /// The floating element's size, which middlewares may have changed.
    pub floating: Size,
    pub data: MiddlewareData,
}

/// Places the floating element at `placement` without any further adjustments.
pub fn coords_from_placement(reference: &Rect, floating: Size, placement: Placement) -> Point {
    let center = reference.center();
    let common_x = center.x - floating.width / 2.0;
    let common_y = center.y - floating.height / 2.0;

    let mut coords = match placement.side {
        Side::Top => Point::new(common_x, reference.top - floating.height),
        Side::Bottom => Point::new(common_x, reference.bottom),
        Side::Right => Point::new(reference.right, common_y),
        Side::Left => Point::new(reference.left - floating.width, common_y),
    };

    let axis = placement.cross_axis();
    let common_align = axis.length_of(reference.size()) / 2.0 - axis.length_of(floating) / 2.0;
    let aligned = match placement.alignment {
        Some(Alignment::Start) => axis.coord_of(coords) - common_align,
        Some(Alignment::End) => axis.coord_of(coords) + common_align,
        None => axis.coord_of(coords),
    };
    axis.set_coord(&mut coords, aligned);
    coords
}

/// Runs `middlewares` in order, starting with the floating element at `placement`.
///
/// A middleware that requests a reset restarts the run from the first middleware. The data
/// reported so far is kept.
pub fn compute_position(
    reference: Rect,
    floating: Size,
    boundary: Rect,
    placement: Placement,
    middlewares: &[Arc<dyn Middleware>],
) -> ComputedPosition {
    let mut floating = floating;
    let mut current = placement;
    let mut coords = coords_from_placement(&reference, floating, current);
    let mut data = MiddlewareData::default();
    let mut resets = 0;

    let mut i = 0;
    while let Some(middleware) = middlewares.get(i) {
        let state = MiddlewareState {
            coords,
            initial_placement: placement,
            placement: current,
            reference,
            floating,
            boundary,
            data: &data,
        };
        let output = middleware.apply(&state);

        if let Some(moved) = output.coords {
            coords = moved;
        }
        if let Some(reported) = output.data {
            data.record(middleware.name(), reported);
        }

        match output.reset {
            Some(reset) if resets < MAX_RESETS => {
                resets += 1;
                if let Some(placement) = reset.placement {
                    current = placement;
                }
                if let Some(size) = reset.floating {
                    floating = size;
                }
                coords = coords_from_placement(&reference, floating, current);
                i = 0;
                continue;
            }
            Some(_) => {
                warn!(
                    "Middleware `{}` requested a reset after {MAX_RESETS} resets, ignored",
                    middleware.name()
                );
            }
            None => {}
        }

        i += 1;
    }

    trace!("Computed {current} at {coords:?} after {resets} resets");

    ComputedPosition {
        coords,
        placement: current,
        floating,
        data,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use perch_geometry::{Contains, PlacementOption};

    use super::*;
    use crate::{MiddlewareOutput, PopperConfig, Reset};

    const VIEWPORT: Rect = Rect {
        left: 0.0,
        top: 0.0,
        right: 1000.0,
        bottom: 800.0,
    };

    fn compute(reference: Rect, floating: Size, config: &PopperConfig) -> ComputedPosition {
        compute_position(
            reference,
            floating,
            VIEWPORT,
            config.placement.initial(),
            &config.middlewares(),
        )
    }

    fn config(placement: &str) -> PopperConfig {
        PopperConfig {
            placement: placement.parse().unwrap(),
            arrow: false,
            ..Default::default()
        }
    }

    #[test]
    fn aligns_along_the_cross_axis() {
        let reference = Rect::from((100.0, 100.0, 200.0, 140.0));
        let floating = Size::new(50.0, 20.0);
        let at = |name: &str| coords_from_placement(&reference, floating, name.parse().unwrap());

        assert_eq!(at("bottom"), Point::new(125.0, 140.0));
        assert_eq!(at("bottom-start"), Point::new(100.0, 140.0));
        assert_eq!(at("bottom-end"), Point::new(150.0, 140.0));
        assert_eq!(at("top"), Point::new(125.0, 80.0));
        assert_eq!(at("left-start"), Point::new(50.0, 100.0));
        assert_eq!(at("right-end"), Point::new(200.0, 120.0));
    }

    #[test]
    fn fitting_placement_is_kept() {
        let reference = Rect::from((100.0, 100.0, 200.0, 140.0));
        let position = compute(reference, Size::new(100.0, 100.0), &config("bottom"));
        assert_eq!(position.placement, Placement::BOTTOM);
        assert_eq!(position.coords, Point::new(100.0, 148.0));
        assert_eq!(position.data.flip, None);
    }

    #[test]
    fn flips_to_the_top_near_the_bottom_edge() {
        let reference = Rect::from((100.0, 700.0, 200.0, 740.0));
        let floating = Size::new(100.0, 100.0);
        let position = compute(reference, floating, &config("bottom"));

        assert_eq!(position.placement, Placement::TOP);
        assert_relative_eq!(position.coords.y, 592.0);
        assert!(VIEWPORT.contains(&Rect::new(position.coords, floating)));
        let flip = position.data.flip.unwrap_or_default();
        assert_eq!(flip.overflows, [(Placement::BOTTOM, 48.0)]);
    }

    #[test]
    fn least_overflow_wins_when_nothing_fits() {
        // 300 above, 60 below.
        let reference = Rect::from((100.0, 300.0, 200.0, 740.0));
        let position = compute(reference, Size::new(100.0, 400.0), &config("bottom"));
        assert_eq!(position.placement, Placement::TOP);

        let reference = Rect::from((100.0, 60.0, 200.0, 500.0));
        let position = compute(reference, Size::new(100.0, 400.0), &config("bottom"));
        assert_eq!(position.placement, Placement::BOTTOM);
    }

    #[test]
    fn auto_picks_side_with_most_space() {
        let reference = Rect::from((850.0, 350.0, 900.0, 400.0));
        let position = compute(reference, Size::new(100.0, 40.0), &config("auto"));
        assert_eq!(position.placement, Placement::LEFT);
        assert_relative_eq!(position.coords.x, 850.0 - 8.0 - 100.0);

        let reference = Rect::from((450.0, 40.0, 550.0, 60.0));
        let position = compute(reference, Size::new(100.0, 40.0), &config("auto-start"));
        assert_eq!(position.placement, "bottom-start".parse::<Placement>().unwrap());
        let auto = position.data.auto_placement.unwrap_or_default();
        assert_eq!(auto.overflows.len(), 4);
    }

    #[test]
    fn auto_ties_keep_clockwise_order() {
        let config = PopperConfig {
            placement: PlacementOption::Auto(None),
            arrow: false,
            ..Default::default()
        };
        let reference = Rect::from((450.0, 450.0, 550.0, 550.0));
        let floating = Size::new(100.0, 100.0);
        let position = compute_position(
            reference,
            floating,
            Rect::from((0.0, 0.0, 1000.0, 1000.0)),
            config.placement.initial(),
            &config.middlewares(),
        );
        // 350 on every side.
        assert_eq!(position.placement, Placement::TOP);
    }

    #[test]
    fn shift_keeps_floating_inside() {
        let reference = Rect::from((10.0, 100.0, 40.0, 120.0));
        let floating = Size::new(200.0, 50.0);
        let position = compute(reference, floating, &config("bottom"));
        assert_eq!(position.coords, Point::new(0.0, 128.0));
        assert_eq!(position.data.shift, Some(Point::new(75.0, 0.0)));
    }

    #[test]
    fn same_width_resets_with_reference_width() {
        let config = PopperConfig {
            same_width: true,
            ..config("bottom")
        };
        let reference = Rect::from((100.0, 100.0, 300.0, 140.0));
        let position = compute(reference, Size::new(50.0, 20.0), &config);
        assert_eq!(position.floating, Size::new(200.0, 20.0));
        assert_eq!(position.coords, Point::new(100.0, 148.0));
    }

    #[test]
    fn arrow_is_dropped_when_it_does_not_fit() {
        let config = PopperConfig {
            arrow: true,
            arrow_size: 16.0,
            arrow_padding: 8.0,
            ..config("bottom")
        };
        let reference = Rect::from((100.0, 100.0, 200.0, 140.0));
        let position = compute(reference, Size::new(30.0, 30.0), &config);
        let arrow = position.data.arrow.unwrap_or_default();
        assert_eq!((arrow.x, arrow.y), (None, None));

        let position = compute(reference, Size::new(32.0, 30.0), &config);
        assert_eq!(position.data.arrow.and_then(|a| a.x), Some(8.0));
    }

    #[test]
    fn zero_sized_floating_sits_at_the_reference_edge() {
        let reference = Rect::from((100.0, 100.0, 200.0, 140.0));
        let position = compute(reference, Size::ZERO, &config("bottom"));
        assert_eq!(position.coords, Point::new(150.0, 148.0));
    }

    #[derive(Debug)]
    struct AlwaysReset;

    impl Middleware for AlwaysReset {
        fn name(&self) -> &str {
            "always-reset"
        }

        fn apply(&self, _state: &MiddlewareState<'_>) -> MiddlewareOutput {
            MiddlewareOutput {
                reset: Some(Reset::placement(Placement::TOP)),
                ..Default::default()
            }
        }
    }

    #[test]
    fn resets_are_bounded() {
        let middlewares: Vec<Arc<dyn Middleware>> = vec![Arc::new(AlwaysReset)];
        let position = compute_position(
            Rect::from((100.0, 100.0, 200.0, 140.0)),
            Size::new(10.0, 10.0),
            VIEWPORT,
            Placement::BOTTOM,
            &middlewares,
        );
        assert_eq!(position.placement, Placement::TOP);
    }
}
