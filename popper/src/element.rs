use std::fmt;

use perch_geometry::{Placement, Point, Rect, Size};

use crate::{ComputedPosition, MiddlewareData};

/// Anything a floating element can be positioned relative to.
pub trait ReferenceElement: Send + Sync {
    /// The element's current rectangle in the coordinate space of the boundary.
    fn bounding_rect(&self) -> Rect;
}

impl ReferenceElement for Rect {
    fn bounding_rect(&self) -> Rect {
        *self
    }
}

/// A reference that is not backed by an element, like the current cursor position.
pub struct VirtualElement {
    rect: Box<dyn Fn() -> Rect + Send + Sync>,
}

impl VirtualElement {
    pub fn new(rect: impl Fn() -> Rect + Send + Sync + 'static) -> Self {
        Self {
            rect: Box::new(rect),
        }
    }

    /// A zero sized reference at a point.
    pub fn at(point: impl Fn() -> Point + Send + Sync + 'static) -> Self {
        Self::new(move || Rect::new(point(), Size::ZERO))
    }
}

impl fmt::Debug for VirtualElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualElement")
            .field("rect", &(self.rect)())
            .finish()
    }
}

impl ReferenceElement for VirtualElement {
    fn bounding_rect(&self) -> Rect {
        (self.rect)()
    }
}

/// The element that gets positioned.
pub trait FloatingElement: Send {
    /// The element's current size, zero if it is not laid out yet.
    fn size(&self) -> Size;

    /// Moves the element to the computed placement.
    ///
    /// Must not recompute the placement of the popper that positions it.
    fn apply(&mut self, placement: &PlacementResult);
}

/// Where along the floating element's edge the arrow sits.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ArrowOffset {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// The outcome of one placement computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementResult {
    /// Top left corner of the floating element.
    pub coordinates: Point,
    /// The placement used after flipping or auto placement.
    pub resolved_placement: Placement,
    /// `None` if the arrow is disabled or does not fit, the arrow must be hidden then.
    pub arrow_offset: Option<ArrowOffset>,
    /// The width the floating element must be given, set if it should match the reference.
    pub floating_width: Option<f64>,
    /// Everything the middlewares reported, including the data of custom ones.
    pub data: MiddlewareData,
}

impl PlacementResult {
    pub fn new(computed: ComputedPosition, same_width: bool) -> Self {
        let arrow_offset = computed
            .data
            .arrow
            .filter(|arrow| arrow.x.is_some() || arrow.y.is_some())
            .map(|arrow| ArrowOffset {
                x: arrow.x,
                y: arrow.y,
            });
        Self {
            coordinates: computed.coords,
            resolved_placement: computed.placement,
            arrow_offset,
            floating_width: same_width.then_some(computed.floating.width),
            data: computed.data,
        }
    }
}
