//! Placement rules.
//!
//! A computation runs the rules in order. Each rule sees the running coordinates and the data the
//! previous rules reported and may move the floating element, report data, or reset the
//! computation with a different placement or floating size.

mod arrow;
mod auto_placement;
mod flip;
mod offset;
mod same_width;
mod shift;

use std::{collections::HashMap, fmt};

pub use arrow::*;
pub use auto_placement::*;
pub use flip::*;
pub use offset::*;
pub use same_width::*;
pub use shift::*;

use perch_geometry::{Placement, Point, Rect, SideOffsets, Size, Vector, detect_overflow};

pub trait Middleware: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, state: &MiddlewareState<'_>) -> MiddlewareOutput;
}

/// What a middleware sees.
#[derive(Debug, Clone)]
pub struct MiddlewareState<'a> {
    /// The current top left position of the floating element.
    pub coords: Point,
    pub initial_placement: Placement,
    pub placement: Placement,
    pub reference: Rect,
    pub floating: Size,
    pub boundary: Rect,
    pub data: &'a MiddlewareData,
}

impl MiddlewareState<'_> {
    pub fn floating_rect(&self) -> Rect {
        Rect::new(self.coords, self.floating)
    }

    pub fn overflow(&self, padding: f64) -> SideOffsets {
        detect_overflow(&self.floating_rect(), &self.boundary, padding)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiddlewareOutput {
    /// The new position, `None` keeps the current one.
    pub coords: Option<Point>,
    pub data: Option<Data>,
    pub reset: Option<Reset>,
}

impl MiddlewareOutput {
    pub fn moved_to(coords: Point) -> Self {
        Self {
            coords: Some(coords),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Data) -> Self {
        self.data = Some(data);
        self
    }
}

/// Restarts the computation from the first middleware.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Reset {
    pub placement: Option<Placement>,
    pub floating: Option<Size>,
}

impl Reset {
    pub fn placement(placement: Placement) -> Self {
        Self {
            placement: Some(placement),
            floating: None,
        }
    }

    pub fn floating(floating: Size) -> Self {
        Self {
            placement: None,
            floating: Some(floating),
        }
    }
}

/// Data a middleware reports.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Offset(Vector),
    Flip(FlipData),
    AutoPlacement(AutoPlacementData),
    Shift(Vector),
    Arrow(ArrowData),
    /// Data of caller supplied middlewares, stored under the middleware's name.
    Custom(serde_json::Value),
}

/// Everything reported by the middlewares of one computation. It survives resets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiddlewareData {
    pub offset: Option<Vector>,
    pub flip: Option<FlipData>,
    pub auto_placement: Option<AutoPlacementData>,
    pub shift: Option<Vector>,
    pub arrow: Option<ArrowData>,
    pub custom: HashMap<String, serde_json::Value>,
}

impl MiddlewareData {
    pub(crate) fn record(&mut self, name: &str, data: Data) {
        match data {
            Data::Offset(v) => self.offset = Some(v),
            Data::Flip(flip) => self.flip = Some(flip),
            Data::AutoPlacement(auto) => self.auto_placement = Some(auto),
            Data::Shift(v) => self.shift = Some(v),
            Data::Arrow(arrow) => self.arrow = Some(arrow),
            Data::Custom(value) => {
                self.custom.insert(name.to_string(), value);
            }
        }
    }
}
