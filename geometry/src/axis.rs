use crate::{Point, Rect, Size};

/// One of the two screen axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// The extent of `size` along this axis.
    pub fn length_of(self, size: Size) -> f64 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    pub fn coord_of(self, point: Point) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    pub fn set_coord(self, point: &mut Point, value: f64) {
        match self {
            Axis::X => point.x = value,
            Axis::Y => point.y = value,
        }
    }

    pub fn start_of(self, rect: &Rect) -> f64 {
        match self {
            Axis::X => rect.left,
            Axis::Y => rect.top,
        }
    }

    pub fn end_of(self, rect: &Rect) -> f64 {
        match self {
            Axis::X => rect.right,
            Axis::Y => rect.bottom,
        }
    }
}
