use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::{Contains, Point, Size, Vector};

/// A basic rectangle representation. Meant to be sorted and with finite values only.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    #[must_use]
    pub fn new(origin: impl Into<Point>, size: impl Into<Size>) -> Self {
        (origin.into(), size.into()).into()
    }

    #[must_use]
    pub fn from_size(size: impl Into<Size>) -> Self {
        let size = size.into();
        (Point::default(), size).into()
    }

    pub fn is_empty(&self) -> bool {
        // We write it as the NOT of a non-empty rect, so we will return true if any values
        // are NaN.
        !(self.left < self.right && self.top < self.bottom)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        (self.width(), self.height()).into()
    }

    pub fn origin(&self) -> Point {
        (self.left, self.top).into()
    }

    pub fn center(&self) -> Point {
        (
            self.left * 0.5 + self.right * 0.5,
            self.top * 0.5 + self.bottom * 0.5,
        )
            .into()
    }

    /// The same origin with a different size.
    #[must_use]
    pub fn with_size(&self, size: impl Into<Size>) -> Self {
        Self::new(self.origin(), size)
    }

    pub fn intersects(&self, other: impl Into<Self>) -> bool {
        let other = other.into();
        let l = self.left.max(other.left);
        let r = self.right.min(other.right);
        let t = self.top.max(other.top);
        let b = self.bottom.min(other.bottom);
        l < r && t < b
    }

    /// The overlapping area of both rectangles, `None` if they don't overlap.
    pub fn intersection(&self, other: impl Into<Self>) -> Option<Self> {
        let other = other.into();
        self.intersects(other).then(|| {
            (
                self.left.max(other.left),
                self.top.max(other.top),
                self.right.min(other.right),
                self.bottom.min(other.bottom),
            )
                .into()
        })
    }
}

impl From<(f64, f64, f64, f64)> for Rect {
    fn from((left, top, right, bottom): (f64, f64, f64, f64)) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        Self::from_size(size)
    }
}

impl From<(Point, Size)> for Rect {
    fn from((origin, size): (Point, Size)) -> Self {
        let rb = origin + size;
        (origin, rb).into()
    }
}

impl From<(Point, Point)> for Rect {
    fn from((origin, end): (Point, Point)) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: end.x,
            bottom: end.y,
        }
    }
}

impl Add<Vector> for Rect {
    type Output = Self;

    fn add(self, d: Vector) -> Self::Output {
        Self {
            left: self.left + d.x,
            top: self.top + d.y,
            right: self.right + d.x,
            bottom: self.bottom + d.y,
        }
    }
}

impl Sub<Vector> for Rect {
    type Output = Self;

    fn sub(self, d: Vector) -> Self::Output {
        Self {
            left: self.left - d.x,
            top: self.top - d.y,
            right: self.right - d.x,
            bottom: self.bottom - d.y,
        }
    }
}

/// Containment with touching edges counting as inside, so that a floating element placed flush
/// against the boundary is contained.
impl Contains<&Rect> for Rect {
    fn contains(&self, r: &Rect) -> bool {
        self.left <= r.left && self.top <= r.top && self.right >= r.right && self.bottom >= r.bottom
    }
}
