use std::time::{Duration, Instant};

use perch_geometry::{Axis, Point, Vector};

use crate::Subscriptions;

/// The state of one pressed pointer sequence.
///
/// Touch events carry a copy of it, so consumers see the gesture as it was at the time the
/// event was emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    /// Where the sequence started.
    pub start: Point,
    pub started_at: Instant,
    /// Time since `started_at` at the most recent event.
    pub duration: Duration,
    /// The axis the gesture got locked to. Once set, it does not change anymore.
    pub axis: Option<Axis>,
    pub is_slide_x: bool,
    pub is_slide_y: bool,
    /// The most recent position while sliding.
    pub current: Point,
    /// `current - start`.
    pub shift: Vector,
    pub shift_abs: Vector,
}

impl Gesture {
    pub fn new(start: Point, started_at: Instant) -> Self {
        Self {
            start,
            started_at,
            duration: Duration::ZERO,
            axis: None,
            is_slide_x: false,
            is_slide_y: false,
            current: start,
            shift: Vector::ZERO,
            shift_abs: Vector::ZERO,
        }
    }

    pub fn is_x(&self) -> bool {
        self.axis == Some(Axis::X)
    }

    pub fn is_y(&self) -> bool {
        self.axis == Some(Axis::Y)
    }

    pub fn is_slide(&self) -> bool {
        self.is_slide_x || self.is_slide_y
    }

    pub(crate) fn touch_time(&mut self, now: Instant) {
        self.duration = now.saturating_duration_since(self.started_at);
    }

    /// Locks the axis if the shift passed `threshold` along one axis and is larger than along the
    /// other one.
    ///
    /// Returns the locked axis if it got locked by this call.
    pub(crate) fn try_lock_axis(
        &mut self,
        shift_abs: Vector,
        threshold: f64,
        subscriptions: Subscriptions,
    ) -> Option<Axis> {
        if self.axis.is_some() {
            return None;
        }

        let axis = if shift_abs.x >= threshold && shift_abs.x > shift_abs.y {
            Axis::X
        } else if shift_abs.y >= threshold && shift_abs.y > shift_abs.x {
            Axis::Y
        } else {
            return None;
        };

        self.axis = Some(axis);
        self.is_slide_x = axis == Axis::X && subscriptions.slides_x();
        self.is_slide_y = axis == Axis::Y && subscriptions.slides_y();
        Some(axis)
    }

    pub(crate) fn slide_to(&mut self, current: Point) {
        self.current = current;
        self.shift = current - self.start;
        self.shift_abs = self.shift.abs();
    }
}
