use std::time::Instant;

use perch_geometry::Point;

/// The device class that produced a pointer stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One contact point of a pointer event. Coordinates may be missing in malformed events.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Contact {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Contact {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// The contact's position, missing coordinates read as `0`.
    pub fn pos(&self) -> Point {
        Point::new(self.x.unwrap_or_default(), self.y.unwrap_or_default())
    }
}

impl From<Point> for Contact {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// What a handler decided about the further processing of an event by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Interception {
    pub propagation_stopped: bool,
    pub default_prevented: bool,
}

impl Interception {
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// A raw pointer event as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub phase: PointerPhase,
    /// All contacts currently on the surface. Mouse events always carry exactly one.
    pub contacts: Vec<Contact>,
    pub time: Instant,
    pub interception: Interception,
}

impl PointerEvent {
    pub fn new(
        kind: PointerKind,
        phase: PointerPhase,
        pos: impl Into<Point>,
        time: Instant,
    ) -> Self {
        Self {
            kind,
            phase,
            contacts: vec![pos.into().into()],
            time,
            interception: Interception::default(),
        }
    }

    pub fn mouse(phase: PointerPhase, pos: impl Into<Point>, time: Instant) -> Self {
        Self::new(PointerKind::Mouse, phase, pos, time)
    }

    pub fn touch(phase: PointerPhase, pos: impl Into<Point>, time: Instant) -> Self {
        Self::new(PointerKind::Touch, phase, pos, time)
    }

    #[must_use]
    pub fn with_contacts(mut self, contacts: impl IntoIterator<Item = Contact>) -> Self {
        self.contacts = contacts.into_iter().collect();
        self
    }

    /// The position of the primary contact, `0/0` if there is none.
    pub fn pos(&self) -> Point {
        self.contacts
            .first()
            .map(Contact::pos)
            .unwrap_or_default()
    }

    /// `true` if more than one contact point is down.
    pub fn is_multi_touch(&self) -> bool {
        self.contacts.len() > 1
    }

    pub fn stop_propagation(&mut self) {
        self.interception.stop_propagation();
    }

    pub fn prevent_default(&mut self) {
        self.interception.prevent_default();
    }
}

/// A native click that arrives after a pointer sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickEvent {
    pub interception: Interception,
}

/// The element a native drag was started on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Anchor,
    Image,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragStartEvent {
    pub target: DragTarget,
    pub interception: Interception,
}

impl DragStartEvent {
    pub fn new(target: DragTarget) -> Self {
        Self {
            target,
            interception: Interception::default(),
        }
    }
}

/// Which event family hover emulation listens to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HoverSource {
    Pointer,
    Mouse,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HoverPhase {
    Enter,
    Leave,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverEvent {
    pub source: HoverSource,
    pub phase: HoverPhase,
    pub pos: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_coordinates_read_as_zero() {
        let event = PointerEvent::touch(PointerPhase::Move, (0.0, 0.0), Instant::now())
            .with_contacts([Contact {
                x: Some(12.0),
                y: None,
            }]);
        assert_eq!(event.pos(), Point::new(12.0, 0.0));

        let empty = event.with_contacts([]);
        assert_eq!(empty.pos(), Point::ZERO);
    }
}
