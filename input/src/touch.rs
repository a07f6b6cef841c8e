//! The gesture recognizer.
//!
//! [`Touch`] turns one pointer stream of an input surface into a single active [`Gesture`] that
//! locks to a horizontal or vertical axis once it moved far enough. It reports the gesture's
//! lifecycle as [`TouchEvent`]s.
//!
//! ```text
//! Idle --start--> Pressed(axis undetermined) --move past threshold--> Pressed(axis locked)
//!   ^                     |                                                   |
//!   +---- end / cancel / second contact --------------------------------------+
//! ```
//!
//! Between gestures, only the "did slide" flag survives, it is consumed by the next click.

use log::{debug, trace};

use crate::{
    ClickEvent, DragStartEvent, DragTarget, Gesture, HoverEvent, HoverPhase, InputSurface,
    ListenOptions, ListenScope, PointerEvent, PointerKind, PointerPhase, Subscriptions,
    TouchConfig,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TouchEventKind {
    Start,
    StartX,
    StartY,
    Move,
    MoveX,
    MoveY,
    End,
    EndX,
    EndY,
}

impl TouchEventKind {
    pub fn subscription(self) -> Subscriptions {
        use TouchEventKind::*;
        match self {
            Start => Subscriptions::START,
            StartX => Subscriptions::START_X,
            StartY => Subscriptions::START_Y,
            Move => Subscriptions::MOVE,
            MoveX => Subscriptions::MOVE_X,
            MoveY => Subscriptions::MOVE_Y,
            End => Subscriptions::END,
            EndX => Subscriptions::END_X,
            EndY => Subscriptions::END_Y,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub kind: TouchEventKind,
    /// The gesture at the time of the event.
    pub gesture: Gesture,
    /// The raw event that caused this one.
    pub original: PointerEvent,
}

#[derive(Debug)]
pub struct Touch<S: InputSurface> {
    surface: S,
    config: TouchConfig,
    subscriptions: Subscriptions,
    gesture: Option<Gesture>,
    /// The scope move / end listeners are installed on while a gesture is active.
    listening: Option<ListenScope>,
    did_slide: bool,
    hover_installed: bool,
}

impl<S: InputSurface> Touch<S> {
    /// Creates a recognizer and installs the permanent hover listeners on `surface`.
    pub fn new(mut surface: S, config: TouchConfig, subscriptions: Subscriptions) -> Self {
        surface.listen(ListenScope::Hover(config.hover_source()), ListenOptions::default());
        Self {
            surface,
            config,
            subscriptions,
            gesture: None,
            listening: None,
            did_slide: false,
            hover_installed: true,
        }
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The active gesture, `None` while idle.
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn is_pressed(&self) -> bool {
        self.gesture.is_some()
    }

    /// `true` if the last gesture slid on a touch capable device and the following click was not
    /// consumed yet.
    pub fn did_slide(&self) -> bool {
        self.did_slide
    }

    /// Routes a raw pointer event by its phase.
    pub fn handle(&mut self, event: &mut PointerEvent) -> Vec<TouchEvent> {
        match event.phase {
            PointerPhase::Down => self.start(event),
            PointerPhase::Move => self.move_to(event),
            PointerPhase::Up => self.end(event),
            PointerPhase::Cancel => self.cancel(event),
        }
    }

    pub fn start(&mut self, event: &mut PointerEvent) -> Vec<TouchEvent> {
        let mut events = Vec::new();
        if self.gesture.is_some() {
            // A second finger landing arrives as a press with both contacts.
            if event.is_multi_touch() {
                debug!(
                    "{} contacts on the surface, aborting gesture",
                    event.contacts.len()
                );
                return self.end(event);
            }
            debug!("Pointer pressed during an active gesture, ending the previous one");
            events = self.end(event);
        }

        self.intercept(event);
        let gesture = Gesture::new(event.pos(), event.time);
        debug!("Gesture started at {:?}", gesture.start);

        // Mouse capture does not follow the pressed element, so the rest of a mouse stream is
        // observed on the document.
        let scope = match event.kind {
            PointerKind::Touch => ListenScope::Target,
            PointerKind::Mouse => ListenScope::Document,
        };
        self.surface.listen(scope, self.gesture_listen_options());
        self.listening = Some(scope);

        // The axis is not known yet, so all start events fire right away.
        for kind in [
            TouchEventKind::Start,
            TouchEventKind::StartX,
            TouchEventKind::StartY,
        ] {
            self.emit(&mut events, kind, &gesture, event);
        }

        self.gesture = Some(gesture);
        events
    }

    pub fn move_to(&mut self, event: &mut PointerEvent) -> Vec<TouchEvent> {
        if self.gesture.is_none() {
            return Vec::new();
        }

        // Multitouch is not supported, a second contact ends the gesture.
        if event.is_multi_touch() {
            debug!(
                "{} contacts on the surface, aborting gesture",
                event.contacts.len()
            );
            return self.end(event);
        }

        self.intercept(event);

        let threshold = self.config.slide_threshold;
        let subscriptions = self.subscriptions;
        let Some(gesture) = self.gesture.as_mut() else {
            return Vec::new();
        };

        let pos = event.pos();
        let shift = pos - gesture.start;
        gesture.touch_time(event.time);

        if let Some(axis) = gesture.try_lock_axis(shift.abs(), threshold, subscriptions) {
            debug!(
                "Gesture locked to {axis:?} after {:?}, sliding: {}",
                gesture.duration,
                gesture.is_slide()
            );
        }

        if !gesture.is_slide() {
            return Vec::new();
        }

        gesture.slide_to(pos);
        trace!("Gesture slid to {pos:?}, shift {:?}", gesture.shift);
        let gesture = gesture.clone();

        let mut events = Vec::new();
        self.emit(&mut events, TouchEventKind::Move, &gesture, event);
        if gesture.is_slide_x {
            self.emit(&mut events, TouchEventKind::MoveX, &gesture, event);
        }
        if gesture.is_slide_y {
            self.emit(&mut events, TouchEventKind::MoveY, &gesture, event);
        }
        events
    }

    pub fn end(&mut self, event: &mut PointerEvent) -> Vec<TouchEvent> {
        let Some(mut gesture) = self.gesture.take() else {
            return Vec::new();
        };

        self.intercept(event);
        gesture.touch_time(event.time);

        let mut events = Vec::new();
        self.emit(&mut events, TouchEventKind::End, &gesture, event);
        if gesture.is_slide_y {
            self.emit(&mut events, TouchEventKind::EndY, &gesture, event);
        }
        if gesture.is_slide_x {
            self.emit(&mut events, TouchEventKind::EndX, &gesture, event);
        }

        // A mouse drag that is released over the surface should still click.
        self.did_slide = self.surface.touch_enabled() && gesture.is_slide();
        debug!(
            "Gesture ended after {:?}, slid: {}",
            gesture.duration,
            gesture.is_slide()
        );

        self.stop_listening();
        events
    }

    /// A cancelled pointer sequence ends the gesture like a release.
    pub fn cancel(&mut self, event: &mut PointerEvent) -> Vec<TouchEvent> {
        self.end(event)
    }

    /// Returns the phase to report if the consumer listens to it.
    pub fn hover(&self, event: &HoverEvent) -> Option<HoverPhase> {
        if event.source != self.config.hover_source() {
            return None;
        }
        let subscription = match event.phase {
            HoverPhase::Enter => Subscriptions::HOVER_ENTER,
            HoverPhase::Leave => Subscriptions::HOVER_LEAVE,
        };
        self.subscriptions
            .contains(subscription)
            .then_some(event.phase)
    }

    /// Intercepts the click that follows a sliding gesture.
    ///
    /// Returns `true` if the click was cancelled.
    pub fn click(&mut self, event: &mut ClickEvent) -> bool {
        if !self.did_slide || !self.config.suppress_click_after_slide {
            return false;
        }
        event.interception.stop_propagation();
        event.interception.prevent_default();
        self.did_slide = false;
        true
    }

    /// Native drag and drop of links and images would take over the pointer stream.
    pub fn drag_start(&mut self, event: &mut DragStartEvent) {
        if matches!(event.target, DragTarget::Anchor | DragTarget::Image) {
            event.interception.prevent_default();
        }
    }

    /// Removes every listener this recognizer installed.
    pub fn teardown(&mut self) {
        self.gesture = None;
        self.stop_listening();
        if self.hover_installed {
            self.surface.unlisten(
                ListenScope::Hover(self.config.hover_source()),
                ListenOptions::default(),
            );
            self.hover_installed = false;
        }
    }

    fn stop_listening(&mut self) {
        if let Some(scope) = self.listening.take() {
            self.surface.unlisten(scope, self.gesture_listen_options());
        }
    }

    fn gesture_listen_options(&self) -> ListenOptions {
        // Not passive, consumers may need to prevent scrolling.
        ListenOptions {
            capture: self.config.capture_at_root,
            passive: false,
        }
    }

    fn intercept(&self, event: &mut PointerEvent) {
        if self.config.stop_propagation {
            event.stop_propagation();
        }
    }

    fn emit(
        &self,
        events: &mut Vec<TouchEvent>,
        kind: TouchEventKind,
        gesture: &Gesture,
        original: &PointerEvent,
    ) {
        if self.subscriptions.contains(kind.subscription()) {
            events.push(TouchEvent {
                kind,
                gesture: gesture.clone(),
                original: original.clone(),
            });
        }
    }
}

impl<S: InputSurface> Drop for Touch<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        time::{Duration, Instant},
    };

    use perch_geometry::{Axis, Point};

    use super::*;
    use crate::{Contact, HoverSource};

    #[derive(Debug, Default)]
    struct RecordingSurface {
        touch_enabled: bool,
        active: HashMap<(ListenScope, ListenOptions), usize>,
        listened: usize,
    }

    impl RecordingSurface {
        fn touch() -> Self {
            Self {
                touch_enabled: true,
                ..Default::default()
            }
        }

        fn is_listening(&self, scope: ListenScope) -> bool {
            self.active
                .iter()
                .any(|((s, _), count)| *s == scope && *count > 0)
        }

        fn active_count(&self) -> usize {
            self.active.values().sum()
        }
    }

    impl InputSurface for RecordingSurface {
        fn listen(&mut self, scope: ListenScope, options: ListenOptions) {
            *self.active.entry((scope, options)).or_default() += 1;
            self.listened += 1;
        }

        fn unlisten(&mut self, scope: ListenScope, options: ListenOptions) {
            let count = self.active.entry((scope, options)).or_default();
            assert!(*count > 0, "unlisten without listen: {scope:?}");
            *count -= 1;
        }

        fn touch_enabled(&self) -> bool {
            self.touch_enabled
        }
    }

    fn recognizer(surface: RecordingSurface) -> Touch<RecordingSurface> {
        Touch::new(surface, TouchConfig::default(), Subscriptions::all())
    }

    struct Stream {
        kind: PointerKind,
        t0: Instant,
        ms: u64,
    }

    impl Stream {
        fn new(kind: PointerKind) -> Self {
            Self {
                kind,
                t0: Instant::now(),
                ms: 0,
            }
        }

        fn event(&mut self, phase: PointerPhase, x: f64, y: f64) -> PointerEvent {
            self.ms += 16;
            PointerEvent::new(
                self.kind,
                phase,
                (x, y),
                self.t0 + Duration::from_millis(self.ms),
            )
        }
    }

    fn kinds(events: &[TouchEvent]) -> Vec<TouchEventKind> {
        events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn vertical_drag_locks_to_y() {
        use TouchEventKind::*;
        let mut touch = recognizer(RecordingSurface::touch());
        let mut stream = Stream::new(PointerKind::Touch);

        let started = touch.handle(&mut stream.event(PointerPhase::Down, 100.0, 100.0));
        assert_eq!(kinds(&started), [Start, StartX, StartY]);

        let moved = touch.handle(&mut stream.event(PointerPhase::Move, 100.0, 140.0));
        assert_eq!(kinds(&moved), [Move, MoveY]);

        let ended = touch.handle(&mut stream.event(PointerPhase::Up, 100.0, 140.0));
        assert_eq!(kinds(&ended), [End, EndY]);
        let end_y = &ended[1].gesture;
        assert_eq!(end_y.shift.y, 40.0);
        assert_eq!(end_y.shift_abs.y, 40.0);
        assert!(end_y.is_y());
        assert_eq!(end_y.duration, Duration::from_millis(32));
        assert!(!touch.is_pressed());
    }

    #[test]
    fn horizontal_lock_never_moves_along_y() {
        for threshold in [1.0, 5.0, 20.0] {
            let config = TouchConfig {
                slide_threshold: threshold,
                ..Default::default()
            };
            let mut touch = Touch::new(RecordingSurface::touch(), config, Subscriptions::all());
            let mut stream = Stream::new(PointerKind::Touch);

            let mut events = touch.start(&mut stream.event(PointerPhase::Down, 0.0, 0.0));
            for (x, y) in [
                (0.5, 0.2),
                (threshold, threshold * 0.5),
                (threshold * 2.0, threshold * 4.0),
                (0.0, 50.0),
            ] {
                events.extend(touch.move_to(&mut stream.event(PointerPhase::Move, x, y)));
            }
            assert_eq!(touch.gesture().and_then(|g| g.axis), Some(Axis::X));
            events.extend(touch.end(&mut stream.event(PointerPhase::Up, 0.0, 50.0)));

            let kinds = kinds(&events);
            assert!(kinds.contains(&TouchEventKind::MoveX));
            assert!(kinds.contains(&TouchEventKind::EndX));
            assert!(!kinds.contains(&TouchEventKind::MoveY));
            assert!(!kinds.contains(&TouchEventKind::EndY));
        }
    }

    #[test]
    fn small_movements_do_not_slide() {
        let mut touch = recognizer(RecordingSurface::touch());
        let mut stream = Stream::new(PointerKind::Touch);
        touch.start(&mut stream.event(PointerPhase::Down, 10.0, 10.0));
        assert!(touch.move_to(&mut stream.event(PointerPhase::Move, 13.0, 12.0)).is_empty());
        let ended = touch.end(&mut stream.event(PointerPhase::Up, 13.0, 12.0));
        assert_eq!(kinds(&ended), [TouchEventKind::End]);
        assert!(!touch.did_slide());
    }

    #[test]
    fn second_contact_aborts_gesture() {
        for lock_first in [false, true] {
            let mut touch = recognizer(RecordingSurface::touch());
            let mut stream = Stream::new(PointerKind::Touch);
            touch.start(&mut stream.event(PointerPhase::Down, 0.0, 0.0));
            if lock_first {
                touch.move_to(&mut stream.event(PointerPhase::Move, 30.0, 0.0));
            }

            let mut two_fingers = stream
                .event(PointerPhase::Move, 30.0, 0.0)
                .with_contacts([Contact::new(30.0, 0.0), Contact::new(200.0, 200.0)]);
            let events = touch.move_to(&mut two_fingers);

            let ends = events
                .iter()
                .filter(|e| e.kind == TouchEventKind::End)
                .count();
            assert_eq!(ends, 1);
            assert!(!touch.is_pressed());
            assert!(!touch.surface().is_listening(ListenScope::Target));

            // Releasing afterwards is a no-op.
            assert!(touch.end(&mut stream.event(PointerPhase::Up, 0.0, 0.0)).is_empty());
        }
    }

    #[test]
    fn second_finger_landing_aborts_gesture() {
        let mut touch = recognizer(RecordingSurface::touch());
        let mut stream = Stream::new(PointerKind::Touch);
        touch.start(&mut stream.event(PointerPhase::Down, 0.0, 0.0));

        let mut second_down = stream
            .event(PointerPhase::Down, 0.0, 0.0)
            .with_contacts([Contact::new(0.0, 0.0), Contact::new(200.0, 200.0)]);
        let events = touch.handle(&mut second_down);

        assert_eq!(kinds(&events), [TouchEventKind::End]);
        assert!(!touch.is_pressed());
        assert!(!touch.surface().is_listening(ListenScope::Target));
    }

    #[test]
    fn events_are_ignored_while_idle() {
        let mut touch = recognizer(RecordingSurface::touch());
        let mut stream = Stream::new(PointerKind::Touch);
        assert!(touch.move_to(&mut stream.event(PointerPhase::Move, 50.0, 0.0)).is_empty());
        assert!(touch.end(&mut stream.event(PointerPhase::Up, 50.0, 0.0)).is_empty());
        assert!(touch.cancel(&mut stream.event(PointerPhase::Cancel, 50.0, 0.0)).is_empty());
    }

    #[test]
    fn click_after_slide_is_suppressed_once() {
        let config = TouchConfig {
            suppress_click_after_slide: true,
            ..Default::default()
        };
        let mut touch = Touch::new(RecordingSurface::touch(), config, Subscriptions::all());
        let mut stream = Stream::new(PointerKind::Touch);
        touch.start(&mut stream.event(PointerPhase::Down, 0.0, 0.0));
        touch.move_to(&mut stream.event(PointerPhase::Move, 40.0, 0.0));
        touch.end(&mut stream.event(PointerPhase::Up, 40.0, 0.0));
        assert!(touch.did_slide());

        let mut first = ClickEvent::default();
        assert!(touch.click(&mut first));
        assert!(first.interception.propagation_stopped);
        assert!(first.interception.default_prevented);

        let mut second = ClickEvent::default();
        assert!(!touch.click(&mut second));
        assert_eq!(second, ClickEvent::default());
    }

    #[test]
    fn clicks_pass_without_suppression_configured() {
        let mut touch = recognizer(RecordingSurface::touch());
        let mut stream = Stream::new(PointerKind::Touch);
        touch.start(&mut stream.event(PointerPhase::Down, 0.0, 0.0));
        touch.move_to(&mut stream.event(PointerPhase::Move, 40.0, 0.0));
        touch.end(&mut stream.event(PointerPhase::Up, 40.0, 0.0));

        assert!(!touch.click(&mut ClickEvent::default()));
        assert!(touch.did_slide());
    }

    #[test]
    fn mouse_drag_still_clicks_without_touch_support() {
        let config = TouchConfig {
            suppress_click_after_slide: true,
            ..Default::default()
        };
        let mut touch = Touch::new(RecordingSurface::default(), config, Subscriptions::all());
        let mut stream = Stream::new(PointerKind::Mouse);
        touch.start(&mut stream.event(PointerPhase::Down, 0.0, 0.0));
        touch.move_to(&mut stream.event(PointerPhase::Move, 40.0, 0.0));
        touch.end(&mut stream.event(PointerPhase::Up, 40.0, 0.0));

        assert!(!touch.did_slide());
        assert!(!touch.click(&mut ClickEvent::default()));
    }

    #[test]
    fn listeners_follow_the_pointer_kind() {
        let mut touch = recognizer(RecordingSurface::touch());

        let mut mouse = Stream::new(PointerKind::Mouse);
        touch.start(&mut mouse.event(PointerPhase::Down, 0.0, 0.0));
        assert!(touch.surface().is_listening(ListenScope::Document));
        assert!(!touch.surface().is_listening(ListenScope::Target));
        touch.end(&mut mouse.event(PointerPhase::Up, 0.0, 0.0));
        assert!(!touch.surface().is_listening(ListenScope::Document));

        let mut finger = Stream::new(PointerKind::Touch);
        touch.start(&mut finger.event(PointerPhase::Down, 0.0, 0.0));
        assert!(touch.surface().is_listening(ListenScope::Target));
        touch.cancel(&mut finger.event(PointerPhase::Cancel, 0.0, 0.0));

        // Only the permanent hover listener is left.
        assert_eq!(touch.surface().active_count(), 1);
        assert!(touch.surface().is_listening(ListenScope::Hover(HoverSource::Mouse)));
    }

    #[test]
    fn restart_while_pressed_does_not_leak_listeners() {
        let mut touch = recognizer(RecordingSurface::touch());
        let mut stream = Stream::new(PointerKind::Touch);
        touch.start(&mut stream.event(PointerPhase::Down, 0.0, 0.0));
        let events = touch.start(&mut stream.event(PointerPhase::Down, 10.0, 10.0));
        assert_eq!(events[0].kind, TouchEventKind::End);
        assert_eq!(touch.gesture().map(|g| g.start), Some(Point::new(10.0, 10.0)));
        assert_eq!(touch.surface().active_count(), 2);
    }

    #[test]
    fn unsubscribed_axis_does_not_slide() {
        let subscriptions = Subscriptions::START | Subscriptions::END | Subscriptions::MOVE_X;
        let mut touch = Touch::new(
            RecordingSurface::touch(),
            TouchConfig::default(),
            subscriptions,
        );
        let mut stream = Stream::new(PointerKind::Touch);
        let started = touch.start(&mut stream.event(PointerPhase::Down, 0.0, 0.0));
        assert_eq!(kinds(&started), [TouchEventKind::Start]);

        assert!(touch.move_to(&mut stream.event(PointerPhase::Move, 0.0, 80.0)).is_empty());
        let gesture = touch.gesture().cloned();
        assert!(gesture.as_ref().is_some_and(|g| g.is_y() && !g.is_slide()));

        let ended = touch.end(&mut stream.event(PointerPhase::Up, 0.0, 80.0));
        assert_eq!(kinds(&ended), [TouchEventKind::End]);
        assert!(!touch.did_slide());
    }

    #[test]
    fn capture_and_stop_propagation_options() {
        let config = TouchConfig {
            capture_at_root: true,
            stop_propagation: true,
            ..Default::default()
        };
        let mut touch = Touch::new(RecordingSurface::touch(), config, Subscriptions::all());
        let mut stream = Stream::new(PointerKind::Touch);
        let mut down = stream.event(PointerPhase::Down, 0.0, 0.0);
        touch.start(&mut down);
        assert!(down.interception.propagation_stopped);
        assert!(touch.surface().active.contains_key(&(
            ListenScope::Target,
            ListenOptions {
                capture: true,
                passive: false
            }
        )));

        let mut up = stream.event(PointerPhase::Up, 0.0, 0.0);
        touch.end(&mut up);
        assert!(up.interception.propagation_stopped);
    }

    #[test]
    fn drag_start_is_prevented_on_links_and_images() {
        let mut touch = recognizer(RecordingSurface::touch());
        for (target, prevented) in [
            (DragTarget::Anchor, true),
            (DragTarget::Image, true),
            (DragTarget::Other, false),
        ] {
            let mut event = DragStartEvent::new(target);
            touch.drag_start(&mut event);
            assert_eq!(event.interception.default_prevented, prevented);
        }
    }

    #[test]
    fn hover_uses_configured_source() {
        let config = TouchConfig {
            use_pointer_events_for_hover: true,
            ..Default::default()
        };
        let touch = Touch::new(
            RecordingSurface::touch(),
            config,
            Subscriptions::HOVER_ENTER,
        );
        assert!(touch.surface().is_listening(ListenScope::Hover(HoverSource::Pointer)));

        let enter = HoverEvent {
            source: HoverSource::Pointer,
            phase: HoverPhase::Enter,
            pos: Point::ZERO,
        };
        assert_eq!(touch.hover(&enter), Some(HoverPhase::Enter));
        let leave = HoverEvent {
            phase: HoverPhase::Leave,
            ..enter.clone()
        };
        assert_eq!(touch.hover(&leave), None);
        let mouse = HoverEvent {
            source: HoverSource::Mouse,
            ..enter
        };
        assert_eq!(touch.hover(&mouse), None);
    }

    #[test]
    fn teardown_removes_everything() {
        let mut touch = recognizer(RecordingSurface::touch());
        let mut stream = Stream::new(PointerKind::Mouse);
        touch.start(&mut stream.event(PointerPhase::Down, 0.0, 0.0));
        touch.teardown();
        assert_eq!(touch.surface().active_count(), 0);
        assert!(!touch.is_pressed());
        // Dropping after teardown must not unlisten twice, which would panic in the surface.
    }
}
