//! The floating position engine.
//!
//! A [`Popper`] keeps a floating element placed next to its reference. Attaching it computes the
//! placement once and then recomputes on every scroll and resize the host reports, until it is
//! detached again.
//!
//! Recomputation is synchronous and not coalesced: every trigger recomputes once. A computation
//! is a fixed amount of rectangle arithmetic per middleware.
//!
//! The reference and the floating element are queried and updated without holding the engine's
//! state, so they may read it back, e.g. through [`Popper::last_result`].

use std::{
    collections::VecDeque,
    fmt, mem,
    sync::{Arc, Weak},
};

use log::{debug, trace, warn};
use parking_lot::{Mutex, MutexGuard};

use crate::{
    FloatingElement, ListenerId, PlacementResult, PopperConfig, PopperHost, ReferenceElement,
    UpdateTrigger, compute_position,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PopperStatus {
    /// Attaching was requested, but the reference or the floating element is missing.
    Pending,
    /// Attached and placed.
    Positioned,
    /// Not attached.
    Detached,
}

#[derive(Debug, Clone)]
pub enum PopperEvent {
    /// The engine got attached. The handle updates or detaches this attachment.
    Created(PopperHandle),
    /// The placement got recomputed and applied.
    Updated(PlacementResult),
    /// The floating element got placed for the first time since it was pending or detached.
    Shown,
}

type EventListener = Box<dyn FnMut(&PopperEvent) + Send>;
type SharedFloating = Arc<Mutex<Box<dyn FloatingElement>>>;

#[derive(Clone)]
pub struct Popper {
    inner: Arc<Mutex<Inner>>,
    dispatcher: Arc<Mutex<Dispatcher>>,
}

struct Inner {
    host: Arc<dyn PopperHost>,
    config: PopperConfig,
    reference: Option<Arc<dyn ReferenceElement>>,
    floating: Option<SharedFloating>,
    /// `true` from `attach()` to `detach()`.
    wants_attachment: bool,
    attachment: Option<Attachment>,
    generation: u64,
    last: Option<PlacementResult>,
}

#[derive(Debug)]
struct Attachment {
    generation: u64,
    listeners: Vec<ListenerId>,
}

#[derive(Default)]
struct Dispatcher {
    listeners: Vec<EventListener>,
    /// Events raised while dispatching, delivered after the current one.
    pending: VecDeque<PopperEvent>,
    dispatching: bool,
}

impl fmt::Debug for Popper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Popper")
            .field("config", &inner.config)
            .field("attachment", &inner.attachment)
            .field("last", &inner.last)
            .finish_non_exhaustive()
    }
}

impl Popper {
    pub fn new(host: Arc<dyn PopperHost>, config: PopperConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                host,
                config,
                reference: None,
                floating: None,
                wants_attachment: false,
                attachment: None,
                generation: 0,
                last: None,
            })),
            dispatcher: Default::default(),
        }
    }

    pub fn config(&self) -> PopperConfig {
        self.inner.lock().config.clone()
    }

    /// Replaces the configuration and re-attaches if attached.
    pub fn set_config(&self, config: PopperConfig) {
        self.modify(|inner| inner.config = config);
    }

    /// Sets or clears the reference. Re-attaches if attached or pending.
    pub fn set_reference(&self, reference: Option<Arc<dyn ReferenceElement>>) {
        self.modify(|inner| inner.reference = reference);
    }

    /// Sets or clears the floating element. Re-attaches if attached or pending.
    pub fn set_floating(&self, floating: Option<Box<dyn FloatingElement>>) {
        self.modify(|inner| inner.floating = floating.map(|f| Arc::new(Mutex::new(f))));
    }

    /// Registers a listener for [`PopperEvent`]s.
    ///
    /// Listeners are invoked after the engine's state is released, so they may call back into the
    /// engine. Events raised by such calls are delivered after the current one. Listeners
    /// registered while events are dispatched receive the next events.
    pub fn on_event(&self, listener: impl FnMut(&PopperEvent) + Send + 'static) {
        self.dispatcher.lock().listeners.push(Box::new(listener));
    }

    pub fn status(&self) -> PopperStatus {
        let inner = self.inner.lock();
        match (inner.attachment.is_some(), inner.wants_attachment) {
            (true, _) => PopperStatus::Positioned,
            (false, true) => PopperStatus::Pending,
            (false, false) => PopperStatus::Detached,
        }
    }

    /// The most recently applied placement.
    pub fn last_result(&self) -> Option<PlacementResult> {
        self.inner.lock().last.clone()
    }

    /// Computes the placement without applying it.
    ///
    /// `None` if there is no reference or no floating element yet.
    pub fn compute(&self) -> Option<PlacementResult> {
        let placing = self.inner.lock().placing()?;
        Some(placing.compute())
    }

    /// Computes and applies the placement.
    ///
    /// Without a reference or floating element, this does nothing and the previous position is
    /// kept.
    pub fn update(&self) -> Option<PlacementResult> {
        let placing = self.inner.lock().placing()?;
        let result = placing.place();
        self.inner.lock().last = Some(result.clone());
        self.dispatch(vec![PopperEvent::Updated(result.clone())]);
        Some(result)
    }

    /// Places the floating element and keeps it placed until [`Self::detach`] is called.
    ///
    /// Attaching again replaces the current attachment. Returns `None` and stays pending if the
    /// reference or the floating element is missing. It gets attached as soon as both are set.
    pub fn attach(&self) -> Option<PopperHandle> {
        self.inner.lock().wants_attachment = true;
        let events = self.reattach(true);

        let handle = events.iter().find_map(|event| match event {
            PopperEvent::Created(handle) => Some(handle.clone()),
            _ => None,
        });
        self.dispatch(events);
        handle
    }

    /// Removes all listeners installed by [`Self::attach`]. The floating element keeps its last
    /// position.
    pub fn detach(&self) {
        let mut inner = self.inner.lock();
        inner.wants_attachment = false;
        if inner.stop_listening() {
            debug!("Popper detached");
        }
    }

    fn modify(&self, f: impl FnOnce(&mut Inner)) {
        let wants_attachment = {
            let mut inner = self.inner.lock();
            f(&mut inner);
            inner.wants_attachment
        };
        if wants_attachment {
            let events = self.reattach(false);
            self.dispatch(events);
        }
    }

    /// Replaces the listeners and places the floating element.
    ///
    /// An `explicit` attach starts a new attachment. Otherwise the current attachment is kept, so
    /// its handles stay valid and only an update is reported.
    fn reattach(&self, explicit: bool) -> Vec<PopperEvent> {
        let (previous, placing) = {
            let mut inner = self.inner.lock();
            let previous = inner.attachment.as_ref().map(|a| a.generation);
            inner.stop_listening();
            (previous, inner.placing())
        };

        let Some(placing) = placing else {
            debug!("Popper not ready to attach, pending");
            return Vec::new();
        };
        let result = placing.place();

        let mut inner = self.inner.lock();
        inner.last = Some(result.clone());
        if !inner.wants_attachment || inner.attachment.is_some() {
            trace!("Popper detached or attached concurrently, not listening");
            return vec![PopperEvent::Updated(result)];
        }

        let generation = match previous {
            Some(generation) if !explicit => generation,
            _ => {
                inner.generation += 1;
                inner.generation
            }
        };

        let listeners = self.listen(&inner);
        inner.attachment = Some(Attachment {
            generation,
            listeners,
        });
        debug!(
            "Popper attached at {:?}, {}",
            result.coordinates, result.resolved_placement
        );

        let mut events = Vec::new();
        if previous != Some(generation) {
            events.push(PopperEvent::Created(PopperHandle {
                popper: self.downgrade(),
                generation,
            }));
        }
        events.push(PopperEvent::Updated(result));
        if previous.is_none() {
            events.push(PopperEvent::Shown);
        }
        events
    }

    fn listen(&self, inner: &Inner) -> Vec<ListenerId> {
        let mut triggers = vec![UpdateTrigger::Scroll, UpdateTrigger::Resize];
        if inner.config.auto_update_on_target_resize {
            triggers.push(UpdateTrigger::ReferenceResize);
        }

        triggers
            .into_iter()
            .map(|trigger| {
                let popper = self.downgrade();
                inner.host.listen(
                    trigger,
                    trigger.listen_options(),
                    Arc::new(move || {
                        if let Some(popper) = popper.upgrade() {
                            trace!("{trigger:?}, updating popper");
                            popper.update();
                        }
                    }),
                )
            })
            .collect()
    }

    fn dispatch(&self, events: Vec<PopperEvent>) {
        let mut dispatcher = self.dispatcher.lock();
        dispatcher.pending.extend(events);
        if dispatcher.dispatching {
            return;
        }

        dispatcher.dispatching = true;
        while let Some(event) = dispatcher.pending.pop_front() {
            let mut listeners = mem::take(&mut dispatcher.listeners);
            MutexGuard::unlocked(&mut dispatcher, || {
                for listener in listeners.iter_mut() {
                    listener(&event);
                }
            });
            listeners.append(&mut dispatcher.listeners);
            dispatcher.listeners = listeners;
        }
        dispatcher.dispatching = false;
    }

    fn downgrade(&self) -> WeakPopper {
        WeakPopper {
            inner: Arc::downgrade(&self.inner),
            dispatcher: Arc::downgrade(&self.dispatcher),
        }
    }
}

impl Inner {
    fn placing(&self) -> Option<Placing> {
        let Some(reference) = &self.reference else {
            trace!("No reference, nothing to compute");
            return None;
        };
        let floating = self.floating.as_ref()?;
        Some(Placing {
            host: self.host.clone(),
            config: self.config.clone(),
            reference: reference.clone(),
            floating: floating.clone(),
        })
    }

    /// Returns `true` if there was an attachment.
    fn stop_listening(&mut self) -> bool {
        let Some(attachment) = self.attachment.take() else {
            return false;
        };
        for id in attachment.listeners {
            self.host.unlisten(id);
        }
        true
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.stop_listening();
    }
}

/// The inputs of one computation.
struct Placing {
    host: Arc<dyn PopperHost>,
    config: PopperConfig,
    reference: Arc<dyn ReferenceElement>,
    floating: SharedFloating,
}

impl Placing {
    fn compute(&self) -> PlacementResult {
        let size = self.floating.lock().size();
        if size.is_empty() {
            warn!("Floating element has no size ({size:?}), placement will be imprecise");
        }

        let boundary = self
            .config
            .boundary
            .unwrap_or_else(|| self.host.viewport());

        let computed = compute_position(
            self.reference.bounding_rect(),
            size,
            boundary,
            self.config.placement.initial(),
            &self.config.middlewares(),
        );
        PlacementResult::new(computed, self.config.same_width)
    }

    fn place(&self) -> PlacementResult {
        let result = self.compute();
        self.floating.lock().apply(&result);
        result
    }
}

#[derive(Debug, Clone)]
struct WeakPopper {
    inner: Weak<Mutex<Inner>>,
    dispatcher: Weak<Mutex<Dispatcher>>,
}

impl WeakPopper {
    fn upgrade(&self) -> Option<Popper> {
        Some(Popper {
            inner: self.inner.upgrade()?,
            dispatcher: self.dispatcher.upgrade()?,
        })
    }
}

/// Refers to one attachment of a [`Popper`].
///
/// Once the popper is attached again or detached, the handle does nothing anymore. Changing the
/// reference, the floating element, or the configuration keeps the attachment.
#[derive(Debug, Clone)]
pub struct PopperHandle {
    popper: WeakPopper,
    generation: u64,
}

impl PopperHandle {
    pub fn is_attached(&self) -> bool {
        self.current().is_some()
    }

    /// Recomputes and applies the placement.
    pub fn update(&self) -> Option<PlacementResult> {
        self.current()?.update()
    }

    pub fn detach(&self) {
        if let Some(popper) = self.current() {
            popper.detach();
        }
    }

    fn current(&self) -> Option<Popper> {
        let popper = self.popper.upgrade()?;
        let generation = popper
            .inner
            .lock()
            .attachment
            .as_ref()
            .map(|attachment| attachment.generation);
        (generation == Some(self.generation)).then_some(popper)
    }
}
