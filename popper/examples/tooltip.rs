//! Places a tooltip under a button that scrolls towards the bottom of a 1024x768 window.
//!
//! Run with `RUST_LOG=debug` to see the engine's decisions.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use anyhow::Result;
use log::info;
use parking_lot::Mutex;
use perch_geometry::{Point, Rect, Size};
use perch_popper::{
    FloatingElement, ListenOptions, ListenerId, PlacementResult, Popper, PopperConfig,
    PopperEvent, PopperHost, UpdateCallback, UpdateTrigger, VirtualElement,
};

const CONFIG: &str = r#"
placement = "bottom-start"
main-axis-offset = 6.0
arrow-size = 12.0
arrow-padding = 6.0
boundary-padding = 4.0
"#;

#[derive(Default)]
struct Window {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<ListenerId, (UpdateTrigger, UpdateCallback)>>,
}

impl Window {
    fn fire(&self, trigger: UpdateTrigger) {
        let callbacks: Vec<_> = self
            .listeners
            .lock()
            .values()
            .filter(|(t, _)| *t == trigger)
            .map(|(_, callback)| callback.clone())
            .collect();
        callbacks.iter().for_each(|callback| callback());
    }
}

impl PopperHost for Window {
    fn viewport(&self) -> Rect {
        Rect::from_size(Size::new(1024.0, 768.0))
    }

    fn listen(
        &self,
        trigger: UpdateTrigger,
        _options: ListenOptions,
        callback: UpdateCallback,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().insert(id, (trigger, callback));
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.lock().remove(&id);
    }
}

struct Tooltip;

impl FloatingElement for Tooltip {
    fn size(&self) -> Size {
        Size::new(180.0, 64.0)
    }

    fn apply(&mut self, placement: &PlacementResult) {
        info!(
            "Tooltip at {:?} ({}), arrow {:?}",
            placement.coordinates, placement.resolved_placement, placement.arrow_offset
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let window = Arc::new(Window::default());
    let popper = Popper::new(window.clone(), PopperConfig::from_toml(CONFIG)?);

    let scroll = Arc::new(Mutex::new(0.0));
    popper.set_reference(Some(Arc::new(VirtualElement::new({
        let scroll = scroll.clone();
        move || Rect::new(Point::new(40.0, 400.0 + *scroll.lock()), Size::new(120.0, 32.0))
    }))));
    popper.set_floating(Some(Box::new(Tooltip)));
    popper.on_event(|event| {
        if let PopperEvent::Updated(result) = event {
            println!("{} {:?}", result.resolved_placement, result.coordinates);
        }
    });

    let Some(handle) = popper.attach() else {
        anyhow::bail!("Tooltip could not be attached");
    };

    for _ in 0..6 {
        *scroll.lock() += 60.0;
        window.fire(UpdateTrigger::Scroll);
    }

    handle.detach();
    Ok(())
}
