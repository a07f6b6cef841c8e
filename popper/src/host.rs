use std::sync::Arc;

use derive_more::{Display, From};
use perch_geometry::Rect;

/// A signal after which the floating element's position must be recomputed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UpdateTrigger {
    /// Any scroll inside the window, including nested scroll containers.
    Scroll,
    /// The window got resized.
    Resize,
    /// The reference element changed its size.
    ReferenceResize,
}

impl UpdateTrigger {
    /// Scrolls of nested containers don't bubble, so they are observed in the capture phase.
    /// None of the listeners ever blocks the host.
    pub fn listen_options(self) -> ListenOptions {
        ListenOptions {
            capture: self == UpdateTrigger::Scroll,
            passive: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ListenOptions {
    pub capture: bool,
    pub passive: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct ListenerId(pub u64);

pub type UpdateCallback = Arc<dyn Fn() + Send + Sync>;

/// The environment a [`crate::Popper`] positions in.
pub trait PopperHost: Send + Sync {
    /// The default boundary.
    fn viewport(&self) -> Rect;

    /// Installs a listener that invokes `callback` every time `trigger` fires.
    ///
    /// `callback` must not be invoked from within `listen()`.
    fn listen(
        &self,
        trigger: UpdateTrigger,
        options: ListenOptions,
        callback: UpdateCallback,
    ) -> ListenerId;

    fn unlisten(&self, id: ListenerId);
}
