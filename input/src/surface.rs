use crate::HoverSource;

/// Where a listener is installed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ListenScope {
    /// The element the pointer sequence started on. Touch streams stay bound to it.
    Target,
    /// The whole document. Mouse streams leave the pressed element, so move / end are observed
    /// here.
    Document,
    /// Hover enter / leave on the surface itself.
    Hover(HoverSource),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ListenOptions {
    pub capture: bool,
    pub passive: bool,
}

/// The host side of a gesture recognizer: installs and removes the listeners that deliver
/// events back into [`crate::Touch`].
pub trait InputSurface {
    fn listen(&mut self, scope: ListenScope, options: ListenOptions);
    fn unlisten(&mut self, scope: ListenScope, options: ListenOptions);

    /// `true` if the device supports touch input.
    fn touch_enabled(&self) -> bool;
}

impl<S: InputSurface + ?Sized> InputSurface for &mut S {
    fn listen(&mut self, scope: ListenScope, options: ListenOptions) {
        (**self).listen(scope, options)
    }

    fn unlisten(&mut self, scope: ListenScope, options: ListenOptions) {
        (**self).unlisten(scope, options)
    }

    fn touch_enabled(&self) -> bool {
        (**self).touch_enabled()
    }
}
