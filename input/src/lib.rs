//! Gesture recognition for a single input surface.
//!
//! The host forwards raw pointer events into a [`Touch`] recognizer and dispatches the returned
//! [`TouchEvent`]s to its consumers. Listener installation goes through [`InputSurface`].
mod config;
mod event;
mod gesture;
mod subscriptions;
mod surface;
mod touch;

pub use config::*;
pub use event::*;
pub use gesture::*;
pub use subscriptions::*;
pub use surface::*;
pub use touch::*;
