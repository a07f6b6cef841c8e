//! Keeps a floating element, like a tooltip or a dropdown, placed next to a reference element.
//!
//! [`compute_position`] is the pure placement computation. [`Popper`] drives it against a
//! [`PopperHost`] and recomputes whenever the host reports a scroll or a resize.

mod compute;
mod config;
mod element;
mod host;
mod middleware;
mod popper;

pub use compute::*;
pub use config::*;
pub use element::*;
pub use host::*;
pub use middleware::*;
pub use popper::*;
