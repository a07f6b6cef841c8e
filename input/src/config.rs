use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::HoverSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TouchConfig {
    /// Emulate hover with pointer events instead of mouse events.
    pub use_pointer_events_for_hover: bool,
    /// Install gesture listeners in the capture phase.
    pub capture_at_root: bool,
    /// Minimum displacement in pixels along one axis before the gesture locks to it.
    pub slide_threshold: f64,
    /// Cancel the first click after a gesture that slid.
    pub suppress_click_after_slide: bool,
    /// Stop propagation of every pointer event the recognizer handles.
    pub stop_propagation: bool,
}

impl TouchConfig {
    pub const DEFAULT_SLIDE_THRESHOLD: f64 = 5.0;

    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).context("Parsing touch configuration")
    }

    pub fn hover_source(&self) -> HoverSource {
        if self.use_pointer_events_for_hover {
            HoverSource::Pointer
        } else {
            HoverSource::Mouse
        }
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            use_pointer_events_for_hover: false,
            capture_at_root: false,
            slide_threshold: Self::DEFAULT_SLIDE_THRESHOLD,
            suppress_click_after_slide: false,
            stop_propagation: false,
        }
    }
}
