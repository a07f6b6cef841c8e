use std::sync::Arc;

use anyhow::{Context, Result};
use perch_geometry::{PlacementOption, Rect};
use serde::{Deserialize, Serialize};

use crate::{Arrow, AutoPlacement, Flip, Middleware, Offset, SameWidth, Shift};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PopperConfig {
    pub placement: PlacementOption,
    /// Give the floating element the width of the reference.
    pub same_width: bool,
    pub main_axis_offset: f64,
    pub cross_axis_offset: f64,
    pub arrow: bool,
    /// Length of the arrow along the edge it sits on.
    pub arrow_size: f64,
    /// Minimum distance between the arrow and the floating element's corners.
    pub arrow_padding: f64,
    /// Also recompute when the reference element changes its size.
    pub auto_update_on_target_resize: bool,
    /// The area the floating element is kept in. The host's viewport if not set.
    pub boundary: Option<Rect>,
    /// Space to keep between the floating element and the boundary.
    pub boundary_padding: f64,
    /// Additional middlewares, run after the built-in ones.
    #[serde(skip)]
    pub custom_middlewares: Vec<Arc<dyn Middleware>>,
}

impl Default for PopperConfig {
    fn default() -> Self {
        Self {
            placement: PlacementOption::default(),
            same_width: false,
            main_axis_offset: Self::DEFAULT_MAIN_AXIS_OFFSET,
            cross_axis_offset: 0.0,
            arrow: true,
            arrow_size: Self::DEFAULT_ARROW_SIZE,
            arrow_padding: Self::DEFAULT_ARROW_PADDING,
            auto_update_on_target_resize: false,
            boundary: None,
            boundary_padding: 0.0,
            custom_middlewares: Vec::new(),
        }
    }
}

impl PopperConfig {
    pub const DEFAULT_MAIN_AXIS_OFFSET: f64 = 8.0;
    pub const DEFAULT_ARROW_SIZE: f64 = 20.0;
    pub const DEFAULT_ARROW_PADDING: f64 = 10.0;

    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).context("Parsing popper configuration")
    }

    #[must_use]
    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.custom_middlewares.push(Arc::new(middleware));
        self
    }

    /// The middlewares a computation runs, in order.
    pub fn middlewares(&self) -> Vec<Arc<dyn Middleware>> {
        let padding = self.boundary_padding;
        let mut middlewares: Vec<Arc<dyn Middleware>> = vec![Arc::new(Offset {
            main_axis: self.main_axis_offset,
            cross_axis: self.cross_axis_offset,
        })];

        match self.placement {
            PlacementOption::Concrete(_) => middlewares.push(Arc::new(Flip { padding })),
            PlacementOption::Auto(alignment) => {
                middlewares.push(Arc::new(AutoPlacement { alignment, padding }))
            }
        }

        middlewares.push(Arc::new(Shift { padding }));

        if self.same_width {
            middlewares.push(Arc::new(SameWidth));
        }

        if self.arrow {
            middlewares.push(Arc::new(Arrow {
                size: self.arrow_size,
                padding: self.arrow_padding,
            }));
        }

        middlewares.extend(self.custom_middlewares.iter().cloned());
        middlewares
    }
}
