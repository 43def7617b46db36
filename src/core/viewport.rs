use crate::core::{
    bounds::Extent,
    constants::{EXTENT_Y_MAX, EXTENT_Y_MIN},
    geo::{xy_to_lng_lat, LatLng},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Vertical limits (projected y) the visible extent has to stay within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalBounds {
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for VerticalBounds {
    fn default() -> Self {
        Self {
            y_min: EXTENT_Y_MIN,
            y_max: EXTENT_Y_MAX,
        }
    }
}

/// Options passed along with a camera move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoToOptions {
    /// Animation length; zero jumps immediately
    pub duration: Duration,
}

impl GoToOptions {
    /// A move that is applied without animation
    pub fn immediate() -> Self {
        Self {
            duration: Duration::ZERO,
        }
    }
}

impl Default for GoToOptions {
    fn default() -> Self {
        Self::immediate()
    }
}

/// Ask the engine to move the view center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecenterRequest {
    pub target: LatLng,
    pub options: GoToOptions,
}

/// Keeps the view from scrolling past the top or bottom of the world.
///
/// This is a clamp rather than a hard stop: it looks at every extent the
/// engine reports and, once an edge has crossed a bound, asks for the view to
/// be moved back so that edge sits exactly on the bound. The horizontal center
/// is never touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportClamp {
    bounds: VerticalBounds,
}

impl ViewportClamp {
    pub fn new(bounds: VerticalBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> VerticalBounds {
        self.bounds
    }

    /// Target projected y for the view center, if the extent is out of bounds
    pub fn clamped_center_y(&self, extent: &Extent) -> Option<f64> {
        let half_height = extent.height() / 2.0;

        if extent.ymax >= self.bounds.y_max {
            Some(self.bounds.y_max - half_height)
        } else if extent.ymin <= self.bounds.y_min {
            Some(self.bounds.y_min + half_height)
        } else {
            None
        }
    }

    /// Handle an extent change, returning the recenter the engine should apply
    pub fn on_extent_changed(&self, extent: &Extent) -> Option<RecenterRequest> {
        let y = self.clamped_center_y(extent)?;
        let target = xy_to_lng_lat(extent.center().x, y);

        log::debug!(
            "extent [{}, {}] out of bounds, recentering to {:?}",
            extent.ymin,
            extent.ymax,
            target
        );

        Some(RecenterRequest {
            target,
            options: GoToOptions::immediate(),
        })
    }
}
