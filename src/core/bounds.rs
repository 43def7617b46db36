use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// The visible rectangle of the view in the engine's working projection.
///
/// The engine owns and updates this value; listeners only read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Extent {
    /// Creates an extent from individual coordinates
    pub fn from_coords(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Gets the height of the extent
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Gets the center point of the extent
    pub fn center(&self) -> Point {
        Point::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }
}
