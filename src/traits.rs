//! The seam between this crate and the map engine that actually draws
//!
//! The engine owns the basemap, projection, tiling, hit testing and
//! rasterization. This crate only hands it configuration, one feature layer,
//! a legend and camera moves.

use crate::{
    core::{
        config::{Basemap, ViewConstraints, ViewerConfig},
        geo::LatLng,
        viewport::GoToOptions,
    },
    layers::feature::FeatureLayerDefinition,
    ui::legend::{Legend, LegendSection},
    Result,
};
use serde::{Deserialize, Serialize};

/// One-off engine configuration, applied before anything is added to the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSetup {
    pub assets_path: String,
    pub basemap: Basemap,
    pub center: LatLng,
    pub zoom: f64,
    pub constraints: ViewConstraints,
    pub background: [u8; 3],
}

impl From<&ViewerConfig> for EngineSetup {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            assets_path: config.assets_path.clone(),
            basemap: config.basemap,
            center: config.center,
            zoom: config.zoom,
            constraints: config.constraints.clone(),
            background: config.background,
        }
    }
}

/// Capabilities the viewer needs from a map engine
pub trait MapEngine {
    /// Apply setup; called once, before any other method
    fn configure(&mut self, setup: &EngineSetup) -> Result<()>;

    /// Add a feature layer on top of the basemap
    fn add_layer(&mut self, layer: FeatureLayerDefinition) -> Result<()>;

    /// Dock a legend in the view
    fn add_legend(&mut self, legend: &Legend, sections: &[LegendSection]) -> Result<()>;

    /// Move the view center. Engines may refuse, e.g. while another
    /// navigation is in flight.
    fn go_to(&mut self, target: LatLng, options: GoToOptions) -> Result<()>;
}
