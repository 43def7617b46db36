//! Configuration for the permit map viewer
//!
//! Every field has a default matching the stock viewer, so a config file only
//! needs to name what it changes. Configs are plain JSON.

use crate::{
    core::{
        constants::{
            DEFAULT_ASSETS_PATH, DEFAULT_BACKGROUND, DEFAULT_CENTER, DEFAULT_MIN_ZOOM,
            DEFAULT_SOURCE, DEFAULT_ZOOM,
        },
        geo::LatLng,
        viewport::VerticalBounds,
    },
    ui::legend::LegendPosition,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Basemaps the engine knows how to draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Basemap {
    Satellite,
    Hybrid,
    Oceans,
    Osm,
    Terrain,
    DarkGray,
    #[default]
    DarkGrayVector,
    Gray,
    GrayVector,
    Streets,
    StreetsVector,
    StreetsNightVector,
    StreetsNavigationVector,
    Topo,
    TopoVector,
    StreetsReliefVector,
}

impl Basemap {
    /// Identifier the engine expects
    pub fn id(&self) -> &'static str {
        match self {
            Basemap::Satellite => "satellite",
            Basemap::Hybrid => "hybrid",
            Basemap::Oceans => "oceans",
            Basemap::Osm => "osm",
            Basemap::Terrain => "terrain",
            Basemap::DarkGray => "dark-gray",
            Basemap::DarkGrayVector => "dark-gray-vector",
            Basemap::Gray => "gray",
            Basemap::GrayVector => "gray-vector",
            Basemap::Streets => "streets",
            Basemap::StreetsVector => "streets-vector",
            Basemap::StreetsNightVector => "streets-night-vector",
            Basemap::StreetsNavigationVector => "streets-navigation-vector",
            Basemap::Topo => "topo",
            Basemap::TopoVector => "topo-vector",
            Basemap::StreetsReliefVector => "streets-relief-vector",
        }
    }
}

impl std::fmt::Display for Basemap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Navigation limits applied by the engine itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConstraints {
    pub rotation_enabled: bool,
    pub snap_to_zoom: bool,
    pub min_zoom: f64,
}

impl Default for ViewConstraints {
    fn default() -> Self {
        Self {
            rotation_enabled: false,
            snap_to_zoom: false,
            min_zoom: DEFAULT_MIN_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub basemap: Basemap,
    pub center: LatLng,
    pub zoom: f64,
    pub constraints: ViewConstraints,
    /// RGB drawn behind the basemap
    pub background: [u8; 3],
    /// Path or http(s) URL of the permit CSV
    pub source: String,
    pub assets_path: String,
    pub legend_position: LegendPosition,
    pub vertical_bounds: VerticalBounds,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            basemap: Basemap::default(),
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            constraints: ViewConstraints::default(),
            background: DEFAULT_BACKGROUND,
            source: DEFAULT_SOURCE.to_string(),
            assets_path: DEFAULT_ASSETS_PATH.to_string(),
            legend_position: LegendPosition::default(),
            vertical_bounds: VerticalBounds::default(),
        }
    }
}

impl ViewerConfig {
    /// Parses a JSON config, filling in defaults for missing keys
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loaded viewer config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.center.is_valid() {
            return Err(MapError::Config(format!(
                "center {:?} is not a valid coordinate",
                self.center
            )));
        }
        if self.zoom < self.constraints.min_zoom {
            return Err(MapError::Config(format!(
                "zoom {} is below min_zoom {}",
                self.zoom, self.constraints.min_zoom
            )));
        }
        if self.vertical_bounds.y_min >= self.vertical_bounds.y_max {
            return Err(MapError::Config(
                "vertical_bounds.y_min must be below y_max".into(),
            ));
        }
        if self.source.trim().is_empty() {
            return Err(MapError::Config("source must not be empty".into()));
        }
        Ok(())
    }
}
