//! # methane-map
//!
//! Prepares an interactive map of methane and VOC facility permits.
//!
//! The crate turns a semi-structured CSV payload into typed facility records,
//! describes how those records should be drawn (fields, popup, graduated
//! size and color ramps, legend) and keeps the camera inside valid vertical
//! bounds. Drawing itself is left to an external map engine reached through
//! the [`MapEngine`] trait.

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Extent,
    config::{Basemap, ViewerConfig},
    geo::{LatLng, Point},
    map::MapViewer,
    viewport::{GoToOptions, RecenterRequest, VerticalBounds, ViewportClamp},
};

pub use data::{
    ingest::{ingest, ingest_with_report, IngestReport, RowError},
    record::{Column, FacilityRecord},
    source::{DataSource, FileSource, HttpSource},
};

pub use layers::{
    feature::{FeatureLayerDefinition, FieldDefinition, FieldType, Graphic},
    popup::PopupTemplate,
    renderer::{ColorStop, SimpleRenderer, SizeStop, VisualVariable},
};

pub use traits::{EngineSetup, MapEngine};

pub use ui::legend::{Legend, LegendPosition, LegendSection};

/// Installs `env_logger` for binaries built on the crate. Respects
/// `RUST_LOG` and falls back to `info`; calling it twice is a no-op.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Engine error: {0}")]
    Engine(String),
}

/// Error type alias for convenience
pub type Error = MapError;
