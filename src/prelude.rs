//! Prelude module for common methane-map types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use methane_map::prelude::*;`

pub use crate::core::{
    bounds::Extent,
    config::{Basemap, ViewConstraints, ViewerConfig},
    geo::{xy_to_lng_lat, LatLng, Point},
    map::{MapViewer, ViewState},
    viewport::{GoToOptions, RecenterRequest, VerticalBounds, ViewportClamp},
};

pub use crate::data::{
    geojson::{to_feature_collection, GeoJson},
    ingest::{ingest, ingest_with_report, tokenize, IngestReport, RowFailure},
    record::{Column, FacilityRecord, RowError},
    source::{load, source_for, DataSource, FileSource, HttpSource},
};

pub use crate::layers::{
    feature::{FeatureLayerDefinition, FieldDefinition, FieldType, Graphic},
    popup::{PopupTemplate, RenderedPopup},
    renderer::{Color, ColorStop, LegendOptions, MarkerSymbol, SimpleRenderer, SizeStop, VisualVariable},
};

pub use crate::traits::{EngineSetup, MapEngine};

pub use crate::ui::legend::{Legend, LegendKind, LegendPosition, LegendSection};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
