use crate::data::record::FacilityRecord;
use serde::{Deserialize, Serialize};

/// GeoJSON geometry; permits are only ever points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: [f64; 2] },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    pub properties: Option<serde_json::Value>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl From<&FacilityRecord> for GeoJsonFeature {
    fn from(record: &FacilityRecord) -> Self {
        Self {
            id: Some(serde_json::Value::from(record.object_id)),
            // GeoJSON positions are [lng, lat]
            geometry: Some(GeoJsonGeometry::Point {
                coordinates: [record.longitude, record.latitude],
            }),
            properties: serde_json::to_value(record).ok(),
        }
    }
}

/// Wraps accepted records in a FeatureCollection
pub fn to_feature_collection(records: &[FacilityRecord]) -> GeoJson {
    GeoJson::FeatureCollection {
        features: records.iter().map(GeoJsonFeature::from).collect(),
    }
}
