use crate::{
    core::geo::LatLng,
    data::record::FacilityRecord,
    layers::{popup::PopupTemplate, renderer::SimpleRenderer},
    prelude::HashSet,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Oid,
    String,
    Double,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub alias: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDefinition {
    pub fn new(name: &str, alias: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            alias: alias.to_string(),
            field_type,
        }
    }
}

/// A point on the map with the record it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graphic {
    pub geometry: LatLng,
    pub attributes: FacilityRecord,
}

impl From<FacilityRecord> for Graphic {
    fn from(record: FacilityRecord) -> Self {
        Self {
            geometry: record.position(),
            attributes: record,
        }
    }
}

/// Everything the engine needs to build and draw the permit layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureLayerDefinition {
    pub title: String,
    pub legend_enabled: bool,
    pub popup_enabled: bool,
    pub popup_template: PopupTemplate,
    pub fields: Vec<FieldDefinition>,
    pub object_id_field: String,
    pub renderer: SimpleRenderer,
    pub source: Vec<Graphic>,
}

impl FeatureLayerDefinition {
    pub fn methane_permits(records: Vec<FacilityRecord>) -> Self {
        Self {
            title: "VOC tons per Year".to_string(),
            legend_enabled: true,
            popup_enabled: true,
            popup_template: PopupTemplate::methane_permits(),
            fields: vec![
                FieldDefinition::new("objectId", "ObjectId", FieldType::Oid),
                FieldDefinition::new("company", "Company", FieldType::String),
                FieldDefinition::new("facility", "Facility", FieldType::String),
                FieldDefinition::new("permitType", "Permit Type", FieldType::String),
                FieldDefinition::new("vocTonsYear", "Voc Tons per Year", FieldType::Double),
                FieldDefinition::new("methane75Voc", "Methane 75 VOC", FieldType::Double),
            ],
            object_id_field: "objectId".to_string(),
            renderer: SimpleRenderer::methane_permits(),
            source: records.into_iter().map(Graphic::from).collect(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Object ids that appear on more than one graphic, in first-repeat order
    pub fn duplicate_object_ids(&self) -> Vec<i64> {
        let mut seen = HashSet::default();
        let mut reported = HashSet::default();

        self.source
            .iter()
            .map(|graphic| graphic.attributes.object_id)
            .filter(|id| !seen.insert(*id) && reported.insert(*id))
            .collect()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ingest::ingest;

    const PAYLOAD: &str = "header\n\
        1,2,10,Acme,Plant A,GCP,4.5,6.5,34.0,-104.0\n\
        1,2,11,Bolt,Plant B,NOI,40,70,33.5,-103.5\n\
        1,2,10,Acme,Plant C,GCP,1.5,2.5,35.0,-105.0";

    #[test]
    fn test_methane_layer_schema() {
        let layer = FeatureLayerDefinition::methane_permits(ingest(PAYLOAD));

        assert_eq!(layer.title, "VOC tons per Year");
        assert!(layer.legend_enabled && layer.popup_enabled);
        assert_eq!(layer.object_id_field, "objectId");
        assert_eq!(layer.fields.len(), 6);
        assert_eq!(layer.field("objectId").unwrap().field_type, FieldType::Oid);
        assert_eq!(layer.field("permitType").unwrap().alias, "Permit Type");
        assert_eq!(layer.field("methane75Voc").unwrap().field_type, FieldType::Double);
        assert!(layer.field("latitude").is_none());
    }

    #[test]
    fn test_graphics_follow_records() {
        let layer = FeatureLayerDefinition::methane_permits(ingest(PAYLOAD));

        assert_eq!(layer.source.len(), 3);
        assert_eq!(layer.source[1].geometry, LatLng::new(33.5, -103.5));
        assert_eq!(layer.source[1].attributes.company, "Bolt");
    }

    #[test]
    fn test_duplicate_object_ids() {
        let layer = FeatureLayerDefinition::methane_permits(ingest(PAYLOAD));
        assert_eq!(layer.duplicate_object_ids(), vec![10]);
    }

    #[test]
    fn test_popup_fields_exist_in_schema() {
        let layer = FeatureLayerDefinition::methane_permits(Vec::new());
        for name in layer.popup_template.fields() {
            assert!(layer.field(name).is_some(), "{} missing from fields", name);
        }
        for variable in &layer.renderer.visual_variables {
            assert!(layer.field(variable.field()).is_some());
        }
    }

    #[test]
    fn test_json_field_type_names() {
        let layer = FeatureLayerDefinition::methane_permits(Vec::new());
        let json: serde_json::Value = serde_json::from_str(&layer.to_json().unwrap()).unwrap();
        assert_eq!(json["fields"][0]["type"], "oid");
        assert_eq!(json["fields"][4]["type"], "double");
    }
}
