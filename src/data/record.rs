use crate::core::{constants::RECORD_COLUMNS, geo::LatLng};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern is valid")
});

static INT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("integer prefix pattern is valid"));

/// Position of each attribute in a permit row.
///
/// Rows carry no schema of their own; this enum is the one place that knows
/// which column holds which attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    X,
    Y,
    ObjectId,
    Company,
    Facility,
    PermitType,
    VocTonsYear,
    Methane75Voc,
    Latitude,
    Longitude,
}

impl Column {
    pub const ALL: [Column; RECORD_COLUMNS] = [
        Column::X,
        Column::Y,
        Column::ObjectId,
        Column::Company,
        Column::Facility,
        Column::PermitType,
        Column::VocTonsYear,
        Column::Methane75Voc,
        Column::Latitude,
        Column::Longitude,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Attribute name used by popups and renderers
    pub fn name(self) -> &'static str {
        match self {
            Column::X => "x",
            Column::Y => "y",
            Column::ObjectId => "objectId",
            Column::Company => "company",
            Column::Facility => "facility",
            Column::PermitType => "permitType",
            Column::VocTonsYear => "vocTonsYear",
            Column::Methane75Voc => "methane75Voc",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|column| column.name() == name)
    }

    fn token<'a>(self, tokens: &[&'a str]) -> &'a str {
        tokens[self.index()]
    }
}

/// Why a single row could not be turned into a record
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("expected {expected} columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },

    #[error("objectId {0:?} is not an integer")]
    InvalidObjectId(String),
}

/// One permitted facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRecord {
    pub x: f64,
    pub y: f64,
    pub object_id: i64,
    pub company: String,
    pub facility: String,
    pub permit_type: String,
    pub voc_tons_year: f64,
    #[serde(rename = "methane75Voc")]
    pub methane_75_voc: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl FacilityRecord {
    /// Decodes a tokenized row. Tokens past the last known column are ignored.
    pub fn from_tokens(tokens: &[&str]) -> Result<Self, RowError> {
        if tokens.len() < RECORD_COLUMNS {
            return Err(RowError::TooFewColumns {
                expected: RECORD_COLUMNS,
                found: tokens.len(),
            });
        }

        let float = |column: Column| parse_float(column.token(tokens));
        let text = |column: Column| column.token(tokens).to_string();

        let object_id = parse_int(Column::ObjectId.token(tokens))
            .ok_or_else(|| RowError::InvalidObjectId(text(Column::ObjectId)))?;

        Ok(Self {
            x: float(Column::X),
            y: float(Column::Y),
            object_id,
            company: text(Column::Company),
            facility: text(Column::Facility),
            permit_type: text(Column::PermitType),
            voc_tons_year: float(Column::VocTonsYear),
            methane_75_voc: float(Column::Methane75Voc),
            latitude: float(Column::Latitude),
            longitude: float(Column::Longitude),
        })
    }

    /// True when every attribute the map depends on is present.
    ///
    /// Zero counts as missing, so a facility that legitimately reports zero
    /// VOC tons is dropped along with the sparse rows.
    pub fn is_complete(&self) -> bool {
        is_truthy(self.latitude)
            && is_truthy(self.longitude)
            && is_truthy(self.voc_tons_year)
            && is_truthy(self.methane_75_voc)
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Attribute value rendered as text, by attribute name
    pub fn attribute(&self, name: &str) -> Option<String> {
        let value = match Column::from_name(name)? {
            Column::X => self.x.to_string(),
            Column::Y => self.y.to_string(),
            Column::ObjectId => self.object_id.to_string(),
            Column::Company => self.company.clone(),
            Column::Facility => self.facility.clone(),
            Column::PermitType => self.permit_type.clone(),
            Column::VocTonsYear => self.voc_tons_year.to_string(),
            Column::Methane75Voc => self.methane_75_voc.to_string(),
            Column::Latitude => self.latitude.to_string(),
            Column::Longitude => self.longitude.to_string(),
        };
        Some(value)
    }

    /// Numeric attribute by name, for renderers keyed on a field
    pub fn numeric_attribute(&self, name: &str) -> Option<f64> {
        match Column::from_name(name)? {
            Column::X => Some(self.x),
            Column::Y => Some(self.y),
            Column::ObjectId => Some(self.object_id as f64),
            Column::VocTonsYear => Some(self.voc_tons_year),
            Column::Methane75Voc => Some(self.methane_75_voc),
            Column::Latitude => Some(self.latitude),
            Column::Longitude => Some(self.longitude),
            Column::Company | Column::Facility | Column::PermitType => None,
        }
    }
}

fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Reads the longest numeric prefix of `token`; NaN when there is none
pub fn parse_float(token: &str) -> f64 {
    FLOAT_PREFIX
        .find(token.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Reads the leading integer of `token`, dropping any fraction
pub fn parse_int(token: &str) -> Option<i64> {
    INT_PREFIX
        .find(token.trim_start())
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: [&str; 10] = [
        "-11791234.5",
        "4071234.25",
        "17",
        "Acme, Inc.",
        "North Battery",
        "GCP-O&G",
        "12.5",
        "9.375",
        "34.1",
        "-104.2",
    ];

    #[test]
    fn test_from_tokens_positions() {
        let record = FacilityRecord::from_tokens(&ROW).unwrap();

        assert_eq!(record.x, -11791234.5);
        assert_eq!(record.y, 4071234.25);
        assert_eq!(record.object_id, 17);
        assert_eq!(record.company, "Acme, Inc.");
        assert_eq!(record.facility, "North Battery");
        assert_eq!(record.permit_type, "GCP-O&G");
        assert_eq!(record.voc_tons_year, 12.5);
        assert_eq!(record.methane_75_voc, 9.375);
        assert_eq!(record.latitude, 34.1);
        assert_eq!(record.longitude, -104.2);
        assert!(record.is_complete());
    }

    #[test]
    fn test_short_row_is_an_error() {
        let err = FacilityRecord::from_tokens(&ROW[..9]).unwrap_err();
        assert_eq!(
            err,
            RowError::TooFewColumns {
                expected: 10,
                found: 9
            }
        );
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let mut tokens = ROW.to_vec();
        tokens.push("trailing");
        assert_eq!(
            FacilityRecord::from_tokens(&tokens).unwrap(),
            FacilityRecord::from_tokens(&ROW).unwrap()
        );
    }

    #[test]
    fn test_non_numeric_object_id_is_an_error() {
        let mut tokens = ROW;
        tokens[Column::ObjectId.index()] = "n/a";
        assert_eq!(
            FacilityRecord::from_tokens(&tokens).unwrap_err(),
            RowError::InvalidObjectId("n/a".into())
        );
    }

    #[test]
    fn test_zero_and_nan_are_missing() {
        for column in [
            Column::VocTonsYear,
            Column::Methane75Voc,
            Column::Latitude,
            Column::Longitude,
        ] {
            for bad in ["0", "0.0", "", "n/a"] {
                let mut tokens = ROW;
                tokens[column.index()] = bad;
                let record = FacilityRecord::from_tokens(&tokens).unwrap();
                assert!(!record.is_complete(), "{:?} = {:?}", column, bad);
            }
        }
    }

    #[test]
    fn test_unchecked_columns_may_be_nan() {
        let mut tokens = ROW;
        tokens[Column::X.index()] = "";
        tokens[Column::Y.index()] = "unknown";
        let record = FacilityRecord::from_tokens(&tokens).unwrap();
        assert!(record.x.is_nan());
        assert!(record.y.is_nan());
        assert!(record.is_complete());
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("12.5"), 12.5);
        assert_eq!(parse_float("12.5 tons"), 12.5);
        assert_eq!(parse_float("-.5"), -0.5);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("7e"), 7.0);
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("").is_nan());
    }

    #[test]
    fn test_parse_int_truncates() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("42.9"), Some(42));
        assert_eq!(parse_int("-7abc"), Some(-7));
        assert_eq!(parse_int("x7"), None);
    }

    #[test]
    fn test_column_names_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_name(column.name()), Some(column));
        }
        assert_eq!(Column::Longitude.index(), 9);
        assert_eq!(Column::from_name("nope"), None);
    }

    #[test]
    fn test_attribute_lookup() {
        let record = FacilityRecord::from_tokens(&ROW).unwrap();
        assert_eq!(record.attribute("vocTonsYear").as_deref(), Some("12.5"));
        assert_eq!(record.attribute("permitType").as_deref(), Some("GCP-O&G"));
        assert_eq!(record.numeric_attribute("methane75Voc"), Some(9.375));
        assert_eq!(record.numeric_attribute("company"), None);
        assert_eq!(record.attribute("missing"), None);
    }

    #[test]
    fn test_serialized_attribute_names() {
        let record = FacilityRecord::from_tokens(&ROW).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        for column in Column::ALL {
            assert!(json.get(column.name()).is_some(), "{}", column.name());
        }
    }
}
