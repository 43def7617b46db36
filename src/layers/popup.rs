use crate::data::record::FacilityRecord;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// Popup shown when a feature is clicked. `{field}` placeholders are filled
/// from the feature's attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupTemplate {
    pub title: String,
    pub content: String,
}

/// A popup filled in for one feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPopup {
    pub title: String,
    pub content: String,
}

impl PopupTemplate {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn methane_permits() -> Self {
        Self::new("{company}", "{vocTonsYear} VOC tons with {permitType} permit")
    }

    /// Field names referenced by the title and content
    pub fn fields(&self) -> Vec<&str> {
        PLACEHOLDER
            .captures_iter(&self.title)
            .chain(PLACEHOLDER.captures_iter(&self.content))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    pub fn render(&self, record: &FacilityRecord) -> RenderedPopup {
        RenderedPopup {
            title: fill(&self.title, record),
            content: fill(&self.content, record),
        }
    }
}

/// Unknown fields render as empty text
fn fill(template: &str, record: &FacilityRecord) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            record.attribute(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FacilityRecord {
        let tokens = [
            "0", "0", "3", "Acme, Inc.", "Plant", "GCP-O&G", "42.5", "7", "34", "-104",
        ];
        FacilityRecord::from_tokens(&tokens).unwrap()
    }

    #[test]
    fn test_render_permit_popup() {
        let popup = PopupTemplate::methane_permits().render(&record());
        assert_eq!(popup.title, "Acme, Inc.");
        assert_eq!(popup.content, "42.5 VOC tons with GCP-O&G permit");
    }

    #[test]
    fn test_unknown_field_renders_empty() {
        let popup = PopupTemplate::new("{nope}!", "{facility}").render(&record());
        assert_eq!(popup.title, "!");
        assert_eq!(popup.content, "Plant");
    }

    #[test]
    fn test_fields() {
        assert_eq!(
            PopupTemplate::methane_permits().fields(),
            vec!["company", "vocTonsYear", "permitType"]
        );
    }
}
