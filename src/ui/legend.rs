use crate::layers::renderer::{SimpleRenderer, VisualVariable};
use serde::{Deserialize, Serialize};

/// Corner of the view the legend is docked to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendKind {
    Size,
    Color,
}

/// One block of the legend, describing one visual variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSection {
    pub title: String,
    pub field: String,
    pub kind: LegendKind,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub position: LegendPosition,
}

impl Legend {
    pub fn new(position: LegendPosition) -> Self {
        Self { position }
    }

    /// Sections for every visual variable that wants to be in the legend.
    /// Variables without a title use their field name.
    pub fn sections(&self, renderer: &SimpleRenderer) -> Vec<LegendSection> {
        renderer
            .visual_variables
            .iter()
            .filter(|variable| variable.legend_options().show_legend)
            .map(|variable| LegendSection {
                title: variable
                    .legend_options()
                    .title
                    .clone()
                    .unwrap_or_else(|| variable.field().to_string()),
                field: variable.field().to_string(),
                kind: match variable {
                    VisualVariable::Size { .. } => LegendKind::Size,
                    VisualVariable::Color { .. } => LegendKind::Color,
                },
                labels: variable.stop_labels(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::renderer::LegendOptions;

    #[test]
    fn test_permit_legend_sections() {
        let sections = Legend::default().sections(&SimpleRenderer::methane_permits());

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "VOC Tons per ");
        assert_eq!(sections[0].kind, LegendKind::Size);
        assert_eq!(sections[0].labels, vec![">1 tons", ">50 tons", ">100 tons"]);
        assert_eq!(sections[1].title, "Methane 75% VOC");
        assert_eq!(sections[1].field, "methane75Voc");
    }

    #[test]
    fn test_hidden_variables_are_skipped() {
        let mut renderer = SimpleRenderer::methane_permits();
        if let VisualVariable::Size { legend_options, .. } = &mut renderer.visual_variables[0] {
            *legend_options = LegendOptions {
                title: None,
                show_legend: false,
            };
        }

        let sections = Legend::new(LegendPosition::TopLeft).sections(&renderer);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, LegendKind::Color);
    }

    #[test]
    fn test_default_position() {
        assert_eq!(Legend::default().position, LegendPosition::BottomRight);
    }
}
