//! Graduated symbol styling
//!
//! A [`SimpleRenderer`] draws every feature with the same marker and lets
//! visual variables scale its size and shift its color by attribute value.
//! Each variable carries explicit stops; values between two stops are linearly
//! interpolated and values outside the range take the nearest end stop.

use crate::data::record::FacilityRecord;
use serde::{Deserialize, Serialize};

/// RGBA color as the engine expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channel-wise linear blend, `t` in [0, 1]
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeStop {
    pub value: f64,
    /// Marker size in points
    pub size: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub value: f64,
    pub color: Color,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub title: Option<String>,
    #[serde(default = "default_show_legend")]
    pub show_legend: bool,
}

fn default_show_legend() -> bool {
    true
}

impl LegendOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            show_legend: true,
        }
    }
}

/// Attribute-driven adjustment of the marker symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VisualVariable {
    Size {
        field: String,
        legend_options: LegendOptions,
        stops: Vec<SizeStop>,
    },
    Color {
        field: String,
        legend_options: LegendOptions,
        stops: Vec<ColorStop>,
    },
}

impl VisualVariable {
    pub fn field(&self) -> &str {
        match self {
            VisualVariable::Size { field, .. } | VisualVariable::Color { field, .. } => field,
        }
    }

    pub fn legend_options(&self) -> &LegendOptions {
        match self {
            VisualVariable::Size { legend_options, .. }
            | VisualVariable::Color { legend_options, .. } => legend_options,
        }
    }

    /// Stop labels in stop order; unlabeled stops fall back to their value
    pub fn stop_labels(&self) -> Vec<String> {
        fn label(label: &Option<String>, value: f64) -> String {
            label.clone().unwrap_or_else(|| value.to_string())
        }

        match self {
            VisualVariable::Size { stops, .. } => {
                stops.iter().map(|s| label(&s.label, s.value)).collect()
            }
            VisualVariable::Color { stops, .. } => {
                stops.iter().map(|s| label(&s.label, s.value)).collect()
            }
        }
    }
}

/// Interpolates along `stops`, which must be sorted by value.
/// NaN takes the first stop.
fn interpolate<S, V: Copy>(
    stops: &[S],
    value: f64,
    stop_value: impl Fn(&S) -> f64,
    visual: impl Fn(&S) -> V,
    lerp: impl Fn(V, V, f64) -> V,
) -> Option<V> {
    let first = stops.first()?;
    let last = stops.last()?;

    if value.is_nan() || value <= stop_value(first) {
        return Some(visual(first));
    }
    if value >= stop_value(last) {
        return Some(visual(last));
    }

    stops.windows(2).find_map(|pair| {
        let (lo, hi) = (stop_value(&pair[0]), stop_value(&pair[1]));
        if value >= lo && value <= hi {
            let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.0 };
            Some(lerp(visual(&pair[0]), visual(&pair[1]), t))
        } else {
            None
        }
    })
}

pub fn size_at(stops: &[SizeStop], value: f64) -> Option<f64> {
    interpolate(stops, value, |s| s.value, |s| s.size, |a, b, t| a + (b - a) * t)
}

pub fn color_at(stops: &[ColorStop], value: f64) -> Option<Color> {
    interpolate(stops, value, |s| s.value, |s| s.color, Color::lerp)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub width: f64,
    pub color: Color,
}

/// Circle marker used for every point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSymbol {
    pub size: f64,
    pub color: Color,
    pub outline: Outline,
}

impl Default for MarkerSymbol {
    fn default() -> Self {
        Self {
            size: 12.0,
            color: Color::rgb(255, 255, 255),
            outline: Outline {
                width: 0.5,
                color: Color::LIGHT_GRAY,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleRenderer {
    pub symbol: MarkerSymbol,
    pub visual_variables: Vec<VisualVariable>,
}

impl SimpleRenderer {
    pub fn new(symbol: MarkerSymbol) -> Self {
        Self {
            symbol,
            visual_variables: Vec::new(),
        }
    }

    pub fn with_visual_variable(mut self, variable: VisualVariable) -> Self {
        self.visual_variables.push(variable);
        self
    }

    /// Permit styling: marker size follows VOC tons per year, color follows
    /// the methane share.
    pub fn methane_permits() -> Self {
        let size_stop = |value: f64, size: f64, label: &str| SizeStop {
            value,
            size,
            label: Some(label.to_string()),
        };
        let color_stop = |value: f64, color: Color, label: &str| ColorStop {
            value,
            color,
            label: Some(label.to_string()),
        };

        Self::new(MarkerSymbol::default())
            .with_visual_variable(VisualVariable::Size {
                field: "vocTonsYear".into(),
                legend_options: LegendOptions::titled("VOC Tons per "),
                stops: vec![
                    size_stop(1.0, 1.0, ">1 tons"),
                    size_stop(50.0, 5.0, ">50 tons"),
                    size_stop(100.0, 10.0, ">100 tons"),
                ],
            })
            .with_visual_variable(VisualVariable::Color {
                field: "methane75Voc".into(),
                legend_options: LegendOptions::titled("Methane 75% VOC"),
                stops: vec![
                    color_stop(1.0, Color::rgb(0, 40, 255), "1"),
                    color_stop(80.0, Color::rgb(150, 10, 10), "80"),
                    color_stop(100.0, Color::rgb(50, 0, 0), "> 100"),
                ],
            })
    }

    /// Resolves the symbol a record is drawn with
    pub fn symbol_for(&self, record: &FacilityRecord) -> MarkerSymbol {
        let mut symbol = self.symbol.clone();

        for variable in &self.visual_variables {
            let value = record
                .numeric_attribute(variable.field())
                .unwrap_or(f64::NAN);
            match variable {
                VisualVariable::Size { stops, .. } => {
                    if let Some(size) = size_at(stops, value) {
                        symbol.size = size;
                    }
                }
                VisualVariable::Color { stops, .. } => {
                    if let Some(color) = color_at(stops, value) {
                        symbol.color = color;
                    }
                }
            }
        }

        symbol
    }
}
