use super::values::{ControlValues, control_bool, control_f64, control_i64, control_str};
use serde::{Deserialize, Serialize};

/// A snapshot of the chart configuration read off the settings panel.
///
/// Built fresh on every read; never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordSettings {
    /// Preview diameter.
    pub width: f64,
    pub scale: ScaleSettings,
    /// The literal options tree passed to the renderer.
    pub options: ChartOptions,
}

/// Target dimensions of the exported (embedded) chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleSettings {
    pub width: f64,
    pub font: f64,
    pub margin: f64,
    pub fill: String,
    pub transparent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub width: f64,
    pub chord: ChordOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordOptions {
    pub link: LinkOptions,
    pub node: NodeOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOptions {
    /// A palette name, `rampPosition` or `rampValue`.
    pub color_mode: String,
    pub color: LinkColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkColor {
    /// Ramp start color.
    pub fill: String,
    /// Ramp end color.
    pub fill_end: String,
    pub fill_opacity: f64,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOptions {
    pub label: LabelOptions,
    pub label_padding: f64,
    /// Pad angle between groups.
    pub node_padding: f64,
    /// Arc thickness.
    pub width: f64,
    pub sort_groups: SortGroups,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelOptions {
    pub font_name: String,
    pub font_size: f64,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortGroups {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortGroups {
    fn parse(s: &str) -> Self {
        match s {
            "ascending" => Self::Ascending,
            "descending" => Self::Descending,
            _ => Self::None,
        }
    }
}

impl ChordSettings {
    /// Maps panel control values onto the chart configuration.
    ///
    /// Integer-valued controls are truncated the way a number input's `parseInt` would be.
    pub fn from_controls(values: &ControlValues) -> Self {
        let int = |key: &str| control_i64(values, key) as f64;
        let float = |key: &str| control_f64(values, key);
        let text = |key: &str| control_str(values, key).to_string();
        let flag = |key: &str| control_bool(values, key);

        Self {
            width: int("previewWidth"),
            scale: ScaleSettings {
                width: float("scaleWidth"),
                font: float("scaleFont"),
                margin: float("scaleMargin"),
                fill: text("scaleFill"),
                transparent: flag("scaleFillTransparent"),
            },
            options: ChartOptions {
                width: int("previewWidth"),
                chord: ChordOptions {
                    link: LinkOptions {
                        color_mode: text("linkColorMode"),
                        color: LinkColor {
                            fill: text("linkFillColor"),
                            fill_end: text("linkFillEndColor"),
                            fill_opacity: float("linkOpacity"),
                            stroke_width: int("linkBorderWidth"),
                        },
                    },
                    node: NodeOptions {
                        label: LabelOptions {
                            font_name: text("labelFontName"),
                            font_size: int("labelFontSize"),
                            color: text("labelFontColor"),
                            bold: flag("labelFontBold"),
                            italic: flag("labelFontItalic"),
                        },
                        label_padding: int("labelPadding"),
                        node_padding: float("nodePadding"),
                        width: int("nodeWidth"),
                        sort_groups: SortGroups::parse(control_str(values, "sortGroups")),
                    },
                },
            },
        }
    }
}
