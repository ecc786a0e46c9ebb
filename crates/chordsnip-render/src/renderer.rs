//! The renderer seam.

use crate::Result;
use crate::color::ColorAssigner;
use chordsnip_core::{Cell, ChordConfig, ChordData, build_chord_data};
use serde::{Deserialize, Serialize};

/// Where a render lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// The visible chart.
    Preview,
    /// The off-screen chart the export markup is read from.
    Export,
}

impl Surface {
    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Preview => "preview",
            Surface::Export => "export",
        }
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a renderer needs to draw one chord diagram: the model plus a color per participant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordDiagram {
    pub participants: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    /// Matrix row sums, in participant order.
    pub group_values: Vec<f64>,
    /// One color per participant, in participant order.
    pub colors: Vec<String>,
}

impl ChordDiagram {
    pub fn new(data: ChordData, colors: ColorAssigner) -> Self {
        let group_values = data.group_values();
        Self {
            participants: data.participants,
            matrix: data.matrix,
            group_values,
            colors: colors.into_colors(),
        }
    }

    /// Builds the diagram for projected `[source, target, weight]` rows, coloring it with the
    /// options' `chord.link` color mode and ramp endpoints.
    ///
    /// When the source and target columns coincide the diagram is empty.
    pub fn prepare(headings: &[String], rows: &[Vec<Cell>], options: &ChordConfig) -> Self {
        let Some(data) = build_chord_data(headings, rows) else {
            return Self::default();
        };
        let colors = ColorAssigner::from_mode_name(
            options.get_str("chord.link.colorMode").unwrap_or_default(),
            options.get_str("chord.link.color.fill").unwrap_or_default(),
            options.get_str("chord.link.color.fillEnd").unwrap_or_default(),
            &data,
        );
        Self::new(data, colors)
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn color_at(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }
}

/// One render call.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub options: &'a ChordConfig,
    /// The `[source, target, weight]` headings in use.
    pub headings: &'a [String],
    pub diagram: &'a ChordDiagram,
    pub surface: Surface,
    /// Clear the surface before drawing.
    pub clear: bool,
}

/// A vector-graphics chord renderer with a visible and an off-screen surface.
pub trait ChordRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<()>;

    /// The markup currently on `surface`, if anything has been drawn there.
    fn markup(&self, surface: Surface) -> Option<String>;
}

impl<R: ChordRenderer + ?Sized> ChordRenderer for &mut R {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<()> {
        (**self).render(request)
    }

    fn markup(&self, surface: Surface) -> Option<String> {
        (**self).markup(surface)
    }
}

impl<R: ChordRenderer + ?Sized> ChordRenderer for Box<R> {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<()> {
        (**self).render(request)
    }

    fn markup(&self, surface: Surface) -> Option<String> {
        (**self).markup(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headings() -> Vec<String> {
        ["Source", "Target", "Volume"].map(String::from).to_vec()
    }

    #[test]
    fn prepare_colors_participants_from_options() {
        let options = ChordConfig::from_value(json!({
            "chord": { "link": { "colorMode": "schemeCategory10", "color": { "fill": "#000", "fillEnd": "#fff" } } }
        }));
        let rows = vec![
            vec![json!("A"), json!("B"), json!(10)],
            vec![json!("B"), json!("A"), json!(5)],
            vec![json!("A"), json!("B"), json!("x")],
        ];
        let diagram = ChordDiagram::prepare(&headings(), &rows, &options);
        assert_eq!(diagram.participants, ["A", "B"]);
        assert_eq!(diagram.matrix, vec![vec![0.0, 10.0], vec![5.0, 0.0]]);
        assert_eq!(diagram.group_values, vec![10.0, 5.0]);
        assert_eq!(diagram.colors, ["#1f77b4", "#ff7f0e"]);
    }

    #[test]
    fn coinciding_columns_give_an_empty_diagram() {
        let same = ["Source", "Source", "Volume"].map(String::from);
        let rows = vec![vec![json!("A"), json!("A"), json!(1)]];
        let diagram = ChordDiagram::prepare(&same, &rows, &ChordConfig::default());
        assert!(diagram.is_empty());
    }

    #[test]
    fn surfaces_display_lowercase() {
        assert_eq!(Surface::Preview.to_string(), "preview");
        assert_eq!(
            serde_json::to_value(Surface::Export).unwrap(),
            json!("export")
        );
    }
}
