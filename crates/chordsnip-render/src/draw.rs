//! Preview + export draw orchestration.

use crate::export::export_payload;
use crate::renderer::{ChordDiagram, ChordRenderer, RenderRequest, Surface};
use crate::scale::export_options;
use crate::Result;
use chordsnip_core::{ChartOptions, ChartTable, ChordConfig, ChordSettings};
use serde_json::json;

pub const DEFAULT_CHART_WIDTH: f64 = 300.0;

/// Host-provided chart defaults, merged under the settings' options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDefaults {
    /// Width of the preview container.
    pub width: f64,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Nothing to draw: show the instructions and disable insertion.
    NoData,
    /// Both surfaces were drawn. `export_svg` is empty when the export surface held no markup.
    Drawn { export_svg: String },
}

impl DrawOutcome {
    pub fn export_svg(&self) -> Option<&str> {
        match self {
            DrawOutcome::NoData => None,
            DrawOutcome::Drawn { export_svg } => Some(export_svg),
        }
    }

    /// Whether the chart can be inserted into the document.
    pub fn can_insert(&self) -> bool {
        matches!(self, DrawOutcome::Drawn { .. })
    }
}

/// `defaults` with the settings' options merged over them. A zero (or unusable) width falls back
/// to the default width.
pub fn preview_options(defaults: &ChartDefaults, options: &ChartOptions) -> Result<ChordConfig> {
    let mut merged = ChordConfig::from_value(json!({ "width": defaults.width }));
    merged.deep_merge(&serde_json::to_value(options)?);

    let usable = merged
        .get_f64("width")
        .is_some_and(|w| w.is_finite() && w != 0.0);
    if !usable {
        merged.set_f64("width", defaults.width);
    }
    Ok(merged)
}

/// Draws `table` on the preview surface, then at export scale on the export surface, and returns
/// the portable export markup.
///
/// Renderer failures are returned as-is; the caller decides how to report them.
pub fn draw_chart<R>(
    renderer: &mut R,
    table: &ChartTable,
    settings: &ChordSettings,
    defaults: &ChartDefaults,
) -> Result<DrawOutcome>
where
    R: ChordRenderer + ?Sized,
{
    if table.is_empty() {
        return Ok(DrawOutcome::NoData);
    }

    let preview = preview_options(defaults, &settings.options)?;
    let diagram = ChordDiagram::prepare(&table.headings, &table.rows, &preview);
    renderer.render(&RenderRequest {
        options: &preview,
        headings: &table.headings,
        diagram: &diagram,
        surface: Surface::Preview,
        clear: true,
    })?;

    let big = export_options(&preview, &settings.scale);
    renderer.render(&RenderRequest {
        options: &big,
        headings: &table.headings,
        diagram: &diagram,
        surface: Surface::Export,
        clear: true,
    })?;

    let export_svg = export_payload(renderer.markup(Surface::Export).as_deref());
    tracing::debug!(
        participants = diagram.participants.len(),
        export_bytes = export_svg.len(),
        "chart drawn"
    );
    Ok(DrawOutcome::Drawn { export_svg })
}
