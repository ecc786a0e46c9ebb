#![forbid(unsafe_code)]

//! `chordsnip` turns spreadsheet flow data into chord diagrams, headlessly.
//!
//! Rows of `[source, target, weight]` cells become an ordered participant list and a weighted
//! flow matrix; a settings panel model decides styling and export scale; a pluggable renderer
//! draws a preview and an export-resolution chart whose SVG markup is made portable for
//! embedding.
//!
//! The data model and settings live in `chordsnip-core` (re-exported at the root), colors and
//! render orchestration in `chordsnip-render` (re-exported as [`render`]). [`ChordApp`] ties them
//! together as one explicit application context.

pub use chordsnip_core::*;

pub mod app;

pub use app::{AppError, BranchEvent, ChordApp, SheetResult};

pub mod render {
    pub use chordsnip_render::color::palettes;
    pub use chordsnip_render::draw::DEFAULT_CHART_WIDTH;
    pub use chordsnip_render::export::export_name_at;
    pub use chordsnip_render::{
        ChartDefaults, ChordDiagram, ChordRenderer, ColorAssigner, ColorMode, DrawOutcome,
        RenderRequest, SvgChordRenderer, Surface, draw_chart, export_name, export_options,
        export_payload, extract_svg_markup, preview_options, rewrite_url_references,
    };
    pub use chordsnip_render::{Error, Result};
}
