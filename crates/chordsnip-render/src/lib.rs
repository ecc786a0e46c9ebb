#![forbid(unsafe_code)]

//! Everything between a chord model and a vector-graphics renderer.
//!
//! The renderer itself is pluggable ([`ChordRenderer`]); this crate decides colors, derives the
//! export-resolution options from the preview options, drives the preview + export render pair
//! and extracts portable SVG markup from the export surface. [`SvgChordRenderer`] is a
//! self-contained renderer that draws straight to SVG strings.

pub mod color;
pub mod draw;
pub mod error;
pub mod export;
pub mod layout;
pub mod renderer;
pub mod scale;
pub mod svg;

pub use color::{ColorAssigner, ColorMode};
pub use draw::{ChartDefaults, DrawOutcome, draw_chart, preview_options};
pub use error::{Error, Result};
pub use export::{export_name, export_payload, extract_svg_markup, rewrite_url_references};
pub use renderer::{ChordDiagram, ChordRenderer, RenderRequest, Surface};
pub use scale::export_options;
pub use svg::SvgChordRenderer;
