#![forbid(unsafe_code)]

//! Chord diagram data model + settings panel state (headless).
//!
//! This crate holds everything that sits between a spreadsheet range and a chord renderer:
//! - lenient cell coercion and row sanitizing (`rows`)
//! - participant ordering and the weighted flow matrix (`matrix`)
//! - automatic column-to-role assignment (`fields`)
//! - the settings panel model: controls, pages, per-page reservations and saved scopes
//!   (`settings`)
//!
//! Nothing here draws; rendering is delegated through `chordsnip-render`.

pub mod cell;
pub mod config;
pub mod error;
pub mod fields;
pub mod matrix;
pub mod rows;
pub mod sample;
pub mod settings;

pub use cell::Cell;
pub use config::ChordConfig;
pub use error::{Error, Result};
pub use fields::{ChartTable, FieldSelector, Role, RoleAssignment};
pub use matrix::{ChordData, build_chord_data};
pub use rows::{Row, sanitize_rows};
pub use settings::{
    BranchState, BranchStore, ChartOptions, ChordSettings, ControlPanel, ControlValues,
    LoadedSettings, PanelLayout, SavedSettings, ScaleSettings, ScopeStore, SettingsProvider,
    SettingsScope,
};

#[cfg(test)]
mod tests;
