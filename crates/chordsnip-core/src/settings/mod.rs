//! Settings panel model.
//!
//! The panel is a flat set of named controls grouped into pages ("branches"). Reading the panel
//! produces an immutable [`ChordSettings`] snapshot; pages that own a reset control reserve their
//! values on entry and reinstate them on exit through [`BranchStore`]. Saved settings live in
//! [`ScopeStore`], seeded once at startup from a [`SettingsProvider`].

mod branch;
mod controls;
mod layout;
mod model;
mod panel;
mod scopes;
mod values;

pub use branch::{BranchState, BranchStore};
pub use controls::{ControlKind, ControlSpec, standard_controls};
pub use layout::{Page, PanelLayout};
pub use model::{
    ChartOptions, ChordOptions, ChordSettings, LabelOptions, LinkColor, LinkOptions, NodeOptions,
    ScaleSettings, SortGroups,
};
pub use panel::ControlPanel;
pub use scopes::{
    LoadedSettings, ManageAction, SavedSettings, ScopeStore, SettingsProvider, SettingsScope,
};
pub use values::{ControlValues, control_bool, control_f64, control_i64, control_str};
