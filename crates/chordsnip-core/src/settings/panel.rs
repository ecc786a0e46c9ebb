use super::controls::{ControlKind, ControlSpec, standard_controls};
use super::layout::PanelLayout;
use super::model::ChordSettings;
use super::values::ControlValues;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;

/// Control values of the settings panel: factory ("standard"), startup ("initial") and live
/// ("current").
#[derive(Debug, Clone)]
pub struct ControlPanel {
    layout: PanelLayout,
    specs: IndexMap<String, ControlSpec>,
    standard: ControlValues,
    initial: ControlValues,
    current: ControlValues,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(PanelLayout::standard(), standard_controls())
    }
}

impl ControlPanel {
    pub fn new(layout: PanelLayout, specs: Vec<ControlSpec>) -> Self {
        let specs: IndexMap<String, ControlSpec> = specs
            .into_iter()
            .map(|spec| (spec.key.to_string(), spec))
            .collect();
        let standard: ControlValues = specs
            .iter()
            .map(|(key, spec)| (key.clone(), spec.standard.clone()))
            .collect();
        Self {
            layout,
            specs,
            initial: standard.clone(),
            current: standard.clone(),
            standard,
        }
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    pub fn spec(&self, key: &str) -> Option<&ControlSpec> {
        self.specs.get(key)
    }

    pub fn standard(&self) -> &ControlValues {
        &self.standard
    }

    pub fn initial(&self) -> &ControlValues {
        &self.initial
    }

    pub fn current(&self) -> &ControlValues {
        &self.current
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.current.get(key)
    }

    /// Reads the live values as a chart configuration snapshot.
    pub fn settings(&self) -> ChordSettings {
        ChordSettings::from_controls(&self.current)
    }

    /// Overlays saved values onto both the initial and the live values. Unknown keys are ignored.
    pub fn set_initial(&mut self, values: &ControlValues) {
        for (key, value) in values {
            if !self.specs.contains_key(key) {
                tracing::debug!(%key, "ignoring saved value for unknown control");
                continue;
            }
            self.initial.insert(key.clone(), value.clone());
            self.current.insert(key.clone(), value.clone());
        }
    }

    /// Overlays `values` onto the live values. Unknown keys are ignored.
    pub fn apply_settings(&mut self, values: &ControlValues) {
        for (key, value) in values {
            if let Some(slot) = self.current.get_mut(key) {
                *slot = value.clone();
            }
        }
    }

    /// Sets one control. Switching a radio on switches the rest of its group off.
    pub fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        let Some(spec) = self.specs.get(key) else {
            return Err(Error::UnknownControl {
                key: key.to_string(),
            });
        };

        if let ControlKind::Radio { group } = spec.kind {
            if value == Value::Bool(true) {
                let siblings: Vec<String> = self
                    .specs
                    .values()
                    .filter(|s| s.key != key && s.kind == (ControlKind::Radio { group }))
                    .map(|s| s.key.to_string())
                    .collect();
                for sibling in siblings {
                    self.current.insert(sibling, Value::Bool(false));
                }
            }
        }

        self.current.insert(key.to_string(), value);
        Ok(())
    }

    /// The keys of the value-bearing controls listed on `branch`.
    pub fn branch_keys(&self, branch: &str) -> Result<Vec<String>> {
        let page = self.layout.page(branch).ok_or_else(|| Error::UnknownBranch {
            branch: branch.to_string(),
        })?;
        Ok(page
            .items
            .iter()
            .filter(|item| self.specs.contains_key(item.as_str()))
            .cloned()
            .collect())
    }

    /// Live values of the controls that are part of saved settings.
    pub fn resetable_values(&self) -> ControlValues {
        self.current
            .iter()
            .filter(|(key, _)| self.specs.get(key.as_str()).is_some_and(|s| s.resetable))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// The checked control of a radio group, if any.
    pub fn checked_in_group(&self, group: &str) -> Option<&str> {
        self.specs
            .values()
            .filter(|s| matches!(s.kind, ControlKind::Radio { group: g } if g == group))
            .find(|s| self.current.get(s.key) == Some(&Value::Bool(true)))
            .map(|s| s.key)
    }
}
