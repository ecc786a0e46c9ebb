use super::panel::ControlPanel;
use super::values::ControlValues;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;

/// Where a set of saved settings comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingsScope {
    /// Factory values.
    #[serde(rename = "useStandard")]
    Standard,
    /// Saved with the current document.
    #[serde(rename = "useDocument")]
    Document,
    /// Saved for the current user across documents.
    #[serde(rename = "useUser")]
    User,
    /// Whatever the panel started with after saved settings were applied.
    #[serde(rename = "useInitial")]
    Initial,
}

impl SettingsScope {
    pub const ALL: [SettingsScope; 4] = [
        SettingsScope::Standard,
        SettingsScope::Document,
        SettingsScope::User,
        SettingsScope::Initial,
    ];

    /// The key used both on the wire and as the panel's "use" radio.
    pub fn key(self) -> &'static str {
        match self {
            SettingsScope::Standard => "useStandard",
            SettingsScope::Document => "useDocument",
            SettingsScope::User => "useUser",
            SettingsScope::Initial => "useInitial",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl std::fmt::Display for SettingsScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSettings {
    pub source: SettingsScope,
    /// `None` when nothing is saved for this scope.
    #[serde(default)]
    pub settings: Option<ControlValues>,
}

/// Everything the property store hands back at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedSettings {
    #[serde(default)]
    pub auth: Value,
    #[serde(default)]
    pub saved: Vec<SavedSettings>,
}

/// The host's property store, fetched once before the panel is usable.
pub trait SettingsProvider {
    type Error: std::fmt::Display;

    fn load_all(&self) -> impl Future<Output = std::result::Result<LoadedSettings, Self::Error>>;
}

/// What the save page's action button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageAction {
    /// `makePermanent`
    SaveDocument,
    /// `makeDefault`
    SaveUser,
    /// `clearPermanent`
    ClearDocument,
    /// `clearDefault`
    ClearUser,
}

impl ManageAction {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "makePermanent" => Some(Self::SaveDocument),
            "makeDefault" => Some(Self::SaveUser),
            "clearPermanent" => Some(Self::ClearDocument),
            "clearDefault" => Some(Self::ClearUser),
            _ => None,
        }
    }

    pub fn scope(self) -> SettingsScope {
        match self {
            Self::SaveDocument | Self::ClearDocument => SettingsScope::Document,
            Self::SaveUser | Self::ClearUser => SettingsScope::User,
        }
    }
}

/// Saved settings by scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeStore {
    auth: Value,
    scopes: IndexMap<SettingsScope, ControlValues>,
}

impl ScopeStore {
    /// Seeds the store from the startup fetch and folds every saved entry into the panel's initial
    /// values, in arrival order (later entries win).
    pub fn seed(panel: &mut ControlPanel, loaded: LoadedSettings) -> Self {
        let mut store = Self {
            auth: loaded.auth,
            scopes: IndexMap::new(),
        };
        store
            .scopes
            .insert(SettingsScope::Standard, panel.standard().clone());

        for entry in loaded.saved {
            match entry.settings {
                Some(settings) => {
                    panel.set_initial(&settings);
                    store.scopes.insert(entry.source, settings);
                }
                None => {
                    store.scopes.shift_remove(&entry.source);
                }
            }
        }

        store
            .scopes
            .insert(SettingsScope::Initial, panel.initial().clone());
        store
    }

    pub fn auth(&self) -> &Value {
        &self.auth
    }

    pub fn get(&self, scope: SettingsScope) -> Option<&ControlValues> {
        self.scopes.get(&scope)
    }

    /// Whether the scope's "use" option should be offered.
    pub fn is_available(&self, scope: SettingsScope) -> bool {
        self.scopes.contains_key(&scope)
    }

    pub fn require(&self, scope: SettingsScope) -> Result<&ControlValues> {
        self.get(scope).ok_or_else(|| Error::UnavailableScope {
            scope: scope.to_string(),
        })
    }

    pub fn save(&mut self, scope: SettingsScope, values: ControlValues) {
        self.scopes.insert(scope, values);
    }

    pub fn clear(&mut self, scope: SettingsScope) -> bool {
        self.scopes.shift_remove(&scope).is_some()
    }
}
