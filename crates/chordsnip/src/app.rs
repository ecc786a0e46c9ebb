//! The application context: one owner for panel state, saved scopes, page reservations, column
//! roles and the last drawn chart.

use chordsnip_core::cell::cell_identity;
use chordsnip_core::settings::{ManageAction, control_bool, control_i64, control_str};
use chordsnip_core::{
    BranchStore, Cell, ChartTable, ChordSettings, ControlPanel, ControlValues, FieldSelector,
    Role, RoleAssignment, ScopeStore, SettingsProvider, SettingsScope,
};
use chordsnip_render::{ChartDefaults, ChordRenderer, DrawOutcome, draw_chart, export_name};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] chordsnip_core::Error),
    #[error(transparent)]
    Render(#[from] chordsnip_render::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// One poll of the sheet reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetResult {
    /// Row 0 holds the headings, the rest is data. `None` when the reader had nothing new.
    #[serde(default)]
    pub data: Option<Vec<Vec<Cell>>>,
    /// Set when the range was emptied on purpose, so an empty `data` still counts.
    #[serde(default)]
    pub clear: bool,
    #[serde(default)]
    pub checksum: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchEvent {
    Enter,
    Exit,
}

const USE_GROUP: &str = "use-group";
const MANAGE_GROUP: &str = "manage-group";

#[derive(Debug)]
pub struct ChordApp {
    panel: ControlPanel,
    scopes: ScopeStore,
    branches: BranchStore,
    fields: FieldSelector,
    defaults: ChartDefaults,
    settings: ChordSettings,
    headings: Vec<String>,
    rows: Vec<Vec<Cell>>,
    table: ChartTable,
    checksum: Option<String>,
    outcome: DrawOutcome,
}

impl ChordApp {
    /// Loads saved settings and builds the context. Nothing is usable before this resolves.
    ///
    /// A provider failure aborts initialization.
    pub async fn initialize<P>(provider: &P, defaults: ChartDefaults) -> Result<Self>
    where
        P: SettingsProvider,
    {
        let loaded = provider.load_all().await.map_err(|err| {
            tracing::error!(error = %err, "failed while getting saved properties");
            chordsnip_core::Error::SettingsLoad {
                message: err.to_string(),
            }
        })?;

        let mut panel = ControlPanel::default();
        let scopes = ScopeStore::seed(&mut panel, loaded);

        if control_i64(panel.current(), "previewWidth") == 0 {
            panel.set_value("previewWidth", json!(defaults.width))?;
        }

        let settings = panel.settings();
        let mut app = Self {
            panel,
            scopes,
            branches: BranchStore::new(),
            fields: FieldSelector::new(),
            defaults,
            settings,
            headings: Vec::new(),
            rows: Vec::new(),
            table: ChartTable::default(),
            checksum: None,
            outcome: DrawOutcome::NoData,
        };
        app.pull_column_controls();
        tracing::debug!(
            scopes = SettingsScope::ALL
                .into_iter()
                .filter(|s| app.scopes.is_available(*s))
                .count(),
            "settings initialized"
        );
        Ok(app)
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn scopes(&self) -> &ScopeStore {
        &self.scopes
    }

    pub fn branches(&self) -> &BranchStore {
        &self.branches
    }

    pub fn settings(&self) -> &ChordSettings {
        &self.settings
    }

    pub fn assignment(&self) -> &RoleAssignment {
        self.fields.assignment()
    }

    pub fn column_options(&self, role: Role) -> &[String] {
        self.fields.options(role)
    }

    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    pub fn table(&self) -> &ChartTable {
        &self.table
    }

    pub fn outcome(&self) -> &DrawOutcome {
        &self.outcome
    }

    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// The embeddable markup of the last successful draw.
    pub fn export_svg(&self) -> Option<&str> {
        self.outcome.export_svg()
    }

    /// A fresh file name for the export.
    pub fn export_name(&self) -> String {
        export_name()
    }

    /// `"Sheet"` when the whole sheet is watched, `"Active"` for the selected range.
    pub fn watch_scope(&self) -> &'static str {
        if control_bool(self.panel.current(), "wholeSheet") {
            "Sheet"
        } else {
            "Active"
        }
    }

    pub fn applies_filters(&self) -> bool {
        control_bool(self.panel.current(), "applyFilters")
    }

    pub fn is_scope_available(&self, scope: SettingsScope) -> bool {
        self.scopes.is_available(scope)
    }

    /// Rereads the panel into a settings snapshot. Returns whether anything changed.
    pub fn apply_panel(&mut self) -> bool {
        let settings = self.panel.settings();
        if settings == self.settings {
            return false;
        }
        self.settings = settings;
        true
    }

    /// Takes in a sheet poll, reassigns column roles and redraws.
    ///
    /// Polls without data (or with empty data that is not an explicit clear) are ignored and
    /// return `None`.
    pub fn sync_result<R>(&mut self, result: SheetResult, renderer: &mut R) -> Option<&DrawOutcome>
    where
        R: ChordRenderer + ?Sized,
    {
        let data = result.data?;
        if data.is_empty() && !result.clear {
            return None;
        }
        self.checksum = result.checksum;

        let mut data = data.into_iter();
        self.headings = data
            .next()
            .map(|row| {
                row.iter()
                    .map(|cell| cell_identity(cell).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        self.rows = data.collect();

        self.table = self.fields.select_fields(&self.headings, &self.rows);
        self.push_column_controls();
        Some(self.redraw(renderer))
    }

    /// Draws the current table with the current settings. A renderer failure is logged and
    /// leaves the previous outcome in place.
    pub fn redraw<R>(&mut self, renderer: &mut R) -> &DrawOutcome
    where
        R: ChordRenderer + ?Sized,
    {
        match draw_chart(renderer, &self.table, &self.settings, &self.defaults) {
            Ok(outcome) => self.outcome = outcome,
            Err(err) => {
                tracing::warn!(error = %err, "chart render failed");
            }
        }
        &self.outcome
    }

    /// Page navigation. Resettable pages reserve their values on entry and have them reinstated
    /// on exit; other pages ignore both events.
    pub fn handle_branch_event(&mut self, branch: &str, event: BranchEvent) -> Result<()> {
        let page = self.panel.layout().page(branch).ok_or_else(|| {
            chordsnip_core::Error::UnknownBranch {
                branch: branch.to_string(),
            }
        })?;
        if !page.resettable {
            return Ok(());
        }

        match event {
            BranchEvent::Enter => {
                let keys = self.panel.branch_keys(branch)?;
                self.branches.reserve(branch, self.panel.current(), keys);
            }
            BranchEvent::Exit => {
                if let Some(values) = self.branches.restore(branch, self.panel.current()) {
                    self.apply_values(&values);
                }
            }
        }
        Ok(())
    }

    /// A user edit of one control. Edits to a reserved page enable its reset control.
    pub fn set_control(&mut self, key: &str, value: Value) -> Result<()> {
        self.panel.set_value(key, value)?;
        if let Some(branch) = self.panel.layout().branch_of(key) {
            self.branches.mark_dirty(branch);
        }

        if let Some(role) = Role::ALL.into_iter().find(|r| r.control_key() == key) {
            let heading = control_str(self.panel.current(), key).to_string();
            self.fields.select(role, Some(heading));
            self.push_column_controls();
            self.table = self.fields.project(&self.headings, &self.rows);
        }
        self.apply_panel();
        Ok(())
    }

    /// Whether the page's reset control should be enabled.
    pub fn is_reset_enabled(&self, branch: &str) -> bool {
        self.branches.is_dirty(branch)
    }

    /// The page's reset control: reinstates the values reserved on entry and stays on the page.
    pub fn reset_branch(&mut self, branch: &str) -> bool {
        match self.branches.reset(branch, self.panel.current()) {
            Some(values) => {
                self.apply_values(&values);
                true
            }
            None => false,
        }
    }

    /// Applies a saved scope over the live values.
    pub fn apply_scope(&mut self, scope: SettingsScope) -> Result<()> {
        let values = self.scopes.require(scope)?.clone();
        tracing::debug!(%scope, "applying saved settings");
        self.apply_values(&values);
        Ok(())
    }

    /// The manage page's apply button: applies whichever scope is checked.
    pub fn apply_checked_scope(&mut self) -> Result<()> {
        match self.checked_scope() {
            Some(scope) => self.apply_scope(scope),
            None => Ok(()),
        }
    }

    pub fn checked_scope(&self) -> Option<SettingsScope> {
        self.panel
            .checked_in_group(USE_GROUP)
            .and_then(SettingsScope::from_key)
    }

    pub fn checked_manage_action(&self) -> Option<ManageAction> {
        self.panel
            .checked_in_group(MANAGE_GROUP)
            .and_then(ManageAction::from_key)
    }

    /// Saves or clears a scope. Returns the values to persist for saves, `None` for clears.
    pub fn manage(&mut self, action: ManageAction) -> Option<ControlValues> {
        let scope = action.scope();
        match action {
            ManageAction::SaveDocument | ManageAction::SaveUser => {
                let values = self.panel.resetable_values();
                self.scopes.save(scope, values.clone());
                tracing::debug!(%scope, keys = values.len(), "settings saved");
                Some(values)
            }
            ManageAction::ClearDocument | ManageAction::ClearUser => {
                if self.scopes.clear(scope) {
                    tracing::debug!(%scope, "saved settings cleared");
                }
                None
            }
        }
    }

    fn apply_values(&mut self, values: &ControlValues) {
        self.panel.apply_settings(values);
        self.pull_column_controls();
        self.apply_panel();
    }

    /// Column controls -> field selector. Selections naming a column this sheet lacks are
    /// dropped and re-inferred.
    fn pull_column_controls(&mut self) {
        for role in Role::ALL {
            let wanted = control_str(self.panel.current(), role.control_key());
            let wanted = (!wanted.is_empty()).then(|| wanted.to_string());
            if self.fields.assignment().get(role) != wanted.as_deref() {
                self.fields.select(role, wanted);
            }
        }
        self.fields.refresh(&self.headings);
        self.push_column_controls();
        self.table = self.fields.project(&self.headings, &self.rows);
    }

    /// Field selector -> column controls.
    fn push_column_controls(&mut self) {
        for role in Role::ALL {
            let heading = self.fields.assignment().get(role).unwrap_or_default();
            if let Some(slot) = self.panel.value(role.control_key()) {
                if slot.as_str() == Some(heading) {
                    continue;
                }
            }
            let mut values = ControlValues::new();
            values.insert(role.control_key().to_string(), json!(heading));
            self.panel.apply_settings(&values);
        }
    }
}
