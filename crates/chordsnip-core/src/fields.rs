//! Column-to-role assignment.
//!
//! The three diagram roles (`from`, `to`, `value`) are filled from the sheet's headings. The
//! selector prefers keeping whatever the user (or a previous run) picked; otherwise it falls back
//! to a preferred heading name, then to the heading at the role's position. No two roles ever hold
//! the same heading.

use crate::cell::Cell;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    From,
    To,
    Value,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::From, Role::To, Role::Value];

    pub fn position(self) -> usize {
        match self {
            Role::From => 0,
            Role::To => 1,
            Role::Value => 2,
        }
    }

    pub fn preferred_default(self) -> &'static str {
        match self {
            Role::From => "Source",
            Role::To => "Target",
            Role::Value => "Volume",
        }
    }

    /// The settings control that mirrors this role's selection.
    pub fn control_key(self) -> &'static str {
        match self {
            Role::From => "fromColumn",
            Role::To => "toColumn",
            Role::Value => "weightColumn",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub from: Option<String>,
    pub to: Option<String>,
    pub value: Option<String>,
}

impl RoleAssignment {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::From => self.from.as_deref(),
            Role::To => self.to.as_deref(),
            Role::Value => self.value.as_deref(),
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::From => &mut self.from,
            Role::To => &mut self.to,
            Role::Value => &mut self.value,
        }
    }

    /// Whether any role other than `role` currently holds `heading`.
    fn held_by_other(&self, role: Role, heading: &str) -> bool {
        Role::ALL
            .into_iter()
            .filter(|r| *r != role)
            .any(|r| self.get(r) == Some(heading))
    }

    /// The assigned headings in role order, when every role is assigned to a distinct column.
    pub fn complete_headings(&self) -> Option<[&str; 3]> {
        let from = self.from.as_deref()?;
        let to = self.to.as_deref()?;
        let value = self.value.as_deref()?;
        (from != to && from != value && to != value).then_some([from, to, value])
    }
}

/// Rows projected onto the assigned `[from, to, value]` columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartTable {
    pub headings: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ChartTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FieldSelector {
    preferred: [String; 3],
    options: [Vec<String>; 3],
    assignment: RoleAssignment,
}

impl Default for FieldSelector {
    fn default() -> Self {
        Self {
            preferred: Role::ALL.map(|r| r.preferred_default().to_string()),
            options: Default::default(),
            assignment: RoleAssignment::default(),
        }
    }
}

impl FieldSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferred_default(mut self, role: Role, heading: impl Into<String>) -> Self {
        self.preferred[role.position()] = heading.into();
        self
    }

    pub fn assignment(&self) -> &RoleAssignment {
        &self.assignment
    }

    /// The selectable headings currently offered for `role`.
    pub fn options(&self, role: Role) -> &[String] {
        &self.options[role.position()]
    }

    /// Records an explicit selection. A role that already held `heading` gives it up.
    ///
    /// Once the sheet's headings are known, a heading that is not among them leaves the role
    /// unassigned.
    pub fn select(&mut self, role: Role, heading: Option<String>) {
        let options = &self.options[role.position()];
        let heading = heading.filter(|h| !h.is_empty()).filter(|h| {
            let known = options.is_empty() || options.contains(h);
            if !known {
                tracing::debug!(?role, heading = %h, "ignoring selection of a missing column");
            }
            known
        });
        if let Some(h) = heading.as_deref() {
            for other in Role::ALL.into_iter().filter(|r| *r != role) {
                if self.assignment.get(other) == Some(h) {
                    *self.assignment.slot_mut(other) = None;
                }
            }
        }
        *self.assignment.slot_mut(role) = heading;
    }

    /// Unique, non-empty headings in first-appearance order.
    pub fn available_headings(headings: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(headings.len());
        for h in headings {
            if !h.is_empty() && !out.contains(h) {
                out.push(h.clone());
            }
        }
        out
    }

    /// Brings the assignment up to date with the sheet's current headings.
    pub fn refresh(&mut self, headings: &[String]) -> &RoleAssignment {
        let available = Self::available_headings(headings);
        let before = self.assignment.clone();

        for role in Role::ALL {
            let idx = role.position();
            if self.options[idx] != available {
                self.options[idx] = available.clone();
                let slot = self.assignment.slot_mut(role);
                if slot.as_ref().is_some_and(|h| !available.contains(h)) {
                    *slot = None;
                }
            }
        }

        // One role at a time: its preferred heading first, then the heading at its position.
        // Later roles see what earlier ones claimed.
        for role in Role::ALL {
            if self.assignment.get(role).is_some() {
                continue;
            }
            let best = &self.preferred[role.position()];
            if available.contains(best) && !self.assignment.held_by_other(role, best) {
                *self.assignment.slot_mut(role) = Some(best.clone());
                continue;
            }
            if let Some(candidate) = available.get(role.position()) {
                if !self.assignment.held_by_other(role, candidate) {
                    *self.assignment.slot_mut(role) = Some(candidate.clone());
                }
            }
        }

        if self.assignment != before {
            tracing::debug!(
                from = ?self.assignment.from,
                to = ?self.assignment.to,
                value = ?self.assignment.value,
                "column roles reassigned"
            );
        }
        &self.assignment
    }

    /// Projects `rows` onto the assigned columns, or returns an empty table when the assignment is
    /// incomplete.
    ///
    /// Each row is read as a heading-keyed record, so when a heading repeats the right-most column
    /// wins.
    pub fn project(&self, headings: &[String], rows: &[Vec<Cell>]) -> ChartTable {
        let Some(assigned) = self.assignment.complete_headings() else {
            return ChartTable::default();
        };

        let columns: Vec<Option<usize>> = assigned
            .iter()
            .map(|a| headings.iter().rposition(|h| h == a))
            .collect();

        let rows = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| col.and_then(|c| row.get(c)).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        ChartTable {
            headings: assigned.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    /// [`FieldSelector::refresh`] followed by [`FieldSelector::project`].
    pub fn select_fields(&mut self, headings: &[String], rows: &[Vec<Cell>]) -> ChartTable {
        self.refresh(headings);
        self.project(headings, rows)
    }
}
