use super::values::ControlValues;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    Idle,
    Reserved,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Reservation {
    values: ControlValues,
    /// Set once a control owned by the branch changes after the reservation was taken.
    dirty: bool,
}

/// Per-page snapshots of control values.
///
/// A page reserves the values it owns when it is entered and has them reinstated when it is left,
/// so edits made on one page never leak into another page's baseline. On restore the reserved
/// values take precedence over the live ones for the keys they cover; every other key keeps its
/// live value.
#[derive(Debug, Clone, Default)]
pub struct BranchStore {
    reservations: IndexMap<String, Reservation>,
}

impl BranchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, branch: &str) -> BranchState {
        if self.reservations.contains_key(branch) {
            BranchState::Reserved
        } else {
            BranchState::Idle
        }
    }

    /// Captures the current values of `keys` for `branch`, replacing any earlier reservation.
    /// Keys without a current value are skipped.
    pub fn reserve<I, S>(&mut self, branch: &str, current: &ControlValues, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: ControlValues = keys
            .into_iter()
            .filter_map(|key| {
                let key = key.as_ref();
                current
                    .get(key)
                    .map(|value| (key.to_string(), value.clone()))
            })
            .collect();
        tracing::debug!(branch, keys = values.len(), "reserved page values");
        self.reservations.insert(
            branch.to_string(),
            Reservation {
                values,
                dirty: false,
            },
        );
    }

    /// Consumes the reservation for `branch` and returns `current` with the reserved values merged
    /// over it, or `None` when nothing was reserved.
    pub fn restore(&mut self, branch: &str, current: &ControlValues) -> Option<ControlValues> {
        let reservation = self.reservations.shift_remove(branch)?;
        Some(merge_reserved(current, &reservation.values))
    }

    /// Like [`BranchStore::restore`], but keeps the reservation so the page can be reset again.
    pub fn reset(&mut self, branch: &str, current: &ControlValues) -> Option<ControlValues> {
        let reservation = self.reservations.get_mut(branch)?;
        reservation.dirty = false;
        Some(merge_reserved(current, &reservation.values))
    }

    /// Drops the reservation for `branch`. Returns whether one existed.
    pub fn clear(&mut self, branch: &str) -> bool {
        self.reservations.shift_remove(branch).is_some()
    }

    pub fn reservation(&self, branch: &str) -> Option<&ControlValues> {
        self.reservations.get(branch).map(|r| &r.values)
    }

    /// Marks `branch` as edited since its reservation. Returns `false` when it is not reserved.
    pub fn mark_dirty(&mut self, branch: &str) -> bool {
        match self.reservations.get_mut(branch) {
            Some(reservation) => {
                reservation.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Whether the page's reset control should be enabled.
    pub fn is_dirty(&self, branch: &str) -> bool {
        self.reservations.get(branch).is_some_and(|r| r.dirty)
    }
}

fn merge_reserved(current: &ControlValues, reserved: &ControlValues) -> ControlValues {
    let mut merged = current.clone();
    for (key, value) in reserved {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
