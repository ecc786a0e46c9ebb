use crate::cell::{Cell, cell_identity, parse_weight};
use serde::{Deserialize, Serialize};

/// A validated flow: `weight` units moving from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl Row {
    /// Validates a raw `[source, target, weight]` row. Extra cells are ignored.
    pub fn from_cells(cells: &[Cell]) -> Option<Self> {
        let source = cell_identity(cells.first()?)?;
        let target = cell_identity(cells.get(1)?)?;
        let weight = parse_weight(cells.get(2)?)?;
        Some(Self {
            source,
            target,
            weight,
        })
    }
}

/// Lazily filters raw rows down to valid [`Row`]s, preserving order.
///
/// Malformed rows are dropped silently: the sheet is usually mid-edit when this runs, so an
/// incomplete row is expected input rather than an error.
pub fn sanitize_rows<I>(rows: I) -> impl Iterator<Item = Row>
where
    I: IntoIterator,
    I::Item: AsRef<[Cell]>,
{
    rows.into_iter().filter_map(|row| Row::from_cells(row.as_ref()))
}
