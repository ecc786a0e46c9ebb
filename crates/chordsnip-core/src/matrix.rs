use crate::cell::Cell;
use crate::rows::{Row, sanitize_rows};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Participants plus the aggregated flow matrix between them.
///
/// `matrix[i][j]` is the summed weight of every row flowing from `participants[i]` to
/// `participants[j]`. Participants keep first-appearance order, which is also the group order of
/// the diagram and the domain order for colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChordData {
    pub participants: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

impl ChordData {
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        let rows: Vec<Row> = rows.into_iter().collect();

        let mut participants: Vec<String> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        for row in &rows {
            for id in [&row.source, &row.target] {
                if !index.contains_key(id) {
                    index.insert(id.clone(), participants.len());
                    participants.push(id.clone());
                }
            }
        }

        let n = participants.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for row in &rows {
            if let (Some(&i), Some(&j)) = (index.get(&row.source), index.get(&row.target)) {
                matrix[i][j] += row.weight;
            }
        }

        Self {
            participants,
            matrix,
        }
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn index_of(&self, participant: &str) -> Option<usize> {
        self.participants.iter().position(|p| p == participant)
    }

    /// Total outflow per participant (matrix row sums), in participant order.
    pub fn group_values(&self) -> Vec<f64> {
        self.matrix.iter().map(|row| row.iter().sum()).collect()
    }

    pub fn flow(&self, source: &str, target: &str) -> Option<f64> {
        let i = self.index_of(source)?;
        let j = self.index_of(target)?;
        Some(self.matrix[i][j])
    }
}

/// Builds chord data from rows already projected onto `[source, target, weight]` columns.
///
/// Returns `None` when the source and target headings are the same column: a flow from a column
/// to itself has no meaning in a chord diagram.
pub fn build_chord_data(headings: &[String], rows: &[Vec<Cell>]) -> Option<ChordData> {
    if let [from, to, ..] = headings {
        if from == to {
            tracing::debug!(heading = %from, "source and target share a column; skipping diagram");
            return None;
        }
    }

    let clean: Vec<Row> = sanitize_rows(rows).collect();
    if clean.len() < rows.len() {
        tracing::debug!(
            dropped = rows.len() - clean.len(),
            kept = clean.len(),
            "dropped incomplete rows"
        );
    }
    Some(ChordData::from_rows(clean))
}
