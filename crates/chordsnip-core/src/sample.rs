//! A small planetary trade data set, handy for previews and tests.

use crate::cell::Cell;
use serde_json::json;

/// Sample sheet contents: a heading row followed by `[source, target, volume]` rows.
pub fn sample_sheet() -> Vec<Vec<Cell>> {
    let rows = json!([
        ["Source", "Target", "Volume"],
        ["mars", "venus", 100],
        ["venus", "mars", 25],
        ["venus", "earth", 299],
        ["earth", "mars", 200],
        ["mars", "jupiter", 500],
        ["jupiter", "venus", 200],
        ["venus", "mercury", 100],
        ["mercury", "venus", 50],
        ["earth", "jupiter", 200],
        ["jupiter", "mercury", 800],
        ["venus", "jupiter", 100],
        ["neptune", "pluto", 200],
        ["pluto", "mars", 800],
        ["saturn", "neptune", 100],
        ["saturn", "pluto", 200],
        ["saturn", "venus", 130],
        ["earth", "pluto", 200],
        ["mercury", "earth", 300],
        ["neptune", "venus", 200],
        ["venus", "neptune", 300],
        ["pluto", "neptune", 400]
    ]);

    match rows {
        serde_json::Value::Array(rows) => rows
            .into_iter()
            .map(|row| match row {
                serde_json::Value::Array(cells) => cells,
                other => vec![other],
            })
            .collect(),
        _ => Vec::new(),
    }
}
