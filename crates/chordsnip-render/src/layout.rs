//! Chord layout: group arcs and ribbon endpoints on the circle.
//!
//! Angles are radians, clockwise from 12 o'clock. Each group's arc is split into one subgroup per
//! target in participant order; ribbons join the `i -> j` subgroup with the `j -> i` subgroup.

use chordsnip_core::settings::SortGroups;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupArc {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordEnd {
    pub index: usize,
    pub subindex: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub value: f64,
}

/// A ribbon. `source` is the heavier end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ribbon {
    pub source: ChordEnd,
    pub target: ChordEnd,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChordLayout {
    /// Indexed by participant, whatever the drawing order.
    pub groups: Vec<GroupArc>,
    pub ribbons: Vec<Ribbon>,
}

pub fn chord_layout(matrix: &[Vec<f64>], pad_angle: f64, sort: SortGroups) -> ChordLayout {
    let n = matrix.len();
    if n == 0 {
        return ChordLayout::default();
    }
    let cell = |i: usize, j: usize| -> f64 {
        matrix
            .get(i)
            .and_then(|row| row.get(j))
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    };

    let sums: Vec<f64> = (0..n).map(|i| (0..n).map(|j| cell(i, j)).sum()).collect();
    let total: f64 = sums.iter().sum();

    let mut order: Vec<usize> = (0..n).collect();
    match sort {
        SortGroups::None => {}
        SortGroups::Ascending => order.sort_by(|&a, &b| sums[a].total_cmp(&sums[b])),
        SortGroups::Descending => order.sort_by(|&a, &b| sums[b].total_cmp(&sums[a])),
    }

    let pad_angle = if pad_angle.is_finite() { pad_angle.max(0.0) } else { 0.0 };
    let k = if total > 0.0 {
        (TAU - pad_angle * n as f64).max(0.0) / total
    } else {
        0.0
    };
    let dx = if k > 0.0 { pad_angle } else { TAU / n as f64 };

    let mut groups: Vec<Option<GroupArc>> = vec![None; n];
    let mut subgroups: Vec<Option<ChordEnd>> = vec![None; n * n];
    let mut x = 0.0;
    for &di in &order {
        let x0 = x;
        for dj in 0..n {
            let v = cell(di, dj);
            let a0 = x;
            x += v * k;
            subgroups[dj * n + di] = Some(ChordEnd {
                index: di,
                subindex: dj,
                start_angle: a0,
                end_angle: x,
                value: v,
            });
        }
        groups[di] = Some(GroupArc {
            index: di,
            start_angle: x0,
            end_angle: x,
            value: sums[di],
        });
        x += dx;
    }

    let mut ribbons = Vec::new();
    for i in 0..n {
        for j in i..n {
            let (Some(source), Some(target)) = (subgroups[j * n + i], subgroups[i * n + j]) else {
                continue;
            };
            if source.value == 0.0 && target.value == 0.0 {
                continue;
            }
            ribbons.push(if source.value < target.value {
                Ribbon {
                    source: target,
                    target: source,
                }
            } else {
                Ribbon { source, target }
            });
        }
    }

    ChordLayout {
        groups: groups.into_iter().flatten().collect(),
        ribbons,
    }
}
