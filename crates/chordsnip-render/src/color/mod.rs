//! Participant colors: ordinal palettes and HSL ramps.

mod hsl;
pub mod palettes;

use chordsnip_core::ChordData;
use hsl::{Hsl, fmt_rgb, hsl_to_rgb, interpolate_hsl, parse_color, rgb_to_hsl};
use rustc_hash::FxHashMap;

pub const RAMP_POSITION: &str = "rampPosition";
pub const RAMP_VALUE: &str = "rampValue";

const DEFAULT_RAMP_START: &str = "#3F51B5";
const DEFAULT_RAMP_END: &str = "#FF5722";

/// How link and node colors are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorMode {
    /// `palette[i % len]` for the i-th participant.
    Categorical(Vec<String>),
    /// Ramp keyed by participant index over `[0, participant count]`.
    RampPosition,
    /// Ramp keyed by participant total over `[min total, max total]`.
    RampValue,
}

impl ColorMode {
    /// Resolves a `linkColorMode` value. Unknown names fall back to the default palette.
    pub fn parse(name: &str) -> Self {
        match name {
            RAMP_POSITION => Self::RampPosition,
            RAMP_VALUE => Self::RampValue,
            _ => {
                let palette = palettes::named_palette(name).unwrap_or_else(|| {
                    tracing::warn!(
                        mode = name,
                        fallback = palettes::DEFAULT_PALETTE,
                        "unknown link color mode"
                    );
                    &palettes::GOOGLE_20[..]
                });
                Self::palette(palette.iter().copied())
            }
        }
    }

    pub fn palette<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Categorical(colors.into_iter().map(Into::into).collect())
    }
}

/// Colors for every participant of one diagram.
///
/// Computed once from the model, independently of the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorAssigner {
    colors: Vec<String>,
    by_participant: FxHashMap<String, usize>,
}

impl ColorAssigner {
    /// `start` and `end` are the ramp endpoints; they are ignored by categorical modes.
    pub fn new(mode: &ColorMode, start: &str, end: &str, data: &ChordData) -> Self {
        let n = data.len();
        let colors: Vec<String> = match mode {
            ColorMode::Categorical(palette) => {
                if palette.is_empty() {
                    return Self::new(&ColorMode::parse(palettes::DEFAULT_PALETTE), start, end, data);
                }
                (0..n).map(|i| palette[i % palette.len()].clone()).collect()
            }
            ColorMode::RampPosition => {
                let ramp = Ramp::new(start, end, 0.0, n as f64);
                (0..n).map(|i| ramp.color(i as f64)).collect()
            }
            ColorMode::RampValue => {
                let totals = data.group_values();
                let min = totals.iter().copied().fold(f64::INFINITY, f64::min);
                let max = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let ramp = Ramp::new(start, end, min, max);
                totals.iter().map(|&v| ramp.color(v)).collect()
            }
        };

        let by_participant = data
            .participants
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();
        Self {
            colors,
            by_participant,
        }
    }

    /// Convenience for the settings' `colorMode` + ramp colors.
    pub fn from_mode_name(mode: &str, start: &str, end: &str, data: &ChordData) -> Self {
        Self::new(&ColorMode::parse(mode), start, end, data)
    }

    pub fn color(&self, participant: &str) -> Option<&str> {
        let idx = *self.by_participant.get(participant)?;
        self.color_at(idx)
    }

    pub fn color_at(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    /// Colors in participant order.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn into_colors(self) -> Vec<String> {
        self.colors
    }
}

/// A darker shade of `color` for strokes. Colors that do not parse are returned unchanged.
pub fn darker(color: &str) -> String {
    match parse_color(color) {
        Some(rgb) => fmt_rgb(hsl_to_rgb(hsl::darker(rgb_to_hsl(rgb), 1.0))),
        None => color.to_string(),
    }
}

struct Ramp {
    start: Hsl,
    end: Hsl,
    lo: f64,
    hi: f64,
}

impl Ramp {
    fn new(start: &str, end: &str, lo: f64, hi: f64) -> Self {
        Self {
            start: ramp_endpoint(start, DEFAULT_RAMP_START),
            end: ramp_endpoint(end, DEFAULT_RAMP_END),
            lo,
            hi,
        }
    }

    fn color(&self, key: f64) -> String {
        let span = self.hi - self.lo;
        let t = if span == 0.0 || !span.is_finite() {
            0.5
        } else {
            (key - self.lo) / span
        };
        fmt_rgb(hsl_to_rgb(interpolate_hsl(self.start, self.end, t)))
    }
}

fn ramp_endpoint(color: &str, fallback: &str) -> Hsl {
    let rgb = parse_color(color).or_else(|| {
        tracing::warn!(color, fallback, "invalid ramp color");
        parse_color(fallback)
    });
    rgb.map(rgb_to_hsl).unwrap_or(Hsl {
        h: f64::NAN,
        s: f64::NAN,
        l: 0.0,
    })
}
