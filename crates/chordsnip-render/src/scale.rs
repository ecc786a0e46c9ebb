//! Derives the export-resolution options from the preview options.

use chordsnip_core::{ChordConfig, ScaleSettings};

const WIDTH: &str = "width";
const FONT_SIZE: &str = "chord.node.label.fontSize";
const LABEL_PADDING: &str = "chord.node.labelPadding";
const NODE_PADDING: &str = "chord.node.nodePadding";
const NODE_WIDTH: &str = "chord.node.width";

/// Scales `preview` up (or down) to the export dimensions in `scale`.
///
/// The export width and label font size are taken from `scale`; label padding follows the font
/// ratio, node padding and node thickness follow the width ratio. A value is left unscaled when
/// its preview reference dimension is zero or not finite. The export frame (outer margin and
/// background fill, `null` when transparent) is written under `frame`.
pub fn export_options(preview: &ChordConfig, scale: &ScaleSettings) -> ChordConfig {
    let preview_width = preview.get_f64(WIDTH);
    let preview_font = preview.get_f64(FONT_SIZE);

    let mut big = preview.clone();
    big.set_f64(WIDTH, scale.width);
    big.set_f64(FONT_SIZE, scale.font);

    rescale(&mut big, preview, LABEL_PADDING, preview_font, scale.font);
    rescale(&mut big, preview, NODE_PADDING, preview_width, scale.width);
    rescale(&mut big, preview, NODE_WIDTH, preview_width, scale.width);

    big.set_f64("frame.margin", scale.margin);
    if scale.transparent {
        big.set_value("frame.fill", serde_json::Value::Null);
    } else {
        big.set_value("frame.fill", serde_json::Value::String(scale.fill.clone()));
    }
    big
}

fn rescale(big: &mut ChordConfig, preview: &ChordConfig, path: &str, from: Option<f64>, to: f64) {
    let Some(value) = preview.get_f64(path) else {
        return;
    };
    match from {
        Some(reference) if reference != 0.0 && reference.is_finite() => {
            big.set_f64(path, value / reference * to);
        }
        _ => {
            tracing::debug!(path, ?from, "preview reference is unusable; not scaling");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn preview() -> ChordConfig {
        ChordConfig::from_value(json!({
            "width": 300,
            "chord": {
                "link": { "colorMode": "google20" },
                "node": {
                    "label": { "fontSize": 10, "fontName": "Roboto" },
                    "labelPadding": 3,
                    "nodePadding": 0.05,
                    "width": 15
                }
            }
        }))
    }

    fn scale(width: f64, font: f64) -> ScaleSettings {
        ScaleSettings {
            width,
            font,
            margin: 30.0,
            fill: "#FFFFFF".to_string(),
            transparent: false,
        }
    }

    #[test]
    fn doubling_the_width_and_font_doubles_dependent_values() {
        let big = export_options(&preview(), &scale(600.0, 20.0));
        let approx = |path: &str, want: f64| {
            let got = big.get_f64(path).unwrap();
            assert!((got - want).abs() < 1e-9, "{path}: {got} != {want}");
        };
        assert_eq!(big.get_f64("width"), Some(600.0));
        assert_eq!(big.get_f64("chord.node.label.fontSize"), Some(20.0));
        approx("chord.node.width", 30.0);
        approx("chord.node.labelPadding", 6.0);
        approx("chord.node.nodePadding", 0.1);
    }

    #[test]
    fn other_options_are_carried_over() {
        let big = export_options(&preview(), &scale(600.0, 20.0));
        assert_eq!(big.get_str("chord.link.colorMode"), Some("google20"));
        assert_eq!(big.get_str("chord.node.label.fontName"), Some("Roboto"));
        assert_eq!(big.get("frame"), Some(&json!({ "margin": 30.0, "fill": "#FFFFFF" })));
    }

    #[test]
    fn transparent_export_has_no_fill() {
        let mut s = scale(512.0, 14.0);
        s.transparent = true;
        let big = export_options(&preview(), &s);
        assert_eq!(big.get("frame.fill"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn zero_preview_dimensions_leave_values_unscaled() {
        let mut p = preview();
        p.set_f64("width", 0.0);
        p.set_f64("chord.node.label.fontSize", 0.0);
        let big = export_options(&p, &scale(600.0, 20.0));
        assert_eq!(big.get_f64("chord.node.width"), Some(15.0));
        assert_eq!(big.get_f64("chord.node.labelPadding"), Some(3.0));
        assert_eq!(big.get_f64("width"), Some(600.0));
    }
}
