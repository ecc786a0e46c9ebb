use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Number,
    Text,
    Color,
    Checkbox,
    /// One of a set of mutually exclusive switches sharing `group`.
    Radio { group: &'static str },
    Select { options: Vec<String> },
}

/// A value-bearing control on the settings panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ControlKind,
    /// The factory value.
    pub standard: Value,
    /// Whether the control is part of saved settings (and of scope resets).
    pub resetable: bool,
}

impl ControlSpec {
    fn new(key: &'static str, label: &'static str, kind: ControlKind, standard: Value) -> Self {
        Self {
            key,
            label,
            kind,
            standard,
            resetable: true,
        }
    }

    fn not_resetable(mut self) -> Self {
        self.resetable = false;
        self
    }
}

fn select(options: &[&str]) -> ControlKind {
    ControlKind::Select {
        options: options.iter().map(|s| s.to_string()).collect(),
    }
}

pub const COLOR_MODES: [&str; 7] = [
    "google20",
    "schemeCategory10",
    "schemeCategory20",
    "schemeCategory20b",
    "schemeCategory20c",
    "rampPosition",
    "rampValue",
];

/// The chord panel's controls with their factory values.
pub fn standard_controls() -> Vec<ControlSpec> {
    use ControlKind::*;

    let range = Radio {
        group: "range-group",
    };
    let use_group = Radio { group: "use-group" };
    let manage = Radio {
        group: "manage-group",
    };

    vec![
        // data
        ControlSpec::new("wholeSheet", "Whole sheet", range.clone(), json!(true)),
        ControlSpec::new("selectedRange", "Selected range", range, json!(false)),
        ControlSpec::new("fromColumn", "Source column", select(&[]), json!("")),
        ControlSpec::new("toColumn", "Target column", select(&[]), json!("")),
        ControlSpec::new("weightColumn", "Weight column", select(&[]), json!("")),
        ControlSpec::new("applyFilters", "Respect filters in data", Checkbox, json!(false)),
        // appearance
        ControlSpec::new("previewWidth", "Diameter", Number, json!("")),
        // scale
        ControlSpec::new("scaleWidth", "Width of embedded chart", Number, json!(512)),
        ControlSpec::new("scaleFont", "Font size of embedded chart", Number, json!(14)),
        ControlSpec::new("scaleMargin", "Image margin", Number, json!(30)),
        ControlSpec::new("scaleFill", "Image frame fill color", Color, json!("#FFFFFF")),
        ControlSpec::new(
            "scaleFillTransparent",
            "Transparent image frame",
            Checkbox,
            json!(false),
        ),
        // nodes
        ControlSpec::new(
            "sortGroups",
            "Sort diagram",
            select(&["none", "ascending", "descending"]),
            json!("none"),
        ),
        ControlSpec::new("nodePadding", "Pad angle between nodes", Number, json!(0.05)),
        ControlSpec::new("nodeWidth", "Thickness of arc", Number, json!(20)),
        ControlSpec::new("labelPadding", "Label padding", Number, json!(3)),
        ControlSpec::new("labelFontSize", "Font size", Number, json!(10)),
        ControlSpec::new("labelFontName", "Font name", Text, json!("Roboto")),
        ControlSpec::new("labelFontColor", "Font color", Color, json!("#212121")),
        ControlSpec::new("labelFontBold", "Bold", Checkbox, json!(false)),
        ControlSpec::new("labelFontItalic", "Italic", Checkbox, json!(false)),
        // links
        ControlSpec::new(
            "linkColorMode",
            "Color mode",
            select(&COLOR_MODES),
            json!("google20"),
        ),
        ControlSpec::new("linkFillColor", "Color ramp start", Color, json!("#3F51B5")),
        ControlSpec::new("linkFillEndColor", "Color ramp end", Color, json!("#FF5722")),
        ControlSpec::new("linkBorderWidth", "Border width", Number, json!(1)),
        ControlSpec::new("linkOpacity", "Opacity", Number, json!(0.3)),
        // manage
        ControlSpec::new("useInitial", "Reset to initial", use_group.clone(), json!(true))
            .not_resetable(),
        ControlSpec::new("useStandard", "Standard", use_group.clone(), json!(false))
            .not_resetable(),
        ControlSpec::new("useUser", "My personal settings", use_group.clone(), json!(false))
            .not_resetable(),
        ControlSpec::new(
            "useDocument",
            "This document's settings",
            use_group,
            json!(false),
        )
        .not_resetable(),
        ControlSpec::new(
            "makePermanent",
            "Save for future use in this document",
            manage.clone(),
            json!(true),
        )
        .not_resetable(),
        ControlSpec::new(
            "makeDefault",
            "Save for future use in all my documents",
            manage.clone(),
            json!(false),
        )
        .not_resetable(),
        ControlSpec::new(
            "clearPermanent",
            "Clear saved settings in this document",
            manage.clone(),
            json!(false),
        )
        .not_resetable(),
        ControlSpec::new(
            "clearDefault",
            "Clear all my saved default settings",
            manage,
            json!(false),
        )
        .not_resetable(),
    ]
}
