use crate::settings::*;
use crate::*;
use serde_json::json;

fn values(value: serde_json::Value) -> ControlValues {
    serde_json::from_value(value).unwrap()
}

#[test]
fn standard_panel_maps_to_factory_settings() {
    let mut panel = ControlPanel::default();
    panel.set_value("previewWidth", json!("300")).unwrap();
    let settings = panel.settings();

    assert_eq!(settings.width, 300.0);
    assert_eq!(settings.scale.width, 512.0);
    assert_eq!(settings.scale.font, 14.0);
    assert_eq!(settings.scale.fill, "#FFFFFF");
    assert!(!settings.scale.transparent);

    let node = &settings.options.chord.node;
    assert_eq!(node.width, 20.0);
    assert_eq!(node.node_padding, 0.05);
    assert_eq!(node.label_padding, 3.0);
    assert_eq!(node.label.font_size, 10.0);
    assert_eq!(node.label.font_name, "Roboto");
    assert_eq!(node.sort_groups, SortGroups::None);
    assert_eq!(settings.options.chord.link.color_mode, "google20");
    assert_eq!(settings.options.chord.link.color.fill_opacity, 0.3);
}

#[test]
fn settings_serialize_as_renderer_options_tree() {
    let settings = ControlPanel::default().settings();
    let cfg = ChordConfig::from_value(serde_json::to_value(&settings.options).unwrap());
    assert_eq!(cfg.get_str("chord.link.colorMode"), Some("google20"));
    assert_eq!(cfg.get_f64("chord.node.label.fontSize"), Some(10.0));
    assert_eq!(cfg.get_str("chord.node.sortGroups"), Some("none"));
    assert_eq!(cfg.get_str("chord.link.color.fillEnd"), Some("#FF5722"));
}

#[test]
fn integer_controls_truncate_like_number_inputs() {
    let mut panel = ControlPanel::default();
    panel.set_value("nodeWidth", json!("15.8")).unwrap();
    panel.set_value("labelFontSize", json!("abc")).unwrap();
    panel.set_value("nodePadding", json!("0.07")).unwrap();
    let node = panel.settings().options.chord.node;
    assert_eq!(node.width, 15.0);
    assert_eq!(node.label.font_size, 0.0);
    assert_eq!(node.node_padding, 0.07);
}

#[test]
fn radio_controls_are_exclusive_within_their_group() {
    let mut panel = ControlPanel::default();
    panel.set_value("selectedRange", json!(true)).unwrap();
    assert_eq!(panel.value("wholeSheet"), Some(&json!(false)));
    assert_eq!(panel.checked_in_group("range-group"), Some("selectedRange"));
    // other groups are untouched
    assert_eq!(panel.checked_in_group("use-group"), Some("useInitial"));
}

#[test]
fn unknown_controls_are_rejected() {
    let mut panel = ControlPanel::default();
    let err = panel.set_value("nope", json!(1)).unwrap_err();
    assert_eq!(err.to_string(), "Unknown settings control: nope");
    assert!(matches!(
        panel.branch_keys("missing"),
        Err(Error::UnknownBranch { .. })
    ));
}

#[test]
fn branch_keys_skip_decorations_and_sub_pages() {
    let panel = ControlPanel::default();
    assert_eq!(panel.branch_keys("arrangePreview").unwrap(), vec!["previewWidth"]);
    assert_eq!(
        panel.branch_keys("scaleRatio").unwrap(),
        vec![
            "scaleWidth",
            "scaleFont",
            "scaleMargin",
            "scaleFill",
            "scaleFillTransparent"
        ]
    );
    assert_eq!(panel.layout().branch_of("linkOpacity"), Some("links"));
}

#[test]
fn restore_reinstates_branch_values_and_keeps_other_live_values() {
    let mut panel = ControlPanel::default();
    let mut store = BranchStore::new();

    let keys = panel.branch_keys("nodes").unwrap();
    store.reserve("nodes", panel.current(), &keys);
    assert_eq!(store.state("nodes"), BranchState::Reserved);

    panel.set_value("nodeWidth", json!(45)).unwrap();
    panel.set_value("labelFontBold", json!(true)).unwrap();
    panel.set_value("linkOpacity", json!(0.9)).unwrap();

    let restored = store.restore("nodes", panel.current()).unwrap();
    panel.apply_settings(&restored);

    assert_eq!(panel.value("nodeWidth"), Some(&json!(20)));
    assert_eq!(panel.value("labelFontBold"), Some(&json!(false)));
    assert_eq!(panel.value("linkOpacity"), Some(&json!(0.9)));
    assert_eq!(store.state("nodes"), BranchState::Idle);
}

#[test]
fn branches_reserve_independently() {
    let mut panel = ControlPanel::default();
    let mut store = BranchStore::new();

    store.reserve("links", panel.current(), panel.branch_keys("links").unwrap());
    panel.set_value("linkOpacity", json!(0.5)).unwrap();
    store.reserve("scaleRatio", panel.current(), panel.branch_keys("scaleRatio").unwrap());
    panel.set_value("scaleWidth", json!(900)).unwrap();

    let restored = store.restore("scaleRatio", panel.current()).unwrap();
    panel.apply_settings(&restored);
    assert_eq!(panel.value("scaleWidth"), Some(&json!(512)));
    assert_eq!(panel.value("linkOpacity"), Some(&json!(0.5)));
    assert_eq!(store.state("links"), BranchState::Reserved);
}

#[test]
fn seeding_folds_saved_scopes_into_initial_values() {
    let mut panel = ControlPanel::default();
    let loaded: LoadedSettings = serde_json::from_value(json!({
        "auth": {"level": 10},
        "saved": [
            {"source": "useUser", "settings": {"nodeWidth": 30, "labelFontName": "Lato"}},
            {"source": "useDocument", "settings": {"nodeWidth": 40, "ghost": 1}},
        ]
    }))
    .unwrap();

    let store = ScopeStore::seed(&mut panel, loaded);

    assert_eq!(panel.initial()["nodeWidth"], json!(40));
    assert_eq!(panel.initial()["labelFontName"], json!("Lato"));
    assert_eq!(panel.current()["nodeWidth"], json!(40));
    assert!(!panel.current().contains_key("ghost"));

    assert_eq!(store.auth(), &json!({"level": 10}));
    assert!(store.is_available(SettingsScope::User));
    assert!(store.is_available(SettingsScope::Document));
    assert_eq!(store.get(SettingsScope::Standard).unwrap()["nodeWidth"], json!(20));
    assert_eq!(store.get(SettingsScope::Initial).unwrap()["nodeWidth"], json!(40));
}

#[test]
fn missing_saved_settings_mark_the_scope_unavailable() {
    let mut panel = ControlPanel::default();
    let loaded = LoadedSettings {
        auth: json!(null),
        saved: vec![SavedSettings {
            source: SettingsScope::Document,
            settings: None,
        }],
    };
    let mut store = ScopeStore::seed(&mut panel, loaded);
    assert!(!store.is_available(SettingsScope::Document));
    assert!(matches!(
        store.require(SettingsScope::Document),
        Err(Error::UnavailableScope { .. })
    ));

    store.save(SettingsScope::Document, values(json!({"nodeWidth": 12})));
    assert!(store.is_available(SettingsScope::Document));
    assert!(store.clear(SettingsScope::Document));
    assert!(!store.clear(SettingsScope::Document));
}

#[test]
fn resetable_values_exclude_panel_housekeeping() {
    let panel = ControlPanel::default();
    let saved = panel.resetable_values();
    assert!(saved.contains_key("nodeWidth"));
    assert!(!saved.contains_key("useInitial"));
    assert!(!saved.contains_key("makePermanent"));
}

#[test]
fn scope_keys_round_trip() {
    for scope in SettingsScope::ALL {
        assert_eq!(SettingsScope::from_key(scope.key()), Some(scope));
    }
    assert_eq!(ManageAction::from_key("makeDefault"), Some(ManageAction::SaveUser));
    assert_eq!(ManageAction::ClearDocument.scope(), SettingsScope::Document);
}
