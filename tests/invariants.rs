//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees.

use serde_json::{json, Value};
use svgincss_core::{
    config::{self, ConfigError},
    decode, encode_svg, generate_css, is_valid_config, AppState, Settings, StateError, SvgAsset,
    CONFIG_VERSION,
};

fn create_test_state() -> AppState {
    let mut state = AppState::new();
    for (name, svg) in [
        ("star", r#"<svg viewBox="0 0 24 24"><path d="M12 2l3 7h7l-6 4 2 7-6-4-6 4 2-7-6-4h7z"/></svg>"#),
        ("Heart", "<svg viewBox=\"0 0 24 24\">\n  <path d=\"M12 21C5 15 2 11 2 7a5 5 0 0 1 10-1 5 5 0 0 1 10 1c0 4-3 8-10 14z\"/>\n</svg>\n"),
        ("arrow-left", r##"<svg><defs><clipPath id="c"><rect/></clipPath></defs><g clip-path="url(#c)"/></svg>"##),
    ] {
        state
            .add_svg(SvgAsset::new(name, svg, svg.replace('\n', "")))
            .unwrap();
    }
    state.update_prefix("ui");
    state.update_size("24px");
    state
}

fn exported_doc(state: &AppState) -> Value {
    serde_json::from_str(&state.export_config().unwrap()).unwrap()
}

#[test]
fn invariant_generate_is_deterministic() {
    let state = create_test_state();
    let first = generate_css(state.assets(), state.settings());
    let second = generate_css(state.assets(), state.settings());
    assert_eq!(first, second);
    assert_eq!(first, state.css());
}

#[test]
fn invariant_example_rule_with_webkit_prefix() {
    let settings = Settings {
        prefix: "icon".to_string(),
        size: "24px".to_string(),
        enable_svgo: false,
        enable_webkit_prefix: true,
        enable_before_pseudo: false,
        ..Settings::default()
    };
    let assets = vec![SvgAsset::new("star", "<svg>...</svg>", "<svg/>")];

    let css = generate_css(&assets, &settings);
    assert!(css.starts_with(".icon-star {\n"));

    let payload_of = |property: &str| -> String {
        let line = css
            .lines()
            .find(|l| l.trim_start().starts_with(&format!("{}:", property)))
            .unwrap();
        let start = line.find(",").unwrap() + 1;
        let end = line.rfind("\")").unwrap();
        decode(&line[start..end]).unwrap()
    };

    assert_eq!(payload_of("mask-image"), "<svg>...</svg>");
    assert_eq!(payload_of("-webkit-mask-image"), "<svg>...</svg>");
}

#[test]
fn invariant_encoded_payload_has_no_raw_quote() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><text font-family='"Fira Sans"'>"hi"</text></svg>"#;
    let wrapped = format!("url(\"{}\")", encode_svg(svg));
    let interior = &wrapped[5..wrapped.len() - 2];
    assert!(!interior.contains('"'));
}

#[test]
fn invariant_round_trip_restores_state() {
    let original = create_test_state();
    let text = original.export_config().unwrap();

    let mut restored = AppState::new();
    restored.import_config(&text).unwrap();

    assert_eq!(restored, original);
    assert_eq!(restored.css(), original.css());
}

#[test]
fn invariant_remove_then_round_trip() {
    let mut state = create_test_state();
    let removed = state.remove_svg(1).unwrap();
    assert_eq!(removed.name, "Heart");

    let mut restored = AppState::new();
    restored.restore_config(exported_doc(&state)).unwrap();

    let names: Vec<_> = restored.assets().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["star", "arrow-left"]);
    assert_eq!(restored.settings(), state.settings());
}

#[test]
fn invariant_validate_accepts_serialized() {
    let state = create_test_state();
    assert!(is_valid_config(&exported_doc(&state)));
    assert!(is_valid_config(&exported_doc(&AppState::new())));
}

#[test]
fn invariant_validate_rejects_missing_fields() {
    let state = create_test_state();
    for field in [
        "prefix",
        "size",
        "enableSVGO",
        "enableWebkitPrefix",
        "enableBeforePseudo",
        "svgList",
        "previewColor",
        "configVersion",
    ] {
        let mut doc = exported_doc(&state);
        doc.as_object_mut().unwrap().remove(field);
        assert!(!is_valid_config(&doc), "accepted document without {}", field);
    }
}

#[test]
fn invariant_validate_rejects_wrong_types() {
    let state = create_test_state();
    let cases = [
        ("prefix", json!(1)),
        ("size", json!(null)),
        ("enableSVGO", json!("true")),
        ("enableWebkitPrefix", json!(1)),
        ("enableBeforePseudo", json!(null)),
        ("svgList", json!({})),
        ("previewColor", json!(false)),
        ("configVersion", json!("1")),
        ("configVersion", json!(1.5)),
    ];
    for (field, value) in cases {
        let mut doc = exported_doc(&state);
        doc[field] = value.clone();
        assert!(!is_valid_config(&doc), "accepted {} = {}", field, value);
    }
}

#[test]
fn invariant_validate_rejects_bad_svg_list_elements() {
    let state = create_test_state();
    let bad_elements = [
        json!("star"),
        json!(["star", "<svg/>", "<svg/>"]),
        json!({"name": "star", "originalSVG": "<svg/>"}),
        json!({"name": 3, "originalSVG": "<svg/>", "optimizedSVG": "<svg/>"}),
    ];
    for element in bad_elements {
        let mut doc = exported_doc(&state);
        doc["svgList"].as_array_mut().unwrap().push(element.clone());
        assert!(!is_valid_config(&doc), "accepted element {}", element);
    }
}

#[test]
fn invariant_validate_rejects_other_versions() {
    let state = create_test_state();
    for version in [0, CONFIG_VERSION + 1, -1] {
        let mut doc = exported_doc(&state);
        doc["configVersion"] = json!(version);
        assert!(matches!(
            config::validate(&doc),
            Err(ConfigError::VersionMismatch { .. })
        ));
    }
}

#[test]
fn invariant_validate_rejects_non_objects() {
    for doc in [json!([]), json!("config"), json!(1), json!(null)] {
        assert!(!is_valid_config(&doc));
    }
}

#[test]
fn invariant_invalid_import_leaves_state_untouched() {
    let mut state = create_test_state();
    let before = state.clone();

    let mut doc = exported_doc(&AppState::new());
    doc["svgList"] = json!([{"name": "x", "originalSVG": "<svg/>", "optimizedSVG": 1}]);
    doc["prefix"] = json!("other");

    let err = state.restore_config(doc).unwrap_err();
    assert!(matches!(err, StateError::Config(ConfigError::Invalid(_))));
    assert_eq!(state, before);

    assert!(state.import_config("not json").is_err());
    assert_eq!(state, before);
}

#[test]
fn invariant_restore_replaces_everything() {
    let mut state = create_test_state();
    state.toggle_before_pseudo();

    let mut other = AppState::new();
    other.add_svg(SvgAsset::new("only", "<svg/>", "<svg/>")).unwrap();
    other.update_preview_color("#ff0000");

    state.restore_config(exported_doc(&other)).unwrap();
    assert_eq!(state, other);
}

#[test]
fn invariant_rename_to_empty_is_noop() {
    let mut state = create_test_state();
    let before = state.clone();
    assert!(matches!(state.rename_svg(0, ""), Err(StateError::EmptyName)));
    assert_eq!(state, before);
}

#[test]
fn invariant_sort_is_idempotent() {
    let mut state = create_test_state();
    state.sort_alphabetically();
    let once = state.clone();
    state.sort_alphabetically();
    assert_eq!(state, once);

    let names: Vec<_> = state.assets().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["arrow-left", "Heart", "star"]);
}

#[test]
fn invariant_config_file_round_trip() {
    let state = create_test_state();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(config::CONFIG_FILE_NAME);

    config::save_config(&path, state.assets(), state.settings()).unwrap();
    let (assets, settings) = config::load_config(&path).unwrap();
    assert_eq!(assets, state.assets());
    assert_eq!(&settings, state.settings());
}

#[test]
fn invariant_exported_svgs_are_original_markup() {
    let state = create_test_state();
    let dir = tempfile::tempdir().unwrap();

    let written = config::write_svg_files(dir.path(), state.assets()).unwrap();
    assert_eq!(written.len(), 3);

    let heart = std::fs::read_to_string(dir.path().join("Heart.svg")).unwrap();
    assert_eq!(heart, state.assets()[1].original_svg);
}

#[cfg(feature = "test-hooks")]
#[test]
fn invariant_restore_calls_validate() {
    config::reset_validation_call_count();
    let state = create_test_state();
    let _ = config::restore(exported_doc(&state));
    assert!(config::get_validation_call_count() >= 1);
}
