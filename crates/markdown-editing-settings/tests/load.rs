use markdown_editing_settings::{Settings, SettingsError};
use pretty_assertions::assert_eq;

#[test]
fn test_sublime_style_keys() {
    let json = r#"{
        "mde.list_indent_bullets": ["-", "*"],
        "mde.list_indent_auto_switch_bullet": false,
        "translate_tabs_to_spaces": true,
        "tab_size": 2,
        "mde.auto_increment_ordered_list_number": false,
        "mde.list_align_text": false,
        "mde.auto_fold_link.enabled": true,
        "word_wrap": true
    }"#;

    let settings = Settings::from_json_str(json).unwrap();
    assert_eq!(
        settings,
        Settings {
            list_indent_bullets: vec!["-".to_string(), "*".to_string()],
            list_indent_auto_switch_bullet: false,
            translate_tabs_to_spaces: true,
            tab_size: 2,
            auto_increment_ordered_list_number: false,
            list_align_text: false,
            auto_fold_link: true,
        }
    );
    assert_eq!(settings.indent_unit(), "  ");
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!(
        "markdown-editing-settings-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{ "mde.auto_fold_link.enabled": true }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(settings.auto_fold_link);
    assert_eq!(settings.tab_size, 4);
}

#[test]
fn test_load_missing_file() {
    let err = Settings::load("/nonexistent/markdown-editing.json").unwrap_err();
    assert!(matches!(err, SettingsError::Io(_)));
}

#[test]
fn test_serialize_uses_host_keys() {
    let value = serde_json::to_value(Settings::default()).unwrap();
    assert_eq!(value["mde.auto_fold_link.enabled"], serde_json::json!(false));
    assert_eq!(value["tab_size"], serde_json::json!(4));
}
