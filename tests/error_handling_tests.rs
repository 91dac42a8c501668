use std::fs;
use tailwind_styled::{
    load_factory, Component, Config, Host, Props, RenderSpec, StyledError, StyledSettings, Wrap,
};
use tempfile::TempDir;

#[test]
fn test_error_message_for_missing_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.yaml");

    let err = StyledSettings::from_file(&missing).unwrap_err();
    let error_msg = format!("{}", err);
    assert!(error_msg.contains("missing.yaml"),
            "Error message should contain file path: {}", error_msg);
}

#[test]
fn test_error_message_for_malformed_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("styled.json");
    fs::write(&path, "{ merge: yes ").unwrap();

    let err = StyledSettings::from_file(&path).unwrap_err();
    assert!(matches!(err, StyledError::ConfigError { .. }));
    assert!(err.to_string().contains("JSON"));
}

#[test]
fn test_error_message_for_malformed_yaml_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("styled.yaml");
    fs::write(&path, "merge: [true\n").unwrap();

    let err = StyledSettings::from_file(&path).unwrap_err();
    assert!(matches!(err, StyledError::ConfigError { .. }));
    assert!(err.to_string().contains("YAML"), "unexpected error: {}", err);
}

#[test]
fn test_invalid_group_pattern_names_group() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("styled.yaml");
    fs::write(&path, "merge: true\ngroups:\n  elevation:\n    - 'elevation-(\\d+'\n").unwrap();

    let err = load_factory(Some(path.as_path()), false).unwrap_err();
    assert!(err.to_string().contains("elevation"), "unexpected error: {}", err);
}

#[test]
fn test_render_spec_parse_error_includes_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.yaml");
    fs::write(&path, "component: [unclosed\n").unwrap();

    let err = RenderSpec::from_file(&path).unwrap_err();
    assert!(matches!(err, StyledError::SpecError { .. }));
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn test_render_spec_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spec.toml");
    fs::write(&path, "template = 'p-4'").unwrap();

    assert!(matches!(RenderSpec::from_file(&path), Err(StyledError::SpecError { .. })));
}

#[test]
fn test_render_spec_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");

    assert!(matches!(RenderSpec::from_file(&path), Err(StyledError::Io(_))));
}

#[test]
#[should_panic(expected = "compose failed")]
fn test_panicking_compose_propagates_unmodified() {
    let wrap = tailwind_styled::create_instance(
        Config::new().with_compose(|_| panic!("compose failed")),
    );
    let view = wrap.wrap(Host::new("View")).class("p-4");
    let _ = view.render(Props::new(), None);
}

#[test]
fn test_empty_inputs_render_cleanly() {
    let view = Wrap::standard().wrap(Host::new("View")).class("");
    let node = view.render(Props::new(), None);
    let element = node.as_element().unwrap();

    assert_eq!(element.class().as_deref(), Some(""));
    assert!(element.props.is_empty());
    assert!(element.children.is_none());
}
