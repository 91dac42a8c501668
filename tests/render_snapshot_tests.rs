use serde_json::json;
use std::fs;
use tailwind_styled::{
    Component, Host, InteractionState, Node, NodeRef, Props, RenderSpec, Wrap,
};
use tempfile::TempDir;

#[test]
fn test_full_pipeline_snapshot() {
    let heading = Wrap::merging()
        .wrap(Host::new("Text"))
        .attrs([
            ("style", json!({"padding": 10})),
            ("accessibilityRole", json!("header")),
        ])
        .with_children(|children| match children {
            Some(Node::Text(text)) => Node::Text(text.to_uppercase()),
            other => other.unwrap_or_default(),
        })
        .class("font-bold text-lg");

    let node = heading.render(
        Props::new()
            .with_class_name("text-sm")
            .with_style(json!([{"margin": 5}, {"margin": 6}]))
            .with("$tone", "muted")
            .with_children("title"),
        Some(NodeRef::new("heading")),
    );

    let pretty = serde_json::to_string_pretty(&node.to_json(&InteractionState::default())).unwrap();
    insta::assert_snapshot!(pretty, @r#"
    {
      "component": "Text",
      "ref": "heading",
      "className": "font-bold text-sm",
      "props": {
        "style": {
          "padding": 10,
          "margin": 6
        },
        "accessibilityRole": "header"
      },
      "children": "TITLE"
    }
    "#);
}

#[test]
fn test_render_spec_from_yaml_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let spec_path = temp_dir.path().join("button.yaml");
    fs::write(&spec_path, r#"
component: Pressable
template: "rounded px-4 bg-blue-500"
attrs:
  accessibilityRole: button
transient_props:
  - variant
interaction:
  pressed: bg-blue-700
props:
  className: px-6
  variant: primary
  testID: save
"#).unwrap();

    let spec = RenderSpec::from_file(&spec_path).unwrap();
    let node = spec.render(&Wrap::merging());
    let pressed = InteractionState { pressed: true, ..Default::default() };

    let pretty = serde_json::to_string_pretty(&node.to_json(&pressed)).unwrap();
    insta::assert_snapshot!(pretty, @r#"
    {
      "component": "Pressable",
      "className": "rounded bg-blue-700 px-6",
      "deferred": true,
      "props": {
        "accessibilityRole": "button",
        "testID": "save"
      }
    }
    "#);
}
