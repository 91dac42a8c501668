//! Inline style flattening and merging.

use serde_json::{Map, Value};

/// Collapse a style stack (an array of style objects, possibly nested) into
/// one object. Later entries override earlier ones key by key; `null` and
/// `false` entries are skipped. Non-array values are returned unchanged.
pub fn flatten_style(style: &Value) -> Value {
    match style {
        Value::Array(layers) => {
            let mut merged = Map::new();
            collect_layers(layers, &mut merged);
            Value::Object(merged)
        }
        other => other.clone(),
    }
}

fn collect_layers(layers: &[Value], merged: &mut Map<String, Value>) {
    for layer in layers {
        match layer {
            Value::Object(entries) => {
                for (key, value) in entries {
                    merged.insert(key.clone(), value.clone());
                }
            }
            Value::Array(nested) => collect_layers(nested, merged),
            _ => {}
        }
    }
}

/// Merge a default style with an incoming one.
///
/// `null` and `false` count as no style. With only one side present that side
/// is returned as-is. With both, both are flattened and the incoming keys
/// override the defaults. If either side does not flatten to an object the
/// incoming style replaces the default.
pub fn merge_style(defaults: Option<&Value>, incoming: Option<&Value>) -> Option<Value> {
    match (defaults.filter(|v| has_style(v)), incoming.filter(|v| has_style(v))) {
        (None, None) => None,
        (Some(style), None) | (None, Some(style)) => Some(style.clone()),
        (Some(defaults), Some(incoming)) => {
            match (flatten_style(defaults), flatten_style(incoming)) {
                (Value::Object(mut merged), Value::Object(overrides)) => {
                    for (key, value) in overrides {
                        merged.insert(key, value);
                    }
                    Some(Value::Object(merged))
                }
                (_, incoming) => Some(incoming),
            }
        }
    }
}

fn has_style(style: &Value) -> bool {
    !matches!(style, Value::Null | Value::Bool(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disjoint_styles_union() {
        let merged = merge_style(Some(&json!({"padding": 10})), Some(&json!({"margin": 5})));
        assert_eq!(merged, Some(json!({"padding": 10, "margin": 5})));
    }

    #[test]
    fn test_incoming_wins_on_shared_key() {
        let merged = merge_style(
            Some(&json!({"padding": 10, "color": "red"})),
            Some(&json!({"color": "blue"})),
        );
        assert_eq!(merged, Some(json!({"padding": 10, "color": "blue"})));
    }

    #[test]
    fn test_single_side_is_used_as_is() {
        let stack = json!([{"padding": 1}, {"padding": 2}]);
        assert_eq!(merge_style(None, Some(&stack)), Some(stack.clone()));
        assert_eq!(merge_style(Some(&stack), None), Some(stack));
        assert_eq!(merge_style(None, None), None);
    }

    #[test]
    fn test_null_or_false_style_counts_as_absent() {
        let defaults = json!({"padding": 10});
        assert_eq!(merge_style(Some(&defaults), Some(&json!(null))), Some(defaults.clone()));
        assert_eq!(merge_style(Some(&defaults), Some(&json!(false))), Some(defaults.clone()));
        assert_eq!(merge_style(Some(&json!(null)), Some(&defaults)), Some(defaults));
        assert_eq!(merge_style(Some(&json!(false)), Some(&json!(null))), None);
    }

    #[test]
    fn test_style_stacks_flatten_left_to_right() {
        let merged = merge_style(
            Some(&json!([{"padding": 1, "margin": 1}, {"padding": 2}])),
            Some(&json!([{"margin": 3}, null, [{"opacity": 0.5}]])),
        );
        assert_eq!(merged, Some(json!({"padding": 2, "margin": 3, "opacity": 0.5})));
    }

    #[test]
    fn test_non_object_incoming_replaces() {
        let merged = merge_style(Some(&json!({"padding": 1})), Some(&json!(42)));
        assert_eq!(merged, Some(json!(42)));
    }

    #[test]
    fn test_flatten_leaves_objects_alone() {
        let style = json!({"flex": 1});
        assert_eq!(flatten_style(&style), style);
    }
}
