//! Request body shape validation.
//!
//! Handlers declare the shape of the body they expect and short-circuit
//! before any domain logic runs when the body does not match. The check is
//! a pure predicate: it fails closed and never panics on malformed input.

use serde_json::Value;

/// Declared shape of a single body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
    /// A non-array JSON object.
    Literal,
    /// Any JSON array, regardless of element type.
    Array,
    /// Never checked for presence or type.
    Optional,
}

/// Check `body` against a declared field-to-shape mapping.
///
/// Returns `true` iff every non-optional field is present with a matching
/// type. A missing field, a type mismatch, or a non-object body all yield
/// `false`.
pub fn has_params(body: &Value, spec: &[(&str, Shape)]) -> bool {
    let Some(map) = body.as_object() else {
        return false;
    };

    for (name, shape) in spec {
        if matches!(shape, Shape::Optional) {
            continue;
        }
        let Some(value) = map.get(*name) else {
            return false;
        };
        let matched = match shape {
            Shape::String => value.is_string(),
            Shape::Number => value.is_number(),
            Shape::Literal => value.is_object(),
            Shape::Array => value.is_array(),
            Shape::Optional => true,
        };
        if !matched {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    const SEND_SHAPE: &[(&str, Shape)] = &[
        ("contentType", Shape::String),
        ("text", Shape::String),
        ("receiverId", Shape::String),
    ];

    #[test]
    fn test_all_fields_present_and_typed() {
        let body = json!({
            "contentType": "text",
            "text": "hello",
            "receiverId": "42",
        });
        assert!(has_params(&body, SEND_SHAPE));
    }

    #[test]
    fn test_missing_field_fails() {
        let body = json!({
            "contentType": "text",
            "text": "hello",
        });
        assert!(!has_params(&body, SEND_SHAPE));
    }

    #[test]
    fn test_mistyped_field_fails() {
        let body = json!({
            "contentType": "text",
            "text": 7,
            "receiverId": "42",
        });
        assert!(!has_params(&body, SEND_SHAPE));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let body = json!({
            "contentType": "text",
            "text": "hello",
            "receiverId": "42",
            "unexpected": {"nested": true},
        });
        assert!(has_params(&body, SEND_SHAPE));
    }

    #[test_case(json!({"n": 1}), Shape::Number, true; "integer is a number")]
    #[test_case(json!({"n": 1.5}), Shape::Number, true; "float is a number")]
    #[test_case(json!({"n": "1"}), Shape::Number, false; "numeric string is not a number")]
    #[test_case(json!({"n": "x"}), Shape::String, true; "string matches")]
    #[test_case(json!({"n": null}), Shape::String, false; "null is not a string")]
    fn test_scalar_shapes(body: Value, shape: Shape, expected: bool) {
        assert_eq!(has_params(&body, &[("n", shape)]), expected);
    }

    #[test_case(json!({"v": {"a": 1}}), true; "object is a literal")]
    #[test_case(json!({"v": []}), false; "array is not a literal")]
    #[test_case(json!({"v": null}), false; "null is not a literal")]
    #[test_case(json!({"v": "x"}), false; "string is not a literal")]
    fn test_literal_shape(body: Value, expected: bool) {
        assert_eq!(has_params(&body, &[("v", Shape::Literal)]), expected);
    }

    #[test_case(json!({"v": []}), true; "empty array matches")]
    #[test_case(json!({"v": [1, "two", null]}), true; "element types are not checked")]
    #[test_case(json!({"v": {}}), false; "object is not an array")]
    fn test_array_shape(body: Value, expected: bool) {
        assert_eq!(has_params(&body, &[("v", Shape::Array)]), expected);
    }

    #[test]
    fn test_optional_fields_are_never_checked() {
        let spec = &[("name", Shape::String), ("note", Shape::Optional)];

        // Absent optional field passes.
        assert!(has_params(&json!({"name": "a"}), spec));
        // Present but mistyped optional field also passes.
        assert!(has_params(&json!({"name": "a", "note": 7}), spec));
    }

    #[test]
    fn test_non_object_bodies_fail_closed() {
        let spec = &[("name", Shape::String)];

        assert!(!has_params(&json!(null), spec));
        assert!(!has_params(&json!([1, 2]), spec));
        assert!(!has_params(&json!("body"), spec));
    }

    #[test]
    fn test_empty_spec_accepts_any_object() {
        assert!(has_params(&json!({}), &[]));
        assert!(has_params(&json!({"anything": 1}), &[]));
    }
}
