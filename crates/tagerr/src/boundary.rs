//! The untyped trust boundary.
//!
//! Errors arriving from outside the process (wire payloads, logs, foreign
//! runtimes) show up as JSON values. This module is the only place that
//! inspects values structurally; once lifted, everything goes through the
//! [`ErrorLike`](crate::convert::ErrorLike) trait.

use crate::convert::render_parts;
use crate::error::{Result, TagError};
use crate::exception::Exception;
use crate::markers::{Markers, marker_name};
use serde_json::Value;

/// Whether `value` is shaped like an error: an object with string-typed
/// `message`, `trace`, and `name` fields.
pub fn is_error_like(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    ["message", "trace", "name"]
        .iter()
        .all(|key| obj.get(*key).is_some_and(Value::is_string))
}

/// Whether `value` is error-shaped and carries `"isException": true`.
pub fn tagged_exception(value: &Value) -> bool {
    is_error_like(value) && value.get("isException").and_then(Value::as_bool) == Some(true)
}

/// Tags an error-shaped JSON value in place and hands back the same value.
///
/// Sets `"isException": true` and the `is<name>Exception` key derived from
/// the value's `name` field, each only when the key is absent; existing
/// keys are never overwritten, so a second call is a no-op.
pub fn convert_value(value: &mut Value) -> Result<&mut Value> {
    if value.is_null() {
        return Err(TagError::ArgumentNull { argument: "value" });
    }
    if !is_error_like(value) {
        return Err(TagError::Argument { argument: "value" });
    }
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let marker = marker_name(&name);
    if let Some(obj) = value.as_object_mut() {
        if obj.get("isException").is_none() {
            obj.insert("isException".to_string(), Value::Bool(true));
        }
        if obj.get(&marker).is_none() {
            obj.insert(marker, Value::Bool(true));
        }
    }
    Ok(value)
}

/// The default rendering rule applied to the untyped form. A non-string
/// `name` renders under the `"Error"` placeholder.
pub fn render_value(value: &Value) -> String {
    let name = value.get("name").and_then(Value::as_str);
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    render_parts(name, message)
}

/// Lifts an error-shaped JSON value into a typed [`Exception`], keeping the
/// wire trace and re-asserting any markers found on the object.
pub fn to_exception(value: &Value) -> Result<Exception> {
    if value.is_null() {
        return Err(TagError::ArgumentNull { argument: "value" });
    }
    if !is_error_like(value) {
        return Err(TagError::Argument { argument: "value" });
    }
    let name = value.get("name").and_then(Value::as_str).unwrap_or_default();
    if name.is_empty() {
        return Err(TagError::Argument { argument: "value" });
    }
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let message = if message.is_empty() {
        format!("Error of type {name}")
    } else {
        message.to_string()
    };
    let trace = value
        .get("trace")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut markers = Markers::new();
    if value.get("isException").and_then(Value::as_bool) == Some(true) {
        markers.set_exception();
    }
    if let Some(obj) = value.as_object() {
        for (key, flag) in obj {
            if flag.as_bool() != Some(true) {
                continue;
            }
            if let Some(middle) = key
                .strip_prefix("is")
                .and_then(|rest| rest.strip_suffix("Exception"))
            {
                if !middle.is_empty() {
                    markers.assert(middle);
                }
            }
        }
    }

    Ok(Exception::rehydrate(name.to_string(), message, trace, markers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire_error(name: &str, message: &str) -> Value {
        json!({ "name": name, "message": message, "trace": "at main (native)" })
    }

    #[test]
    fn rejects_null_and_non_error_shapes() {
        let mut null = Value::Null;
        assert_eq!(
            convert_value(&mut null).unwrap_err(),
            TagError::ArgumentNull { argument: "value" }
        );

        let mut empty = json!({});
        assert_eq!(
            convert_value(&mut empty).unwrap_err(),
            TagError::Argument { argument: "value" }
        );

        // A non-string field fails the shape check too.
        let mut numeric_name = json!({ "name": 3, "message": "m", "trace": "t" });
        assert_eq!(
            convert_value(&mut numeric_name).unwrap_err(),
            TagError::Argument { argument: "value" }
        );
    }

    #[test]
    fn shape_check() {
        assert!(is_error_like(&wire_error("RangeError", "Message")));
        assert!(!is_error_like(&json!([1, 2])));
        assert!(!is_error_like(&json!({ "name": "X", "message": "m" })));
    }

    #[test]
    fn convert_tags_in_place() {
        let mut value = wire_error("RangeError", "Message");
        assert!(!tagged_exception(&value));

        convert_value(&mut value).unwrap();
        assert!(tagged_exception(&value));
        assert_eq!(value["isException"], json!(true));
        assert_eq!(value["isRangeErrorException"], json!(true));
    }

    #[test]
    fn convert_twice_is_a_no_op() {
        let mut value = wire_error("RangeError", "Message");
        convert_value(&mut value).unwrap();
        let once = value.clone();
        convert_value(&mut value).unwrap();
        assert_eq!(value, once);
    }

    #[test]
    fn existing_keys_are_never_overwritten() {
        let mut value = wire_error("Custom", "m");
        value["isCustomException"] = json!(false);
        value["isException"] = json!(false);
        convert_value(&mut value).unwrap();
        assert_eq!(value["isException"], json!(false));
        assert_eq!(value["isCustomException"], json!(false));
    }

    #[test]
    fn render_value_follows_the_default_rule() {
        assert_eq!(
            render_value(&wire_error("RangeError", "Message")),
            "RangeError Error: Message"
        );
        assert_eq!(render_value(&wire_error("RangeError", "")), "RangeError");
        assert_eq!(render_value(&wire_error("Error", "")), "Error");
        // Non-string name renders under the placeholder.
        assert_eq!(
            render_value(&json!({ "name": 3, "message": "m" })),
            "Error: m"
        );
    }

    #[test]
    fn lift_keeps_trace_and_markers() {
        let mut value = wire_error("RangeError", "Message");
        convert_value(&mut value).unwrap();

        let exn = to_exception(&value).unwrap();
        assert_eq!(exn.name(), "RangeError");
        assert_eq!(exn.message(), "Message");
        assert_eq!(exn.trace(), "at main (native)");
        assert!(exn.is_exception());
        assert!(exn.has_marker("RangeError"));
    }

    #[test]
    fn lift_defaults_an_empty_message() {
        let mut value = wire_error("RangeError", "");
        convert_value(&mut value).unwrap();
        let exn = to_exception(&value).unwrap();
        assert_eq!(exn.message(), "Error of type RangeError");
    }

    #[test]
    fn lift_rejects_an_empty_name() {
        let value = wire_error("", "Message");
        assert_eq!(
            to_exception(&value).unwrap_err(),
            TagError::Argument { argument: "value" }
        );
    }
}
