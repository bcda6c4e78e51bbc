//! Recursive comparison of an expected JSON tree against an actual one.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Two numbers closer than this compare equal.
const NUMBER_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// Values are of different JSON types
    Type,
    /// Same type, different scalar value
    Value,
    /// A field of the expected object is absent from the actual one
    MissingField,
    /// Arrays of different length
    Length,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Type => "Unexpected type",
            Self::Value => "Unexpected value",
            Self::MissingField => "Missing expected field",
            Self::Length => "Unexpected number of elements",
        };
        f.write_str(text)
    }
}

/// First difference found between expected and actual JSON.
///
/// `path` is a JSON pointer, empty for the root. For [`MismatchKind::Length`]
/// `expected` and `actual` hold the two array lengths; for
/// [`MismatchKind::MissingField`] both are `None`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} at {}", .kind, display_path(.path))]
pub struct Mismatch {
    pub path: String,
    pub kind: MismatchKind,
    pub expected: Option<Value>,
    pub actual: Option<Value>,
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "root"
    } else {
        path
    }
}

/// Escape an object key as a JSON pointer reference token.
fn escape_key(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Compare `actual` against `expected`, returning the first mismatch.
///
/// Every field of an expected object must be present in the actual object,
/// which may contain more. Arrays are compared element by element. Numbers
/// match when they differ by less than `1e-9`.
pub fn compare(expected: &Value, actual: &Value) -> Result<(), Mismatch> {
    compare_at(expected, actual, "")
}

fn compare_at(expected: &Value, actual: &Value, path: &str) -> Result<(), Mismatch> {
    let value_match = match (expected, actual) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(e), Value::Bool(a)) => e == a,
        (Value::String(e), Value::String(a)) => e == a,
        (Value::Number(e), Value::Number(a)) => match (e.as_f64(), a.as_f64()) {
            (Some(e), Some(a)) => (e - a).abs() < NUMBER_TOLERANCE,
            _ => e == a,
        },
        (Value::Array(e), Value::Array(a)) => {
            if e.len() != a.len() {
                return Err(Mismatch {
                    path: path.to_string(),
                    kind: MismatchKind::Length,
                    expected: Some(e.len().into()),
                    actual: Some(a.len().into()),
                });
            }
            for (i, (e, a)) in e.iter().zip(a).enumerate() {
                compare_at(e, a, &format!("{path}/{i}"))?;
            }
            true
        }
        (Value::Object(e), Value::Object(a)) => {
            for (key, e) in e {
                let child = format!("{path}/{}", escape_key(key));
                match a.get(key) {
                    Some(a) => compare_at(e, a, &child)?,
                    None => {
                        return Err(Mismatch {
                            path: child,
                            kind: MismatchKind::MissingField,
                            expected: None,
                            actual: None,
                        })
                    }
                }
            }
            true
        }
        _ => {
            return Err(Mismatch {
                path: path.to_string(),
                kind: MismatchKind::Type,
                expected: Some(expected.clone()),
                actual: Some(actual.clone()),
            })
        }
    };

    if value_match {
        Ok(())
    } else {
        Err(Mismatch {
            path: path.to_string(),
            kind: MismatchKind::Value,
            expected: Some(expected.clone()),
            actual: Some(actual.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identical_trees_match() {
        let doc = json!({"a": [1, "two", {"three": null}], "b": true, "c": 2.5});
        assert_eq!(compare(&doc, &doc), Ok(()));
    }

    #[test]
    fn test_extra_actual_fields_allowed() {
        let expected = json!({"id": "x"});
        let actual = json!({"id": "x", "relevance": 0.3, "fields": {}});
        assert!(compare(&expected, &actual).is_ok());
        assert!(compare(&actual, &expected).is_err());
    }

    #[test]
    fn test_value_mismatch_nested() {
        let expected = json!({"root": {"children": [{"id": "a"}, {"id": "b"}]}});
        let actual = json!({"root": {"children": [{"id": "a"}, {"id": "c"}]}});
        let mismatch = compare(&expected, &actual).unwrap_err();
        assert_eq!(mismatch.path, "/root/children/1/id");
        assert_eq!(mismatch.kind, MismatchKind::Value);
        assert_eq!(mismatch.expected, Some(json!("b")));
        assert_eq!(mismatch.actual, Some(json!("c")));
        assert_eq!(mismatch.to_string(), "Unexpected value at /root/children/1/id");
    }

    #[test]
    fn test_type_mismatch_at_root() {
        let mismatch = compare(&json!({"a": 1}), &json!([1])).unwrap_err();
        assert_eq!(mismatch.path, "");
        assert_eq!(mismatch.kind, MismatchKind::Type);
        assert_eq!(mismatch.to_string(), "Unexpected type at root");

        let mismatch = compare(&json!(1), &json!("1")).unwrap_err();
        assert_eq!(mismatch.kind, MismatchKind::Type);
        let mismatch = compare(&json!(null), &json!(false)).unwrap_err();
        assert_eq!(mismatch.kind, MismatchKind::Type);
    }

    #[test]
    fn test_missing_field_path_is_escaped() {
        let expected = json!({"a/b": {"c~d": 1}});
        let actual = json!({"a/b": {}});
        let mismatch = compare(&expected, &actual).unwrap_err();
        assert_eq!(mismatch.kind, MismatchKind::MissingField);
        assert_eq!(mismatch.path, "/a~1b/c~0d");
        assert_eq!(mismatch.expected, None);
        assert_eq!(mismatch.to_string(), "Missing expected field at /a~1b/c~0d");
    }

    #[test]
    fn test_length_mismatch() {
        let mismatch = compare(&json!({"hits": [1, 2, 3]}), &json!({"hits": [1, 2]})).unwrap_err();
        assert_eq!(mismatch.kind, MismatchKind::Length);
        assert_eq!(mismatch.path, "/hits");
        assert_eq!(mismatch.expected, Some(json!(3)));
        assert_eq!(mismatch.actual, Some(json!(2)));
        assert_eq!(mismatch.to_string(), "Unexpected number of elements at /hits");
    }

    #[test]
    fn test_number_tolerance() {
        assert!(compare(&json!(0.1), &json!(0.1000000000001)).is_ok());
        assert!(compare(&json!(1), &json!(1.0)).is_ok());
        let mismatch = compare(&json!(0.1), &json!(0.1001)).unwrap_err();
        assert_eq!(mismatch.kind, MismatchKind::Value);
    }

    #[test]
    fn test_first_mismatch_in_array_order_wins() {
        let mismatch = compare(&json!([1, 2, 3]), &json!([1, 5, "x"])).unwrap_err();
        assert_eq!(mismatch.path, "/1");
        assert_eq!(mismatch.kind, MismatchKind::Value);
    }

    #[test]
    fn test_null_field_is_not_missing() {
        assert!(compare(&json!({"a": null}), &json!({"a": null})).is_ok());
        let mismatch = compare(&json!({"a": null}), &json!({})).unwrap_err();
        assert_eq!(mismatch.kind, MismatchKind::MissingField);
    }
}
