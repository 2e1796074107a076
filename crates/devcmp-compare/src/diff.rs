//! Difference detection between aligned entries

use devcmp_core::NamedObject;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// An aligned pair whose payload differs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairDiff {
    pub index: usize,
    pub name: String,
    /// Keys whose presence or value differs, `name` excluded
    pub keys: Vec<String>,
}

/// Structural equality of two JSON values
///
/// Arrays compare element-wise and objects by key set then per key, so two
/// separately built but identical arrays are equal. Numbers compare by value
/// (`1` equals `1.0`).
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        (Value::Number(x), Value::Number(y)) => {
            x == y
                || match (x.as_f64(), y.as_f64()) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                }
        }
        _ => a == b,
    }
}

/// Keys, other than `name`, that are missing from one side or differ in value
///
/// A key absent on one side never equals a key present with an empty or null
/// value on the other. Result is sorted.
pub fn differing_keys(a: &NamedObject, b: &NamedObject) -> Vec<String> {
    let keys: BTreeSet<&String> = a.fields().chain(b.fields()).map(|(k, _)| k).collect();

    keys.into_iter()
        .filter(|key| match (a.get(key), b.get(key)) {
            (Some(x), Some(y)) => !values_equal(x, y),
            _ => true,
        })
        .cloned()
        .collect()
}

/// Whether two entries differ in anything but their name
pub fn differs(a: &NamedObject, b: &NamedObject) -> bool {
    !differing_keys(a, b).is_empty()
}

/// Compare two aligned lists index by index
///
/// Only the common prefix is compared. Returns the differing pairs in index
/// order.
pub fn diff_lists(a: &[NamedObject], b: &[NamedObject]) -> Vec<PairDiff> {
    a.iter()
        .zip(b)
        .enumerate()
        .filter_map(|(index, (x, y))| {
            let keys = differing_keys(x, y);
            if keys.is_empty() {
                None
            } else {
                Some(PairDiff {
                    index,
                    name: x.name().unwrap_or_default().to_string(),
                    keys,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_arrays_equal() {
        let a = NamedObject::new("web").with("tag", json!({"member": ["a", "b"]}));
        let b = NamedObject::new("web").with("tag", json!({"member": ["a", "b"]}));
        assert!(!differs(&a, &b));
    }

    #[test]
    fn test_array_order_matters() {
        assert!(!values_equal(&json!(["a", "b"]), &json!(["b", "a"])));
    }

    #[test]
    fn test_name_ignored() {
        let a = NamedObject::new("x").with("v", 1);
        let b = NamedObject::new("y").with("v", 1);
        assert!(!differs(&a, &b));
    }

    #[test]
    fn test_absent_vs_empty() {
        let a = NamedObject::new("x").with("description", "");
        let b = NamedObject::new("x");
        assert_eq!(differing_keys(&a, &b), vec!["description"]);

        let c = NamedObject::new("x").with("description", Value::Null);
        assert_eq!(differing_keys(&c, &b), vec!["description"]);
    }

    #[test]
    fn test_object_key_sets() {
        assert!(!values_equal(&json!({"a": 1}), &json!({"a": 1, "b": null})));
        assert!(values_equal(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
    }

    #[test]
    fn test_numbers_by_value() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(!values_equal(&json!(1), &json!("1")));
    }

    #[test]
    fn test_symmetric() {
        let a = NamedObject::new("x").with("v", 1).with("only_a", true);
        let b = NamedObject::new("x").with("v", 2);
        assert_eq!(differing_keys(&a, &b), differing_keys(&b, &a));
        assert_eq!(differing_keys(&a, &b), vec!["only_a", "v"]);
    }

    #[test]
    fn test_diff_lists() {
        let a = vec![
            NamedObject::new("x").with("v", 1),
            NamedObject::new("y").with("v", 2),
        ];
        let b = vec![
            NamedObject::new("x").with("v", 9),
            NamedObject::new("y").with("v", 2),
        ];
        assert_eq!(
            diff_lists(&a, &b),
            vec![PairDiff {
                index: 0,
                name: "x".to_string(),
                keys: vec!["v".to_string()],
            }]
        );
    }
}
