//! Structural uniqueness for the `uniqueItems` keyword.
use crate::keywords::helpers;
use ahash::{AHashSet, AHasher};
use serde_json::Value;
use std::hash::{Hash, Hasher};

// Arrays this small are cheaper to scan pairwise than to hash.
const PAIRWISE_LIMIT: usize = 16;

/// A view over a JSON value whose equality and hashing agree with
/// [`helpers::equal`]: numbers compare by value, so `1` and `1.0` land in
/// the same bucket.
struct Canonical<'a>(&'a Value);

impl PartialEq for Canonical<'_> {
    fn eq(&self, other: &Self) -> bool {
        helpers::equal(self.0, other.0)
    }
}

impl Eq for Canonical<'_> {}

impl Hash for Canonical<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Value::Null => state.write_u8(0),
            Value::Bool(item) => {
                state.write_u8(1);
                item.hash(state);
            }
            // Every number hashes through its `f64` image, which keeps
            // integral floats and integers together. Values the image cannot
            // separate are told apart by `eq`.
            Value::Number(item) => {
                state.write_u8(2);
                let image = item.as_f64().expect("Always valid");
                let image = if image == 0. { 0. } else { image };
                image.to_bits().hash(state);
            }
            Value::String(item) => {
                state.write_u8(3);
                item.hash(state);
            }
            Value::Array(items) => {
                state.write_u8(4);
                for item in items {
                    Canonical(item).hash(state);
                }
            }
            Value::Object(items) => {
                state.write_u8(5);
                // Key order is insertion order, so entries are combined
                // with an order-independent sum
                let mut combined = 0_u64;
                for (key, value) in items {
                    let mut entry = AHasher::default();
                    key.hash(&mut entry);
                    Canonical(value).hash(&mut entry);
                    combined = combined.wrapping_add(entry.finish());
                }
                state.write_u64(combined);
            }
        }
    }
}

#[inline]
pub(crate) fn is_unique(items: &[Value]) -> bool {
    match items.len() {
        0 | 1 => true,
        len if len <= PAIRWISE_LIMIT => items.iter().enumerate().all(|(idx, item)| {
            items[..idx]
                .iter()
                .all(|other| !helpers::equal(item, other))
        }),
        len => {
            let mut seen = AHashSet::with_capacity(len);
            items.iter().all(|item| seen.insert(Canonical(item)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::is_unique;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!([]), true)]
    #[test_case(&json!([1]), true)]
    #[test_case(&json!([1, 2, "1"]), true)]
    #[test_case(&json!([1, 1.0]), false; "integer and float equivalent")]
    #[test_case(&json!([0.0, -0.0]), false; "signed zeros are equal")]
    #[test_case(&json!([[1], [1.0]]), false; "nested integer and float equivalent")]
    #[test_case(&json!([{"a": 1}, {"a": 1}]), false)]
    #[test_case(&json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}]), false; "key order does not matter")]
    fn uniqueness(instance: &Value, expected: bool) {
        assert_eq!(is_unique(instance.as_array().unwrap()), expected);
    }

    #[test]
    fn hashed_path_agrees_with_structural_equality() {
        // Past the pairwise limit, `5` and `5.0` must still collide
        let mut items: Vec<Value> = (0..20).map(|value| json!(value)).collect();
        assert!(is_unique(&items));
        items.push(json!(5.0));
        assert!(!is_unique(&items));
    }
}
