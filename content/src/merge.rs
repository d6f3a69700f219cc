//! JSON deep merge for partial settings updates.

use serde_json::Value;

/// Merge `patch` into `target` in place.
///
/// Objects merge key by key, recursively. A `null` in the patch removes the
/// key, so the typed model falls back to that field's default. Every other
/// value, arrays included, replaces what was there.
pub fn deep_merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                if value.is_null() {
                    target.remove(&key);
                    continue;
                }
                match target.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_objects_keep_untouched_keys() {
        let mut target = json!({
            "theme": { "primaryColor": "#111", "darkMode": false },
            "layout": { "containerWidth": "lg" }
        });
        deep_merge(&mut target, json!({ "theme": { "darkMode": true } }));
        assert_eq!(
            target,
            json!({
                "theme": { "primaryColor": "#111", "darkMode": true },
                "layout": { "containerWidth": "lg" }
            })
        );
    }

    #[test]
    fn arrays_are_replaced() {
        let mut target = json!({ "tags": [1, 2, 3] });
        deep_merge(&mut target, json!({ "tags": [9] }));
        assert_eq!(target, json!({ "tags": [9] }));
    }

    #[test]
    fn null_removes_key() {
        let mut target = json!({ "a": 1, "b": 2 });
        deep_merge(&mut target, json!({ "a": null }));
        assert_eq!(target, json!({ "b": 2 }));
    }

    #[test]
    fn scalar_over_object_replaces() {
        let mut target = json!({ "a": { "nested": true } });
        deep_merge(&mut target, json!({ "a": "flat" }));
        assert_eq!(target, json!({ "a": "flat" }));
    }

    #[test]
    fn new_keys_are_added() {
        let mut target = json!({});
        deep_merge(&mut target, json!({ "layout": { "sections": { "hero": { "enabled": false } } } }));
        assert_eq!(target["layout"]["sections"]["hero"]["enabled"], false);
    }
}
