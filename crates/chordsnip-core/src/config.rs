use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A JSON options tree handed to the chord renderer.
///
/// Values are addressed by dotted paths (`"chord.node.label.fontSize"`). Trees are combined with
/// [`ChordConfig::deep_merge`], where the incoming tree wins on conflicts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordConfig(Value);

impl Default for ChordConfig {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl ChordConfig {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.0)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Options trees are objects; coerce anything else so this never panics on odd input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    /// Sets a numeric value. Non-finite numbers are stored as `null`.
    pub fn set_f64(&mut self, dotted_path: &str, value: f64) {
        let value = serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        self.set_value(dotted_path, value);
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_merge_prefers_incoming_leaves() {
        let mut cfg = ChordConfig::from_value(json!({"width": 300, "chord": {"node": {"width": 20}}}));
        cfg.deep_merge(&json!({"chord": {"node": {"width": 15, "nodePadding": 0.05}}}));
        assert_eq!(
            cfg.as_value(),
            &json!({"width": 300, "chord": {"node": {"width": 15, "nodePadding": 0.05}}})
        );
    }

    #[test]
    fn set_value_creates_intermediate_objects() {
        let mut cfg = ChordConfig::from_value(json!("not an object"));
        cfg.set_value("frame.fill", json!("#FFFFFF"));
        cfg.set_f64("frame.margin", f64::NAN);
        assert_eq!(cfg.get_str("frame.fill"), Some("#FFFFFF"));
        assert_eq!(cfg.get("frame.margin"), Some(&Value::Null));
        assert_eq!(cfg.get_f64("frame.missing"), None);
    }
}
