use serde::Serialize;
use serde_json::{Map, Value};

use super::kind::EventKind;

/// Keys the logger owns; callers cannot override them through `fields`.
pub const RESERVED_KEYS: [&str; 2] = ["event", "timestamp"];

/// Kind-specific payload handed to the logger before it is stamped.
#[derive(Debug, Clone, PartialEq)]
pub struct EventData {
    pub kind: String,
    pub fields: Map<String, Value>,
}

impl EventData {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Map::new(),
        }
    }

    /// Attach a field. Reserved keys are silently ignored.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !RESERVED_KEYS.contains(&key.as_str()) {
            self.fields.insert(key, value.into());
        }
        self
    }

    /// Attach any serializable value; values that fail to serialize become `null`.
    pub fn with_json<T: Serialize>(self, key: impl Into<String>, value: &T) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.with(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl From<EventKind> for EventData {
    fn from(kind: EventKind) -> Self {
        EventData::new(kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_fields() {
        let data = EventData::from(EventKind::CarouselNextClicked)
            .with("fromSlide", 0)
            .with("toSlide", 1);

        assert_eq!(data.kind, "carousel_next_clicked");
        assert_eq!(data.get("fromSlide"), Some(&Value::from(0)));
        assert_eq!(data.get("toSlide"), Some(&Value::from(1)));
    }

    #[test]
    fn test_reserved_keys_are_ignored() {
        let data = EventData::new("scroll")
            .with("event", "spoofed")
            .with("timestamp", "yesterday")
            .with("scrollPercent", 40);

        assert_eq!(data.kind, "scroll");
        assert_eq!(data.fields.len(), 1);
    }
}
