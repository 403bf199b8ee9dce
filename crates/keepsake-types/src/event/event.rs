use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::data::{EventData, RESERVED_KEYS};
use crate::util::iso_millis;

/// One recorded interaction.
///
/// Serialized flat, matching what the page keeps in local storage:
/// `{"event": "scroll", "scrollPercent": 40, "timestamp": "...Z"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Kind tag (`page_load`, `scroll`, ...)
    pub event: String,

    /// Kind-specific fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    /// Moment of append, millisecond precision
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl InteractionEvent {
    /// Fix the kind and time of `data`. Reserved keys left in `fields`
    /// are dropped so they cannot shadow `event` or `timestamp`.
    pub fn stamp(data: EventData, timestamp: DateTime<Utc>) -> Self {
        let mut fields = data.fields;
        for key in RESERVED_KEYS {
            fields.remove(key);
        }

        Self {
            event: data.kind,
            fields,
            timestamp,
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is(&self, kind: super::EventKind) -> bool {
        self.event == kind.as_str()
    }
}
