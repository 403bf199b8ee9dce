use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::event::InteractionEvent;
use crate::session::SessionId;
use crate::util::iso_millis;

/// Value kept under the live storage key; rewritten on every append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLog {
    pub session_id: SessionId,
    pub interactions: Vec<InteractionEvent>,
}

impl StoredLog {
    /// Number of events per kind, ordered by kind name.
    pub fn kind_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.interactions {
            *counts.entry(event.event.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Point-in-time totals of a live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub session_id: SessionId,
    pub total_interactions: usize,
    /// Whole seconds since the session started
    pub time_spent: i64,
    pub interactions: Vec<InteractionEvent>,
}

/// Snapshot written once when the page goes away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalSnapshot {
    pub session_id: SessionId,
    pub total_interactions: usize,
    pub time_spent: i64,
    pub interactions: Vec<InteractionEvent>,
    #[serde(with = "iso_millis")]
    pub exit_time: DateTime<Utc>,
}

impl FinalSnapshot {
    pub fn new(snapshot: Snapshot, exit_time: DateTime<Utc>) -> Self {
        Self {
            session_id: snapshot.session_id,
            total_interactions: snapshot.total_interactions,
            time_spent: snapshot.time_spent,
            interactions: snapshot.interactions,
            exit_time,
        }
    }
}

/// Everything known about tracked visits, for manual inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Live snapshot, when a logger is running in this process
    pub current: Option<Snapshot>,
    /// Parsed live storage key; `None` when missing or unreadable
    pub stored: Option<StoredLog>,
    /// Parsed final key; `None` when missing or unreadable
    #[serde(rename = "final")]
    pub final_snapshot: Option<FinalSnapshot>,
    /// Every readable value whose key starts with the storage key
    pub all_sessions: Vec<StoredLog>,
}

impl AnalyticsReport {
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
            && self.stored.is_none()
            && self.final_snapshot.is_none()
            && self.all_sessions.is_empty()
    }
}
