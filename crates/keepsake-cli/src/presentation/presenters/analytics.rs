use keepsake_types::{AnalyticsReport, InteractionEvent, StoredLog, format_iso};
use serde_json::Value;
use std::path::Path;

use crate::presentation::view_models::{EventLine, InspectViewModel, KindCount, StatsViewModel};

const DETAIL_VALUE_LIMIT: usize = 40;

pub fn present_inspect(report: AnalyticsReport, store_path: &Path, limit: usize) -> InspectViewModel {
    let recent = report
        .stored
        .as_ref()
        .map(|stored| {
            let skip = stored.interactions.len().saturating_sub(limit);
            stored.interactions[skip..].iter().map(present_event).collect()
        })
        .unwrap_or_default();

    // all_sessions includes the live key itself when it parsed
    let archived_chunks = report
        .all_sessions
        .len()
        .saturating_sub(usize::from(report.stored.is_some()));

    InspectViewModel {
        store_path: store_path.display().to_string(),
        report,
        archived_chunks,
        recent,
    }
}

pub fn present_stats(stored: Option<&StoredLog>) -> StatsViewModel {
    let Some(stored) = stored else {
        return StatsViewModel {
            session_id: None,
            total_interactions: 0,
            first_event_at: None,
            last_event_at: None,
            span_seconds: None,
            by_event: Vec::new(),
        };
    };

    let mut by_event: Vec<KindCount> = stored
        .kind_counts()
        .into_iter()
        .map(|(event, count)| KindCount { event, count })
        .collect();
    by_event.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.event.cmp(&b.event)));

    let first = stored.interactions.first().map(|e| e.timestamp);
    let last = stored.interactions.last().map(|e| e.timestamp);

    StatsViewModel {
        session_id: Some(stored.session_id.to_string()),
        total_interactions: stored.interactions.len(),
        first_event_at: first.as_ref().map(format_iso),
        last_event_at: last.as_ref().map(format_iso),
        span_seconds: first.zip(last).map(|(a, b)| (b - a).num_seconds()),
        by_event,
    }
}

pub fn present_event(event: &InteractionEvent) -> EventLine {
    let details = event
        .fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, compact_value(value)))
        .collect::<Vec<_>>()
        .join(" ");

    EventLine {
        time: event.timestamp.format("%H:%M:%S%.3f").to_string(),
        event: event.event.clone(),
        details,
    }
}

fn compact_value(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if text.chars().count() > DETAIL_VALUE_LIMIT {
        let cut: String = text.chars().take(DETAIL_VALUE_LIMIT - 3).collect();
        format!("{}...", cut)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use keepsake_types::{EventData, SessionId};

    fn event(kind: &str, secs: u32) -> InteractionEvent {
        InteractionEvent::stamp(
            EventData::new(kind).with("target", "quiz"),
            Utc.with_ymd_and_hms(2022, 10, 1, 18, 0, secs).unwrap(),
        )
    }

    fn stored() -> StoredLog {
        StoredLog {
            session_id: SessionId::from_parts(1664647200000, "k3x9a0b1c"),
            interactions: vec![
                event("page_load", 0),
                event("navigation", 5),
                event("navigation", 9),
                event("click", 12),
            ],
        }
    }

    #[test]
    fn test_stats_sorted_by_count_then_name() {
        let stats = present_stats(Some(&stored()));

        let rows: Vec<_> = stats
            .by_event
            .iter()
            .map(|r| (r.event.as_str(), r.count))
            .collect();
        assert_eq!(rows, vec![("navigation", 2), ("click", 1), ("page_load", 1)]);
        assert_eq!(stats.span_seconds, Some(12));
        assert_eq!(stats.first_event_at.as_deref(), Some("2022-10-01T18:00:00.000Z"));
    }

    #[test]
    fn test_stats_without_log() {
        let stats = present_stats(None);
        assert_eq!(stats.total_interactions, 0);
        assert_eq!(stats.to_string(), "No stored interactions.\n");
    }

    #[test]
    fn test_inspect_keeps_most_recent_events() {
        let report = AnalyticsReport {
            stored: Some(stored()),
            all_sessions: vec![stored(), stored()],
            ..AnalyticsReport::default()
        };

        let view = present_inspect(report, Path::new("/data/storage.db"), 2);

        assert_eq!(view.archived_chunks, 1);
        assert_eq!(view.recent.len(), 2);
        assert_eq!(view.recent[0].time, "18:00:09.000");
        assert_eq!(view.recent[1].event, "click");
    }

    #[test]
    fn test_event_line_truncates_long_values() {
        let long = InteractionEvent::stamp(
            EventData::new("click").with("text", "x".repeat(60)),
            Utc.with_ymd_and_hms(2022, 10, 1, 18, 0, 0).unwrap(),
        );
        let line = present_event(&long);
        assert_eq!(line.details, format!("text={}...", "x".repeat(37)));
    }
}
