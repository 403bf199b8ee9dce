use chrono::{DateTime, Utc};
use keepsake_types::{EventData, EventKind, take_chars};
use std::collections::BTreeSet;

use crate::config::Config;
use crate::env::ElementLookup;
use crate::recorder::Recorder;
use crate::timer::{Debounce, Interval};

/// Window scroll position at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// How far down the page the viewport is, 0..=100.
    /// Pages shorter than the viewport report 0.
    pub fn percent(&self) -> u32 {
        let scrollable = self.document_height - self.viewport_height;
        if scrollable <= 0.0 || !scrollable.is_finite() {
            return 0;
        }
        let percent = (self.scroll_y / scrollable * 100.0).round();
        percent.clamp(0.0, 100.0) as u32
    }
}

/// The element a click landed on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickTarget {
    pub tag: String,
    pub class_name: String,
    pub id: String,
    pub text: Option<String>,
}

/// Page-wide trackers: debounced scroll, clicks, section views, periodic
/// time updates, and in-page navigation.
#[derive(Debug, Clone)]
pub struct PageTracker {
    started_at: DateTime<Utc>,
    scroll: Debounce,
    pending_scroll: Option<ScrollMetrics>,
    time_updates: Interval,
    section_threshold: f64,
    click_text_limit: usize,
    visible_sections: BTreeSet<String>,
}

impl PageTracker {
    pub fn new(config: &Config, started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            scroll: Debounce::new(config.timing.scroll_debounce()),
            pending_scroll: None,
            time_updates: Interval::start(config.timing.time_update_interval(), started_at),
            section_threshold: config.tracking.section_view_threshold,
            click_text_limit: config.tracking.click_text_limit,
            visible_sections: BTreeSet::new(),
        }
    }

    /// Note a scroll; only the last position of a burst is logged.
    pub fn scrolled(&mut self, now: DateTime<Utc>, metrics: ScrollMetrics) {
        self.pending_scroll = Some(metrics);
        self.scroll.trigger(now);
    }

    /// Fire whatever timers are due.
    pub fn tick(&mut self, now: DateTime<Utc>, recorder: &mut dyn Recorder) {
        if self.scroll.poll(now)
            && let Some(metrics) = self.pending_scroll.take()
        {
            recorder.record(
                EventData::from(EventKind::Scroll).with("scrollPercent", metrics.percent()),
            );
        }

        if self.time_updates.poll(now) {
            let elapsed = (now - self.started_at).num_milliseconds().max(0);
            recorder.record(
                EventData::from(EventKind::TimeUpdate).with("timeSpent", (elapsed + 500) / 1000),
            );
        }
    }

    pub fn clicked(&self, target: &ClickTarget, recorder: &mut dyn Recorder) {
        let mut data = EventData::from(EventKind::Click)
            .with("element", target.tag.as_str())
            .with("className", target.class_name.as_str())
            .with("id", target.id.as_str());

        if let Some(text) = &target.text {
            data = data.with("text", take_chars(text, self.click_text_limit));
        }

        recorder.record(data);
    }

    /// Visibility callback for a section. Logs once each time the section
    /// comes into view past the threshold.
    pub fn section_visibility(&mut self, section_id: &str, ratio: f64, recorder: &mut dyn Recorder) {
        if ratio >= self.section_threshold {
            if self.visible_sections.insert(section_id.to_string()) {
                recorder.record(EventData::from(EventKind::SectionView).with("section", section_id));
            }
        } else {
            self.visible_sections.remove(section_id);
        }
    }

    /// Scroll to a section if it exists on the page. Missing targets are a no-op.
    pub fn navigate_to<E: ElementLookup + ?Sized>(
        &self,
        section_id: &str,
        elements: &E,
        recorder: &mut dyn Recorder,
    ) -> bool {
        if !elements.exists(section_id) {
            return false;
        }

        recorder.record(EventData::from(EventKind::Navigation).with("target", section_id));
        true
    }

    /// Clear all timers (page teardown).
    pub fn stop(&mut self) {
        self.scroll.cancel();
        self.pending_scroll = None;
        self.time_updates.stop();
    }

    pub fn is_section_visible(&self, section_id: &str) -> bool {
        self.visible_sections.contains(section_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use keepsake_types::EventData;
    use serde_json::Value;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 10, 1, 18, 0, 0).unwrap()
    }

    fn tracker() -> PageTracker {
        PageTracker::new(&Config::default(), t0())
    }

    fn metrics(scroll_y: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_y,
            document_height: 3000.0,
            viewport_height: 1000.0,
        }
    }

    #[test]
    fn test_scroll_percent() {
        assert_eq!(metrics(0.0).percent(), 0);
        assert_eq!(metrics(1000.0).percent(), 50);
        assert_eq!(metrics(2500.0).percent(), 100);

        let short = ScrollMetrics {
            scroll_y: 0.0,
            document_height: 600.0,
            viewport_height: 800.0,
        };
        assert_eq!(short.percent(), 0);
    }

    #[test]
    fn test_scroll_burst_logs_last_position_once() {
        let mut tracker = tracker();
        let mut events: Vec<EventData> = Vec::new();

        tracker.scrolled(t0(), metrics(100.0));
        tracker.scrolled(t0() + Duration::milliseconds(50), metrics(600.0));
        tracker.tick(t0() + Duration::milliseconds(120), &mut events);
        assert!(events.is_empty());

        tracker.tick(t0() + Duration::milliseconds(150), &mut events);
        tracker.tick(t0() + Duration::milliseconds(400), &mut events);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, "scroll");
        assert_eq!(events[0].get("scrollPercent"), Some(&Value::from(30)));
    }

    #[test]
    fn test_time_update_every_thirty_seconds() {
        let mut tracker = tracker();
        let mut events: Vec<EventData> = Vec::new();

        tracker.tick(t0() + Duration::seconds(29), &mut events);
        tracker.tick(t0() + Duration::seconds(30), &mut events);
        tracker.tick(t0() + Duration::seconds(61), &mut events);

        let spent: Vec<_> = events.iter().map(|e| e.get("timeSpent").cloned()).collect();
        assert_eq!(spent, vec![Some(Value::from(30)), Some(Value::from(61))]);
    }

    #[test]
    fn test_click_truncates_text() {
        let tracker = tracker();
        let mut events: Vec<EventData> = Vec::new();
        let target = ClickTarget {
            tag: "BUTTON".to_string(),
            class_name: "quiz-option".to_string(),
            id: String::new(),
            text: Some("a".repeat(80)),
        };

        tracker.clicked(&target, &mut events);

        let text = events[0].get("text").and_then(Value::as_str).unwrap();
        assert_eq!(text.len(), 50);
        assert_eq!(events[0].get("element"), Some(&Value::from("BUTTON")));
    }

    #[test]
    fn test_click_without_text_omits_field() {
        let tracker = tracker();
        let mut events: Vec<EventData> = Vec::new();
        tracker.clicked(&ClickTarget::default(), &mut events);

        assert!(events[0].get("text").is_none());
    }

    #[test]
    fn test_section_view_logs_on_entry_only() {
        let mut tracker = tracker();
        let mut events: Vec<EventData> = Vec::new();

        tracker.section_visibility("timeline", 0.2, &mut events);
        tracker.section_visibility("timeline", 0.6, &mut events);
        tracker.section_visibility("timeline", 0.9, &mut events);
        assert!(tracker.is_section_visible("timeline"));
        tracker.section_visibility("timeline", 0.1, &mut events);
        tracker.section_visibility("timeline", 0.5, &mut events);

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.kind == "section_view"));
    }

    #[test]
    fn test_navigate_to_missing_section_is_noop() {
        let tracker = tracker();
        let mut events: Vec<EventData> = Vec::new();
        let page: &[&str] = &["hero", "quiz"];

        assert!(tracker.navigate_to("quiz", page, &mut events));
        assert!(!tracker.navigate_to("guestbook", page, &mut events));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].get("target"), Some(&Value::from("quiz")));
    }

    #[test]
    fn test_stop_clears_timers() {
        let mut tracker = tracker();
        let mut events: Vec<EventData> = Vec::new();

        tracker.scrolled(t0(), metrics(500.0));
        tracker.stop();
        tracker.tick(t0() + Duration::seconds(120), &mut events);

        assert!(events.is_empty());
    }
}
