use chrono::{DateTime, Utc};
use keepsake_store::KeyValueStore;
use keepsake_types::{
    AnalyticsReport, EventData, EventKind, FinalSnapshot, InteractionEvent, SessionId, Snapshot,
    truncate_to_millis,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::config::StorageConfig;
use crate::env::{ClientInfo, Clock, SystemClock};
use crate::recorder::Recorder;
use crate::report;

/// Whether appends still reach the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// Every append rewrites the storage key
    Durable,
    /// A write failed; the log lives in memory only from here on. Rotation
    /// stops too, so `max_events` no longer bounds the live sequence.
    Degraded { reason: String },
}

impl Persistence {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Persistence::Degraded { .. })
    }
}

// Borrowed twin of `StoredLog` so persisting does not clone the sequence.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredLogView<'a> {
    session_id: &'a SessionId,
    interactions: &'a [InteractionEvent],
}

/// Chronological record of one page visit.
///
/// Created once per visit; appends are synchronous and rewrite the whole
/// log under the storage key every time.
pub struct InteractionLogger<S: KeyValueStore, C: Clock = SystemClock> {
    session_id: SessionId,
    start_time: DateTime<Utc>,
    last_timestamp: DateTime<Utc>,
    interactions: Vec<InteractionEvent>,
    archived: usize,
    archive_seq: usize,
    store: S,
    clock: C,
    storage: StorageConfig,
    persistence: Persistence,
}

impl<S: KeyValueStore> InteractionLogger<S, SystemClock> {
    pub fn with_system_clock(store: S, client: &ClientInfo, storage: &StorageConfig) -> Self {
        Self::new(store, SystemClock, client, storage)
    }
}

impl<S: KeyValueStore, C: Clock> InteractionLogger<S, C> {
    /// Start a session and record `page_load`.
    pub fn new(store: S, clock: C, client: &ClientInfo, storage: &StorageConfig) -> Self {
        let start_time = truncate_to_millis(clock.now());
        let session_id = SessionId::generate(start_time);

        let mut logger = Self {
            session_id,
            start_time,
            last_timestamp: start_time,
            interactions: Vec::new(),
            archived: 0,
            archive_seq: 0,
            store,
            clock,
            storage: storage.clone(),
            persistence: Persistence::Durable,
        };

        let page_load = EventData::from(EventKind::PageLoad)
            .with("sessionId", logger.session_id.as_str())
            .with("userAgent", client.user_agent.as_str())
            .with("screenResolution", client.resolution())
            .with("language", client.language.as_str());
        logger.append(page_load);

        logger
    }

    /// Stamp, append and persist one event.
    pub fn append(&mut self, data: EventData) {
        let timestamp = self.next_timestamp();
        let event = InteractionEvent::stamp(data, timestamp);

        debug!(
            session_id = %self.session_id,
            event = %event.event,
            "interaction tracked"
        );

        self.interactions.push(event);
        self.persist();
        self.rotate_if_full();
    }

    /// Totals for the visit so far. Pure read.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            session_id: self.session_id.clone(),
            total_interactions: self.total_interactions(),
            time_spent: self.time_spent(),
            interactions: self.interactions.clone(),
        }
    }

    /// Take the teardown snapshot and write it under the final key.
    ///
    /// The in-memory log stays usable afterwards.
    pub fn finalize(&mut self) -> FinalSnapshot {
        let exit_time = truncate_to_millis(self.clock.now());
        let final_snapshot = FinalSnapshot::new(self.snapshot(), exit_time);

        let written = serde_json::to_string(&final_snapshot)
            .map_err(|err| err.to_string())
            .and_then(|json| {
                self.store
                    .set(&self.storage.final_key, &json)
                    .map_err(|err| err.to_string())
            });

        match written {
            Ok(()) => debug!(
                session_id = %self.session_id,
                total = final_snapshot.total_interactions,
                "final analytics stored"
            ),
            Err(reason) => warn!(
                key = %self.storage.final_key,
                error = %reason,
                "could not store final analytics"
            ),
        }

        final_snapshot
    }

    /// Current snapshot plus everything readable from the store.
    pub fn report(&self) -> AnalyticsReport {
        report::collect_report(&self.store, &self.storage, Some(self.snapshot()))
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Live (not yet archived) events, oldest first.
    pub fn interactions(&self) -> &[InteractionEvent] {
        &self.interactions
    }

    /// Archived plus live events.
    pub fn total_interactions(&self) -> usize {
        self.archived + self.interactions.len()
    }

    /// Whole seconds since the session started, rounded.
    pub fn time_spent(&self) -> i64 {
        let elapsed = (self.clock.now() - self.start_time).num_milliseconds().max(0);
        (elapsed + 500) / 1000
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn storage_config(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // Millisecond precision, never earlier than the previous event even if
    // the wall clock steps back.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = truncate_to_millis(self.clock.now());
        let stamped = now.max(self.last_timestamp);
        self.last_timestamp = stamped;
        stamped
    }

    fn persist(&mut self) {
        if self.persistence.is_degraded() {
            return;
        }

        let view = StoredLogView {
            session_id: &self.session_id,
            interactions: &self.interactions,
        };

        let result = serde_json::to_string(&view)
            .map_err(|err| err.to_string())
            .and_then(|json| {
                self.store
                    .set(&self.storage.key, &json)
                    .map_err(|err| err.to_string())
            });

        if let Err(reason) = result {
            self.degrade(reason);
        }
    }

    fn rotate_if_full(&mut self) {
        let Some(max_events) = self.storage.max_events else {
            return;
        };
        if self.interactions.len() < max_events || self.persistence.is_degraded() {
            return;
        }

        let key = self.storage.archive_key(&self.session_id, self.archive_seq + 1);
        let view = StoredLogView {
            session_id: &self.session_id,
            interactions: &self.interactions,
        };

        let archived = serde_json::to_string(&view)
            .map_err(|err| err.to_string())
            .and_then(|json| self.store.set(&key, &json).map_err(|err| err.to_string()));

        match archived {
            Ok(()) => {
                debug!(key = %key, events = self.interactions.len(), "log chunk archived");
                self.archive_seq += 1;
                self.archived += self.interactions.len();
                self.interactions.clear();
                self.persist();
            }
            Err(reason) => self.degrade(reason),
        }
    }

    fn degrade(&mut self, reason: impl fmt::Display) {
        let reason = reason.to_string();
        warn!(
            key = %self.storage.key,
            error = %reason,
            "persisting interactions failed; continuing in memory only"
        );

        if let Err(err) = self.store.remove(&self.storage.key) {
            debug!(error = %err, "could not drop persisted log");
        }

        self.persistence = Persistence::Degraded { reason };
    }
}

impl<S: KeyValueStore, C: Clock> Recorder for InteractionLogger<S, C> {
    fn record(&mut self, data: EventData) {
        self.append(data);
    }
}

impl<S: KeyValueStore, C: Clock> fmt::Debug for InteractionLogger<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionLogger")
            .field("session_id", &self.session_id)
            .field("start_time", &self.start_time)
            .field("interactions", &self.interactions.len())
            .field("archived", &self.archived)
            .field("persistence", &self.persistence)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ManualClock;
    use chrono::TimeZone;
    use keepsake_store::{MemoryStore, Quota};
    use keepsake_types::StoredLog;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 10, 1, 18, 0, 0).unwrap()
    }

    fn logger(store: MemoryStore) -> (InteractionLogger<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new(start());
        let logger = InteractionLogger::new(
            store,
            clock.clone(),
            &ClientInfo::default(),
            &StorageConfig::default(),
        );
        (logger, clock)
    }

    fn stored(logger: &InteractionLogger<MemoryStore, ManualClock>) -> StoredLog {
        let raw = logger.store().get("websiteAnalytics").unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_new_records_page_load() {
        let (logger, _) = logger(MemoryStore::new());

        assert_eq!(logger.interactions().len(), 1);
        let page_load = &logger.interactions()[0];
        assert!(page_load.is(EventKind::PageLoad));
        assert_eq!(page_load.field("sessionId").unwrap(), logger.session_id().as_str());
        assert_eq!(page_load.field("screenResolution").unwrap(), "1920x1080");
        assert_eq!(page_load.timestamp, start());
    }

    #[test]
    fn test_append_persists_full_log() {
        let (mut logger, clock) = logger(MemoryStore::new());
        clock.advance_millis(250);
        logger.append(EventData::from(EventKind::Scroll).with("scrollPercent", 10));

        let log = stored(&logger);
        assert_eq!(&log.session_id, logger.session_id());
        assert_eq!(log.interactions, logger.interactions());
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let (mut logger, clock) = logger(MemoryStore::new());
        clock.advance_millis(1000);
        logger.append(EventData::new("click"));
        clock.advance_millis(-600);
        logger.append(EventData::new("click"));

        let events = logger.interactions();
        assert_eq!(events[1].timestamp, events[2].timestamp);
    }

    #[test]
    fn test_snapshot_rounds_time_spent() {
        let (logger, clock) = logger(MemoryStore::new());
        clock.advance_millis(12_499);
        assert_eq!(logger.snapshot().time_spent, 12);
        clock.advance_millis(1);
        assert_eq!(logger.snapshot().time_spent, 13);
    }

    #[test]
    fn test_quota_failure_degrades_to_memory() {
        let (mut logger, _) = logger(MemoryStore::with_quota(Quota::bytes(600)));
        assert!(!logger.persistence().is_degraded());

        for n in 0..20 {
            logger.append(EventData::new("click").with("id", format!("heart-{}", n)));
        }

        assert!(logger.persistence().is_degraded());
        assert_eq!(logger.interactions().len(), 21);
        assert_eq!(logger.store().get("websiteAnalytics").unwrap(), None);
    }

    #[test]
    fn test_disabled_storage_keeps_memory_log() {
        let (mut logger, _) = logger(MemoryStore::disabled());
        logger.append(EventData::new("scroll"));

        assert!(logger.persistence().is_degraded());
        assert_eq!(logger.snapshot().total_interactions, 2);
    }

    #[test]
    fn test_finalize_writes_final_key() {
        let (mut logger, clock) = logger(MemoryStore::new());
        clock.advance_millis(42_000);
        let final_snapshot = logger.finalize();

        assert_eq!(final_snapshot.time_spent, 42);
        assert_eq!(final_snapshot.exit_time, start() + chrono::Duration::seconds(42));

        let raw = logger.store().get("finalAnalytics").unwrap().unwrap();
        let parsed: FinalSnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, final_snapshot);
    }

    #[test]
    fn test_recorder_seam_appends() {
        let (mut logger, _) = logger(MemoryStore::new());
        let recorder: &mut dyn Recorder = &mut logger;
        recorder.record(EventData::from(EventKind::QuizRestarted));

        assert!(logger.interactions()[1].is(EventKind::QuizRestarted));
    }
}
