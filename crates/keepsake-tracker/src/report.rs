use keepsake_store::KeyValueStore;
use keepsake_types::{AnalyticsReport, FinalSnapshot, Snapshot, StoredLog};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::StorageConfig;

/// Gather everything inspectable: the live snapshot (if any), the stored
/// log, the final snapshot, and every value under the storage key prefix.
///
/// Never fails: unreadable or malformed entries are reported as absent.
pub fn collect_report<S: KeyValueStore + ?Sized>(
    store: &S,
    storage: &StorageConfig,
    current: Option<Snapshot>,
) -> AnalyticsReport {
    let keys = match store.keys_with_prefix(&storage.key) {
        Ok(keys) => keys,
        Err(err) => {
            warn!(prefix = %storage.key, error = %err, "could not list stored sessions");
            Vec::new()
        }
    };

    let all_sessions = keys
        .iter()
        .filter_map(|key| read_json::<S, StoredLog>(store, key))
        .collect();

    AnalyticsReport {
        current,
        stored: read_stored(store, storage),
        final_snapshot: read_final(store, storage),
        all_sessions,
    }
}

/// Parsed live log, `None` when missing or malformed.
pub fn read_stored<S: KeyValueStore + ?Sized>(
    store: &S,
    storage: &StorageConfig,
) -> Option<StoredLog> {
    read_json(store, &storage.key)
}

/// Parsed final snapshot, `None` when missing or malformed.
pub fn read_final<S: KeyValueStore + ?Sized>(
    store: &S,
    storage: &StorageConfig,
) -> Option<FinalSnapshot> {
    read_json(store, &storage.final_key)
}

fn read_json<S: KeyValueStore + ?Sized, T: DeserializeOwned>(store: &S, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(key = %key, error = %err, "could not read stored analytics");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key = %key, error = %err, "ignoring malformed stored analytics");
            None
        }
    }
}
