//! Assertions against the `{ badge, content, suggestions }` JSON envelope.

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Assert the stored log (`content.stored`) holds `expected` events.
pub fn assert_interaction_count(json: &Value, expected: usize) -> Result<()> {
    let interactions = stored_interactions(json)?;

    if interactions.len() != expected {
        bail!(
            "Expected {} stored interactions, got {}",
            expected,
            interactions.len()
        );
    }

    Ok(())
}

/// Assert at least one stored event has the given kind.
pub fn assert_event_present(json: &Value, kind: &str) -> Result<()> {
    let interactions = stored_interactions(json)?;

    if !interactions.iter().any(|e| e["event"] == kind) {
        let kinds: Vec<&str> = interactions
            .iter()
            .filter_map(|e| e["event"].as_str())
            .collect();
        bail!("Expected a '{}' event in {:?}", kind, kinds);
    }

    Ok(())
}

/// Assert stored timestamps never go backwards.
pub fn assert_timestamps_ordered(json: &Value) -> Result<()> {
    let interactions = stored_interactions(json)?;

    let timestamps: Vec<&str> = interactions
        .iter()
        .enumerate()
        .map(|(i, e)| {
            e["timestamp"]
                .as_str()
                .with_context(|| format!("Interaction {} missing timestamp", i))
        })
        .collect::<Result<_>>()?;

    // ISO-8601 UTC with fixed millisecond width sorts lexically
    for (i, pair) in timestamps.windows(2).enumerate() {
        if pair[0] > pair[1] {
            bail!(
                "Interaction {} at {} is earlier than its predecessor at {}",
                i + 1,
                pair[1],
                pair[0]
            );
        }
    }

    Ok(())
}

/// Assert the badge level (`success`, `info`, `warning`).
pub fn assert_badge_level(json: &Value, expected: &str) -> Result<()> {
    let level = json["badge"]["level"]
        .as_str()
        .context("Expected 'badge.level' in JSON")?;

    if level != expected {
        bail!("Expected badge level {}, got {}", expected, level);
    }

    Ok(())
}

fn stored_interactions(json: &Value) -> Result<&Vec<Value>> {
    json["content"]["stored"]["interactions"]
        .as_array()
        .context("Expected 'content.stored.interactions' array in JSON")
}
