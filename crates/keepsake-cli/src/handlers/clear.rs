use crate::context::ExecutionContext;
use crate::presentation::view_models::ClearViewModel;
use crate::presentation::{CommandResultViewModel, Renderer, StatusBadge};
use anyhow::{Context, Result};
use keepsake_store::KeyValueStore;
use tracing::info;

/// Remove the live key, its archives and the final snapshot.
pub fn handle(ctx: &ExecutionContext, renderer: &impl Renderer) -> Result<()> {
    let config = ctx.load_config()?;

    let mut removed_keys = Vec::new();
    if ctx.store_exists() {
        let mut store = ctx.open_store(&config)?;

        let mut targets = store
            .keys_with_prefix(&config.storage.key)
            .context("failed to list analytics keys")?;
        if store.get(&config.storage.final_key)?.is_some() {
            targets.push(config.storage.final_key.clone());
        }

        for key in targets {
            store
                .remove(&key)
                .with_context(|| format!("failed to remove {}", key))?;
            removed_keys.push(key);
        }

        store.vacuum().context("failed to compact store")?;
    }
    removed_keys.sort();

    info!(count = removed_keys.len(), "analytics keys removed");

    let badge = if removed_keys.is_empty() {
        StatusBadge::info("Store already empty")
    } else {
        StatusBadge::success(format!("Cleared {} keys", removed_keys.len()))
    };

    renderer.render(CommandResultViewModel::new(ClearViewModel { removed_keys }).with_badge(badge))
}
