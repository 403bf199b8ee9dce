use crate::context::ExecutionContext;
use crate::presentation::view_models::StatusViewModel;
use crate::presentation::{CommandResultViewModel, Guidance, Renderer, StatusBadge};
use anyhow::Result;
use keepsake_tracker::read_stored;

/// Shown when no subcommand is given.
pub fn handle(ctx: &ExecutionContext, renderer: &impl Renderer) -> Result<()> {
    let store_exists = ctx.store_exists();
    let config_exists = ctx.config_path().exists();

    let stored_interactions = if store_exists {
        let config = ctx.load_config()?;
        let store = ctx.open_store(&config)?;
        read_stored(&store, &config.storage).map(|log| log.interactions.len())
    } else {
        None
    };

    let view = StatusViewModel {
        data_dir: ctx.data_dir().display().to_string(),
        store_exists,
        config_exists,
        stored_interactions,
    };

    let mut result = CommandResultViewModel::new(view).with_badge(StatusBadge::info("keepsake"));

    if !config_exists {
        result = result.with_suggestion(
            Guidance::new("Write a default configuration").with_command("keepsake config init"),
        );
    }
    match stored_interactions {
        Some(_) => {
            result = result
                .with_suggestion(Guidance::new("Inspect the stored log").with_command("keepsake inspect"))
                .with_suggestion(Guidance::new("Count events by kind").with_command("keepsake stats"));
        }
        None => {
            result = result.with_suggestion(
                Guidance::new("Record a scripted visit").with_command("keepsake simulate"),
            );
        }
    }

    renderer.render(result)
}
