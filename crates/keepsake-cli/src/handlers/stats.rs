use crate::context::ExecutionContext;
use crate::presentation::presenters::present_stats;
use crate::presentation::{CommandResultViewModel, Guidance, Renderer, StatusBadge};
use anyhow::Result;
use keepsake_tracker::read_stored;

pub fn handle(ctx: &ExecutionContext, renderer: &impl Renderer) -> Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;

    let stored = read_stored(&store, &config.storage);
    let view = present_stats(stored.as_ref());

    let result = match stored {
        Some(_) => {
            let label = format!("{} interactions", view.total_interactions);
            CommandResultViewModel::new(view).with_badge(StatusBadge::info(label))
        }
        None => CommandResultViewModel::new(view)
            .with_badge(StatusBadge::warning("No stored log"))
            .with_suggestion(Guidance::new("Record a scripted visit").with_command("keepsake simulate")),
    };

    renderer.render(result)
}
