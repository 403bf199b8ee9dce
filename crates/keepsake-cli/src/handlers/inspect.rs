use crate::context::ExecutionContext;
use crate::presentation::presenters::present_inspect;
use crate::presentation::{CommandResultViewModel, Guidance, Renderer, StatusBadge};
use anyhow::Result;
use keepsake_tracker::collect_report;

pub fn handle(ctx: &ExecutionContext, limit: usize, renderer: &impl Renderer) -> Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;

    let report = collect_report(&store, &config.storage, None);
    let empty = report.is_empty();
    let view = present_inspect(report, &ctx.store_path(), limit);

    let result = if empty {
        CommandResultViewModel::new(view)
            .with_badge(StatusBadge::warning("No analytics stored"))
            .with_suggestion(Guidance::new("Record a scripted visit").with_command("keepsake simulate"))
    } else {
        let label = match &view.report.stored {
            Some(stored) => format!("Session {}", stored.session_id),
            None => "Stored analytics".to_string(),
        };
        CommandResultViewModel::new(view).with_badge(StatusBadge::info(label))
    };

    renderer.render(result)
}
