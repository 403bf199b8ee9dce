use crate::context::ExecutionContext;
use crate::presentation::view_models::ConfigViewModel;
use crate::presentation::{CommandResultViewModel, Guidance, Renderer, StatusBadge};
use anyhow::{Context, Result};
use keepsake_tracker::Config;

pub fn init(ctx: &ExecutionContext, force: bool, renderer: &impl Renderer) -> Result<()> {
    let path = ctx.config_path();

    if path.exists() && !force {
        let config = ctx.load_config()?;
        let view = config_view(&path, true, config)?;
        let result = CommandResultViewModel::new(view)
            .with_badge(StatusBadge::info("Config already exists"))
            .with_suggestion(
                Guidance::new("Overwrite it with defaults").with_command("keepsake config init --force"),
            );
        return renderer.render(result);
    }

    let config = Config::default();
    config
        .save_to(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    let view = config_view(&path, true, config)?;
    let result = CommandResultViewModel::new(view)
        .with_badge(StatusBadge::success(format!("Wrote {}", path.display())));
    renderer.render(result)
}

pub fn show(ctx: &ExecutionContext, renderer: &impl Renderer) -> Result<()> {
    let path = ctx.config_path();
    let exists = path.exists();
    let config = ctx.load_config()?;

    let view = config_view(&path, exists, config)?;
    let mut result = CommandResultViewModel::new(view);
    if !exists {
        result = result.with_suggestion(
            Guidance::new("Write these defaults to disk").with_command("keepsake config init"),
        );
    }
    renderer.render(result)
}

fn config_view(path: &std::path::Path, exists: bool, config: Config) -> Result<ConfigViewModel> {
    let rendered = toml::to_string_pretty(&config).context("failed to render config")?;
    Ok(ConfigViewModel {
        path: path.display().to_string(),
        exists,
        config,
        rendered,
    })
}
