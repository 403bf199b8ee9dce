use super::args::{Cli, Commands, ConfigCommand};
use super::handlers;
use crate::context::ExecutionContext;
use crate::presentation::ConsoleRenderer;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let ctx = ExecutionContext::new(cli.data_dir.as_deref(), cli.format)?;
    let renderer = ConsoleRenderer::new(ctx.json_mode());

    let Some(command) = cli.command else {
        return handlers::guidance::handle(&ctx, &renderer);
    };

    match command {
        Commands::Simulate {
            answers,
            quiz,
            slides,
            finalize: _,
            no_finalize,
        } => handlers::simulate::handle(
            &ctx,
            handlers::simulate::SimulateOptions {
                answers,
                quiz,
                slides,
                finalize: !no_finalize,
            },
            &renderer,
        ),

        Commands::Inspect { limit } => handlers::inspect::handle(&ctx, limit, &renderer),

        Commands::Stats => handlers::stats::handle(&ctx, &renderer),

        Commands::Clear => handlers::clear::handle(&ctx, &renderer),

        Commands::Config { command } => match command {
            ConfigCommand::Init { force } => handlers::config::init(&ctx, force, &renderer),
            ConfigCommand::Show => handlers::config::show(&ctx, &renderer),
        },
    }
}
