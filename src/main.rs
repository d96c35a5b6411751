use clap::Parser;
use miette::Result;
use pra::cli::commands;
use pra::cli::{Cli, Commands};
use pra::logging::init_logging;

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    if global.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    init_logging(global.verbose, !global.no_color);

    match cli.command {
        Commands::Search(args) => commands::search::run(args, &global),
        Commands::Tasks(args) => commands::tasks::run(args, &global),
        Commands::Simulate(args) => commands::simulate::run(args, &global),
        Commands::Analyze(args) => commands::analyze::run(args, &global),
        Commands::Validate(args) => commands::validate::run(args, &global),
        Commands::Health(args) => commands::health::run(args, &global),
        Commands::Completions(args) => commands::completions::run(args, &global),
    }
}
