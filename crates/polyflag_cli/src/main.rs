//! Command-line interface for building polytopes from symmetry descriptions.

mod cli;
mod settings;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    color_eyre::install()?;

    // Initialize logging.
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let settings = settings::Settings::load(args.config.as_deref())?;
    log::debug!("settings: {settings:?}");
    cli::exec(args.subcommand, &settings)
}
