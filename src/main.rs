use clap::Parser;
use replika::config::Cli;
use replika::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Validation happens inside `run`, after logging is up, so a fatal
    // setup error lands in the log file too
    let config = cli.resolve()?;

    init_logging(&config.log_file, config.verbosity, config.quiet)?;
    tracing::debug!("replika v{}", replika::VERSION);

    replika::commands::sync::run(config)?;

    Ok(())
}
