use anyhow::Context;
use clap::Parser;
use steward_config::StewardConfig;

mod cli;
mod commands;
mod output;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("stw error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config =
        StewardConfig::load_with_dotenv().context("failed to load steward configuration")?;
    let flags = cli.global_flags(&config)?;
    ui::init(&flags);

    commands::dispatch::dispatch(cli.command, &config, &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("STEWARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
