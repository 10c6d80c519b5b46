//! Pinpoint CLI: selectors and test snippets from the command line
//!
//! ## Usage
//!
//! ```bash
//! pinpoint selector page.json --path 0/1          # Synthesize a selector
//! pinpoint hierarchy page.json --path 0/1         # Parent / element / child
//! pinpoint render page.json -p 0/1 --preset cypress
//! pinpoint place --cursor 900,100 --panel 300x200 --viewport 1280x720
//! pinpoint settings set-order "data-testid, id, class"
//! ```

use clap::Parser;
use pinpoint_cli::{
    handlers, Cli, CliConfig, CliResult, ColorChoice, Commands, OutputFormat, Reporter, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    init_tracing(&config);
    config.validate()?;

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    let output = match &cli.command {
        Commands::Selector(args) => handlers::execute_selector(&config, args)?,
        Commands::Hierarchy(args) => handlers::execute_hierarchy(&config, args)?,
        Commands::Snapshot(args) => handlers::execute_snapshot(&config, args)?,
        Commands::Render(args) => handlers::execute_render(&config, args, &reporter)?,
        Commands::Place(args) => handlers::execute_place(&config, args)?,
        Commands::Presets(args) => handlers::execute_presets(&config, args)?,
        Commands::Settings(args) => handlers::execute_settings(&config, args, &reporter)?,
        Commands::Serve => {
            handlers::execute_serve(&reporter)?;
            String::new()
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();
    let format: OutputFormat = cli.format.into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_format(format)
        .with_settings_path(&cli.settings)
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_level()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(config.color.should_color())
        .try_init();
}
