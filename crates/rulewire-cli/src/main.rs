//! Rulewire CLI: regenerate lint and format pipeline dispatch code
//!
//! ## Usage
//!
//! ```bash
//! rulewire generate --registry rules.yaml                 # Print to stdout
//! rulewire generate -r rules.yaml -o out.swift --manifest # Write with manifest
//! rulewire verify out.swift --registry rules.yaml         # Check for edits or staleness
//! ```

use clap::Parser;
use rulewire_cli::{
    handlers, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Reporter, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = build_config(&cli);
    logging::init(&config);
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match run(cli.command, &reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.failure(&format!("Error: {e}"));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, reporter: &Reporter) -> CliResult<()> {
    match command {
        Commands::Generate(args) => handlers::execute_generate(reporter, &args),
        Commands::Verify(args) => handlers::execute_verify(reporter, &args),
        Commands::Config(args) => handlers::execute_config(&args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
