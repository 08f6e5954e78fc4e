//! CLI command definitions using clap

use crate::config::ColorChoice;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Rulewire: regenerate lint and format pipeline dispatch code
#[derive(Parser, Debug)]
#[command(name = "rulewire")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the pipeline file from a rule registry
    Generate(GenerateArgs),

    /// Check a generated file against its manifest
    Verify(VerifyArgs),

    /// Show the effective generator configuration
    Config(ConfigArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Rule registry (.yaml, .yml or .json)
    #[arg(short, long, env = "RULEWIRE_REGISTRY")]
    pub registry: PathBuf,

    /// Output file; writes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Generator configuration (.yaml, .yml or .json)
    #[arg(short, long, env = "RULEWIRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write `<output>.manifest.json` (requires --output)
    #[arg(long, requires = "output")]
    pub manifest: bool,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Generated file to check
    pub file: PathBuf,

    /// Also fail if this registry differs from the one the file was generated from
    #[arg(short, long)]
    pub registry: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Generator configuration to load; defaults are shown when omitted
    #[arg(short, long, env = "RULEWIRE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Color argument for clap
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
