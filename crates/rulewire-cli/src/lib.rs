//! Rulewire CLI library
//!
//! Command-line front end for the `rulewire` pipeline generator.
//!
//! ```bash
//! rulewire generate --registry rules.yaml --output Pipelines+Generated.swift --manifest
//! rulewire verify Pipelines+Generated.swift --registry rules.yaml
//! rulewire config --config rulewire.yaml
//! ```

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, GenerateArgs, VerifyArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::Reporter;
