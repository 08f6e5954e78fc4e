//! Command handlers - extracted from main.rs for testability

pub mod config;
pub mod generate;
pub mod verify;

pub use config::execute_config;
pub use generate::{execute_generate, regenerate_command};
pub use verify::execute_verify;

use crate::error::CliResult;
use rulewire::config::GeneratorConfig;
use std::path::Path;

/// Load the generator configuration, or the defaults when no path is given.
pub(crate) fn load_generator_config(path: Option<&Path>) -> CliResult<GeneratorConfig> {
    match path {
        Some(path) => Ok(GeneratorConfig::load(path)?),
        None => Ok(GeneratorConfig::default()),
    }
}
