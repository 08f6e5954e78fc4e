//! Config command handler

use super::load_generator_config;
use crate::commands::ConfigArgs;
use crate::error::CliResult;
use rulewire::config::GeneratorConfig;

/// Execute the config command
pub fn execute_config(args: &ConfigArgs) -> CliResult<()> {
    let config = load_generator_config(args.config.as_deref())?;
    print!("{}", render_config(&config)?);
    Ok(())
}

/// Render the configuration as YAML, in the same shape `--config` accepts.
pub fn render_config(config: &GeneratorConfig) -> CliResult<String> {
    Ok(serde_yaml_ng::to_string(config)?)
}
