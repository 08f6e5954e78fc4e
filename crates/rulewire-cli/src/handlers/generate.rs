//! Generate command handler

use super::load_generator_config;
use crate::commands::GenerateArgs;
use crate::error::CliResult;
use crate::output::Reporter;
use rulewire::generator::PipelineGenerator;
use rulewire::registry::RegistryFile;
use std::fs::File;
use std::io::{self, BufWriter};

/// Execute the generate command
pub fn execute_generate(reporter: &Reporter, args: &GenerateArgs) -> CliResult<()> {
    let config = load_generator_config(args.config.as_deref())?;
    let registry = RegistryFile::load(&args.registry)?;
    tracing::debug!(
        registry = %args.registry.display(),
        output = ?args.output,
        manifest = args.manifest,
        "running generate"
    );
    let generator = PipelineGenerator::new(config);

    match &args.output {
        Some(path) if args.manifest => {
            let metadata =
                generator.write_with_manifest(&registry, path, &regenerate_command(args))?;
            reporter.success(&format!(
                "Wrote {} (registry {})",
                path.display(),
                short_hash(&metadata.input_hash)
            ));
        }
        Some(path) => {
            let mut sink = BufWriter::new(File::create(path)?);
            let bytes = generator.write(&registry, &mut sink)?;
            reporter.success(&format!("Wrote {} ({bytes} bytes)", path.display()));
        }
        None => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            generator.write(&registry, &mut sink)?;
        }
    }
    Ok(())
}

/// Command line that reproduces this run, recorded in the manifest.
#[must_use]
pub fn regenerate_command(args: &GenerateArgs) -> String {
    let mut cmd = format!("rulewire generate --registry {}", args.registry.display());
    if let Some(config) = &args.config {
        cmd.push_str(&format!(" --config {}", config.display()));
    }
    if let Some(output) = &args.output {
        cmd.push_str(&format!(" --output {}", output.display()));
    }
    if args.manifest {
        cmd.push_str(" --manifest");
    }
    cmd
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}
