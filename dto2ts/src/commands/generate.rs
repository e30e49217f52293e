//! Generate command - writes one TypeScript file per configured class.

use super::load_config;
use crate::cli::{Cli, GenerateArgs};
use dto2ts_core::{
    config::Dto2TsConfig,
    error::Result,
    tooling::{ClassOutcome, GenerationReport, TypeGenerator, build_resolver},
};
use tracing::{info, warn};

/// Runs the generate command. Individual class failures are reported but
/// do not fail the command.
pub fn run(cli: &Cli, args: GenerateArgs) -> Result<()> {
    let mut config = load_config(cli)?;
    apply_overrides(&mut config, &args)?;

    if config.classes.is_empty() {
        warn!("No classes to convert");
        return Ok(());
    }

    let resolver = build_resolver(&config)?;
    let generator = TypeGenerator::new(resolver, config.emitter_config()).dry_run(args.dry_run);
    let report = generator.generate(&config.classes);

    print_summary(&report);
    Ok(())
}

/// Applies command-line overrides on top of the file configuration.
pub fn apply_overrides(config: &mut Dto2TsConfig, args: &GenerateArgs) -> Result<()> {
    if !args.classes.is_empty() {
        config.classes = args.classes.clone();
    }
    if let Some(folder) = &args.output_folder {
        // Relative to the working directory, not the config file.
        config.output_folder = if folder.trim().is_empty() {
            String::new()
        } else {
            std::path::absolute(folder)?.to_string_lossy().into_owned()
        };
    }
    if let Some(prefix) = &args.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(suffix) = &args.suffix {
        config.suffix = suffix.clone();
    }
    if let Some(namespace) = &args.namespace {
        config.namespace = Some(namespace.clone());
        config.add_namespace = true;
    }
    if args.add_namespace {
        config.add_namespace = true;
    }
    if args.no_overwrite {
        config.overwrite = false;
    }
    if args.public_only {
        config.include_private = false;
    }
    Ok(())
}

fn print_summary(report: &GenerationReport) {
    for class in &report.classes {
        match &class.outcome {
            ClassOutcome::Written {
                path,
                bytes_written,
            } => println!(
                "  * {} -> {} ({} bytes)",
                class.class_name,
                path.display(),
                bytes_written
            ),
            ClassOutcome::Skipped { path } => println!(
                "  - {} -> {} (exists, skipped)",
                class.class_name,
                path.display()
            ),
            ClassOutcome::DryRun { path, content } => {
                println!("  ~ {} -> {} (dry run)", class.class_name, path.display());
                print!("{}", content);
            }
            ClassOutcome::Failed { error } => {
                println!("  ! {} failed: {}", class.class_name, error)
            }
        }
    }

    info!(
        "{} written, {} skipped, {} dry run, {} failed",
        report.written(),
        report.skipped(),
        report.dry_run(),
        report.failed()
    );
}
