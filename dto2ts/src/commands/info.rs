//! Info command - lists the classes visible to the configured sources.

use super::load_config;
use crate::cli::{Cli, InfoArgs};
use dto2ts_core::{
    error::Result,
    tooling::{ClassResolver, build_resolver},
    typesync::map_field,
};
use tracing::warn;

/// Runs the info command.
pub fn run(cli: &Cli, args: InfoArgs) -> Result<()> {
    let config = load_config(cli)?;
    let resolver = build_resolver(&config)?;

    println!("\n=== Configuration ===\n");
    println!("Output folder:   {}", config.emitter_config().output_folder);
    println!("Prefix/suffix:   '{}' / '{}'", config.prefix, config.suffix);
    println!("Overwrite:       {}", config.overwrite);
    println!("Add namespace:   {}", config.add_namespace);
    println!("Include private: {}", config.include_private);

    let known = resolver.known_classes();
    println!("\n=== Classes ({}) ===\n", known.len());

    for name in &known {
        let class = match resolver.resolve(name) {
            Ok(class) => class,
            Err(e) => {
                warn!("Could not resolve {}: {}", name, e);
                continue;
            }
        };
        // '*' marks classes selected for generation.
        let selected = config
            .classes
            .iter()
            .any(|c| resolver.resolve(c).is_ok_and(|r| r == class));
        let marker = if selected { "*" } else { " " };
        println!("{} {} ({} fields)", marker, name, class.fields.len());

        if args.fields {
            for field in &class.fields {
                let mapped = map_field(field);
                println!(
                    "      {}: {} {}",
                    field.name,
                    mapped.target_type(),
                    mapped.rendered_comment()
                );
            }
        }
    }

    Ok(())
}
