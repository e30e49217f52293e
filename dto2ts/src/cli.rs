//! Command-line interface definitions for dto2ts.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dto2ts - TypeScript classes from backend data-transfer objects
#[derive(Parser, Debug)]
#[command(name = "dto2ts")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to dto2ts.toml configuration file
    #[arg(short, long, global = true, env = "DTO2TS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (-v, -vv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate one TypeScript file per configured class
    Generate(GenerateArgs),

    /// Initialize a new dto2ts.toml configuration file
    Init(InitArgs),

    /// List the classes visible to the configured sources
    Info(InfoArgs),
}

// ============================================================================
// Generate Arguments
// ============================================================================

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Classes to convert (replaces the configured list; repeatable)
    #[arg(long = "class", value_name = "NAME")]
    pub classes: Vec<String>,

    /// Output folder override
    #[arg(short, long)]
    pub output_folder: Option<String>,

    /// File name prefix override
    #[arg(long)]
    pub prefix: Option<String>,

    /// File name suffix override
    #[arg(long)]
    pub suffix: Option<String>,

    /// Namespace override (implies --add-namespace)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Wrap each class in a namespace
    #[arg(long)]
    pub add_namespace: bool,

    /// Keep files that already exist
    #[arg(long)]
    pub no_overwrite: bool,

    /// Emit only fields that are plainly public
    #[arg(long)]
    pub public_only: bool,

    /// Render and report paths without writing files
    #[arg(long)]
    pub dry_run: bool,
}

// ============================================================================
// Init Arguments
// ============================================================================

#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    /// Overwrite existing dto2ts.toml if present
    #[arg(short, long)]
    pub force: bool,
}

// ============================================================================
// Info Arguments
// ============================================================================

#[derive(Args, Debug, Clone, Default)]
pub struct InfoArgs {
    /// Also list each class's fields and mapped types
    #[arg(long)]
    pub fields: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_overrides() {
        let cli = Cli::try_parse_from([
            "dto2ts",
            "generate",
            "--class",
            "a.B",
            "--class",
            "a.C",
            "--output-folder",
            "web",
            "--public-only",
            "--no-overwrite",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.classes, vec!["a.B", "a.C"]);
                assert_eq!(args.output_folder.as_deref(), Some("web"));
                assert!(args.public_only);
                assert!(args.no_overwrite);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dto2ts", "info", "-vv", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["dto2ts"]).is_err());
    }
}
