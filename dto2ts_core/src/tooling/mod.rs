//! Tooling for locating class definitions and running generation.
//!
//! This module provides utilities for:
//! - Scanning Rust workspaces for struct definitions
//! - Loading class descriptors from JSON files
//! - Resolving configured class names through a chain of sources
//! - Writing one TypeScript file per class
//!
//! ## Quick Start (in build.rs)
//!
//! ```rust,ignore
//! fn main() {
//!     dto2ts_core::tooling::generate().expect("Type generation failed");
//!     println!("cargo:rerun-if-changed=src/");
//!     println!("cargo:rerun-if-changed=dto2ts.toml");
//! }
//! ```

mod generator;
mod resolver;
mod workspace_scanner;

pub use generator::*;
pub use resolver::*;
pub use workspace_scanner::*;

use crate::config::Dto2TsConfig;
use crate::error::Result;
use tracing::{debug, info};

/// Builds the resolver chain for a configuration: the descriptor file when
/// configured, then the workspace scan.
///
/// The workspace is scanned when `source.scan_path` is set or when no
/// descriptor file is configured.
pub fn build_resolver(config: &Dto2TsConfig) -> Result<ResolverChain> {
    let mut chain = ResolverChain::new();

    if let Some(descriptors) = config.descriptor_file() {
        chain.push(Box::new(load_descriptor_file(&descriptors)?));
    }

    if config.source.scan_path.is_some() || config.source.descriptors.is_none() {
        let scanner = WorkspaceScanner::with_path(config.scan_root());
        chain.push(Box::new(scanner.scan()?));
    } else {
        debug!("No scan path configured; skipping workspace scan");
    }

    info!("Configured {} class source(s)", chain.len());
    Ok(chain)
}

/// Generates every configured class using configuration from dto2ts.toml.
///
/// # Errors
///
/// Returns `Dto2TsError` if the configuration cannot be found or parsed or a
/// class source cannot be loaded. Per-class failures are reported in the
/// returned [`GenerationReport`] instead.
pub fn generate() -> Result<GenerationReport> {
    let config = Dto2TsConfig::new()?;
    generate_with_config(&config)
}

/// Generates every configured class with a custom configuration.
pub fn generate_with_config(config: &Dto2TsConfig) -> Result<GenerationReport> {
    let resolver = build_resolver(config)?;
    let generator = TypeGenerator::new(resolver, config.emitter_config());
    Ok(generator.generate(&config.classes))
}
