//! The per-class generation loop.

use super::resolver::ClassResolver;
use crate::error::{Dto2TsError, Result};
use crate::typesync::{EmitterConfig, emit};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// What happened to one requested class.
#[derive(Debug)]
pub enum ClassOutcome {
    /// The file was written.
    Written { path: PathBuf, bytes_written: usize },
    /// A file already existed and overwriting is disabled.
    Skipped { path: PathBuf },
    /// Rendered but not written.
    DryRun { path: PathBuf, content: String },
    /// The class could not be resolved or its file could not be written.
    Failed { error: Dto2TsError },
}

/// Outcome for one requested class name.
#[derive(Debug)]
pub struct ClassReport {
    pub class_name: String,
    pub outcome: ClassOutcome,
}

/// Report of a generation run, one entry per requested class, in order.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub classes: Vec<ClassReport>,
}

impl GenerationReport {
    fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, class_name: &str, outcome: ClassOutcome) {
        self.classes.push(ClassReport {
            class_name: class_name.to_string(),
            outcome,
        });
    }

    pub fn written(&self) -> usize {
        self.count(|outcome| matches!(outcome, ClassOutcome::Written { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, ClassOutcome::Skipped { .. }))
    }

    pub fn dry_run(&self) -> usize {
        self.count(|outcome| matches!(outcome, ClassOutcome::DryRun { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, ClassOutcome::Failed { .. }))
    }

    /// Reports of classes that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Dto2TsError)> {
        self.classes.iter().filter_map(|report| match &report.outcome {
            ClassOutcome::Failed { error } => Some((report.class_name.as_str(), error)),
            _ => None,
        })
    }

    fn count(&self, predicate: impl Fn(&ClassOutcome) -> bool) -> usize {
        self.classes
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

/// Resolves, emits and writes classes one at a time.
pub struct TypeGenerator<R> {
    resolver: R,
    config: EmitterConfig,
    dry_run: bool,
}

impl<R: ClassResolver> TypeGenerator<R> {
    pub fn new(resolver: R, config: EmitterConfig) -> Self {
        Self {
            resolver,
            config,
            dry_run: false,
        }
    }

    /// Renders without touching the file system.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Processes `class_names` in order. A class that fails is recorded and
    /// the run moves on to the next one.
    pub fn generate<S: AsRef<str>>(&self, class_names: &[S]) -> GenerationReport {
        info!("Processing {} classes to TypeScript", class_names.len());
        let mut report = GenerationReport::new();

        for class_name in class_names {
            let class_name = class_name.as_ref();
            let outcome = match self.generate_class(class_name) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(class = %class_name, error = %e, "Failed to convert class");
                    ClassOutcome::Failed { error: e }
                }
            };
            report.add(class_name, outcome);
        }

        info!(
            "Generation complete: {} written, {} skipped, {} failed",
            report.written(),
            report.skipped(),
            report.failed()
        );
        report
    }

    /// Resolves, emits and writes a single class.
    pub fn generate_class(&self, class_name: &str) -> Result<ClassOutcome> {
        let class = self.resolver.resolve(class_name)?;
        let result = emit(&class, &self.config);
        info!(
            "Converting class {} to {}",
            class_name,
            result.output_path.display()
        );

        if result.skipped {
            info!(path = %result.output_path.display(), "Ignored, already exists");
            return Ok(ClassOutcome::Skipped {
                path: result.output_path,
            });
        }

        if self.dry_run {
            debug!("Dry run, not writing {}", result.output_path.display());
            return Ok(ClassOutcome::DryRun {
                path: result.output_path,
                content: result.content,
            });
        }

        write_output(&result.output_path, &result.content)?;
        Ok(ClassOutcome::Written {
            bytes_written: result.content.len(),
            path: result.output_path,
        })
    }
}

/// Writes `content` as UTF-8, creating missing parent directories.
fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Dto2TsError::write(path, e))?;
    }
    fs::write(path, content).map_err(|e| Dto2TsError::write(path, e))
}
