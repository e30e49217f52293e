//! TypeScript class emission for a single class descriptor.

use super::type_mapper::map_field;
use crate::types::{ClassDescriptor, FieldDescriptor, Visibility};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of every emitted file.
pub const OUTPUT_EXTENSION: &str = ".ts";

/// Settings that shape emitted files. Immutable for the length of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitterConfig {
    #[serde(default)]
    pub output_folder: String,
    #[serde(default)]
    pub filename_prefix: String,
    #[serde(default)]
    pub filename_suffix: String,
    #[serde(default = "default_true")]
    pub overwrite_existing: bool,
    #[serde(default)]
    pub wrap_in_namespace: bool,
    #[serde(default = "default_true")]
    pub include_non_public_fields: bool,
    #[serde(default)]
    pub explicit_namespace: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            output_folder: String::new(),
            filename_prefix: String::new(),
            filename_suffix: String::new(),
            overwrite_existing: true,
            wrap_in_namespace: false,
            include_non_public_fields: true,
            explicit_namespace: None,
        }
    }
}

/// Result of emitting one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionResult {
    pub output_path: PathBuf,
    /// Empty when `skipped`.
    pub content: String,
    pub skipped: bool,
}

/// Lowercases the first character and leaves the rest alone.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `<folder/><prefix><lowerFirst(name)><suffix>.ts`
pub fn output_path(simple_name: &str, config: &EmitterConfig) -> PathBuf {
    let mut folder = config.output_folder.clone();
    if !folder.trim().is_empty() && !folder.ends_with('/') {
        folder.push('/');
    }

    PathBuf::from(format!(
        "{}{}{}{}{}",
        folder,
        config.filename_prefix,
        lower_first(simple_name),
        config.filename_suffix,
        OUTPUT_EXTENSION
    ))
}

fn namespace_name<'a>(class: &'a ClassDescriptor, config: &'a EmitterConfig) -> &'a str {
    config
        .explicit_namespace
        .as_deref()
        .filter(|ns| !ns.trim().is_empty())
        .unwrap_or(&class.package)
}

fn is_emitted(field: &FieldDescriptor, config: &EmitterConfig) -> bool {
    config.include_non_public_fields || field.visibility() == Visibility::Public
}

fn field_line(field: &FieldDescriptor) -> String {
    let mapped = map_field(field);
    // The space after the terminator stays even when there is no comment.
    format!(
        "\tpublic {}: {}; {}",
        field.name,
        mapped.target_type(),
        mapped.rendered_comment()
    )
}

/// Renders the TypeScript declaration for `class`.
pub fn render_class(class: &ClassDescriptor, config: &EmitterConfig) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(class.fields.len() + 4);

    if config.wrap_in_namespace {
        lines.push(format!("namespace {} {{", namespace_name(class, config)));
    }
    lines.push(format!("export class {} {{", class.simple_name));

    for field in &class.fields {
        if !is_emitted(field, config) {
            debug!(
                class = %class.simple_name,
                field = %field.name,
                modifiers = %field.modifiers,
                "Skipping non-public field"
            );
            continue;
        }
        lines.push(field_line(field));
    }

    lines.push("}".to_string());
    if config.wrap_in_namespace {
        lines.push("}".to_string());
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Emits `class`, honoring the overwrite policy against the file system.
pub fn emit(class: &ClassDescriptor, config: &EmitterConfig) -> EmissionResult {
    let output_path = output_path(&class.simple_name, config);
    emit_to(class, config, output_path)
}

/// Emits `class` for an already-decided output path.
pub fn emit_to(
    class: &ClassDescriptor,
    config: &EmitterConfig,
    output_path: PathBuf,
) -> EmissionResult {
    if !config.overwrite_existing && is_existing_file(&output_path) {
        return EmissionResult {
            output_path,
            content: String::new(),
            skipped: true,
        };
    }

    EmissionResult {
        content: render_class(class, config),
        output_path,
        skipped: false,
    }
}

fn is_existing_file(path: &Path) -> bool {
    path.is_file()
}
