//! Workspace scanning: reads Rust struct definitions as class descriptors.
//!
//! Struct fields are translated into host type names so the type mapper's
//! prefix rules apply to them: `i32` becomes `int`, `bool` becomes
//! `boolean`, `Vec<T>` becomes an array of `T`, and so on.

use super::resolver::ClassRegistry;
use crate::error::{Dto2TsError, Result};
use crate::types::{ClassDescriptor, FieldDescriptor, Modifiers};
use convert_case::{Case, Casing};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use syn::{Fields, GenericArgument, Item, ItemStruct, PathArguments, Type, UseTree};
use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into.
const SKIPPED_DIRS: [&str; 2] = ["target", "node_modules"];

/// Containers rendered as one-level arrays of their element type.
const SEQUENCE_TYPES: [&str; 6] = ["Vec", "VecDeque", "LinkedList", "HashSet", "BTreeSet", "IndexSet"];

/// Wrappers that are transparent for emission.
const TRANSPARENT_TYPES: [&str; 6] = ["Option", "Box", "Rc", "Arc", "Cow", "RefCell"];

/// Scans a directory tree for Rust structs.
#[derive(Debug, Clone)]
pub struct WorkspaceScanner {
    root: PathBuf,
}

impl WorkspaceScanner {
    pub fn with_path(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Parses every `.rs` file below the root. Files that fail to read or
    /// parse are skipped with a warning.
    pub fn scan(&self) -> Result<ClassRegistry> {
        if !self.root.is_dir() {
            return Err(Dto2TsError::workspace_scan(format!(
                "scan path {:?} is not a directory",
                self.root
            )));
        }

        info!("Scanning {:?} for struct definitions", self.root);
        let mut registry = ClassRegistry::new();
        let mut crate_names = CrateNameCache::default();

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Error walking workspace: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(DirEntry::into_path)
            .filter(|path| path.extension().is_some_and(|ext| ext == "rs"))
            .collect();
        files.sort();

        for file_path in &files {
            let package = self.package_for(file_path, &mut crate_names);
            match parse_source_file(file_path, &package) {
                Ok(classes) => {
                    trace!("Found {} structs in {:?}", classes.len(), file_path);
                    for class in classes {
                        registry.insert(class);
                    }
                }
                Err(e) => warn!("Skipping {:?}: {}", file_path, e),
            }
        }

        info!(
            "Scanned {} files, found {} structs",
            files.len(),
            registry.len()
        );
        Ok(registry)
    }

    /// Dotted package for a file: crate name plus module path.
    fn package_for(&self, file_path: &Path, crate_names: &mut CrateNameCache) -> String {
        let crate_dir = file_path
            .ancestors()
            .skip(1)
            .take_while(|dir| dir.starts_with(&self.root))
            .find(|dir| dir.join("Cargo.toml").is_file());

        let mut segments = Vec::new();
        let relative = match crate_dir {
            Some(crate_dir) => {
                segments.push(crate_names.get(crate_dir));
                let src_dir = crate_dir.join("src");
                file_path
                    .strip_prefix(&src_dir)
                    .or_else(|_| file_path.strip_prefix(crate_dir))
                    .unwrap_or(file_path)
            }
            None => file_path.strip_prefix(&self.root).unwrap_or(file_path),
        };

        segments.extend(module_segments(relative));
        segments.retain(|segment| !segment.is_empty());
        segments.join(".")
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}

/// Module path segments for a file relative to its crate's `src/`.
fn module_segments(relative: &Path) -> Vec<String> {
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|component| component.as_os_str().to_str().map(String::from))
        .collect();

    if let Some(stem) = relative.file_stem().and_then(|s| s.to_str())
        && !matches!(stem, "lib" | "main" | "mod")
    {
        segments.push(stem.to_string());
    }
    segments
}

/// Crate names read from `Cargo.toml`, keyed by crate directory.
#[derive(Default)]
struct CrateNameCache {
    names: HashMap<PathBuf, String>,
}

impl CrateNameCache {
    fn get(&mut self, crate_dir: &Path) -> String {
        self.names
            .entry(crate_dir.to_path_buf())
            .or_insert_with(|| read_crate_name(crate_dir))
            .clone()
    }
}

fn read_crate_name(crate_dir: &Path) -> String {
    let manifest = crate_dir.join("Cargo.toml");
    let from_manifest = fs::read_to_string(&manifest)
        .ok()
        .and_then(|contents| toml::from_str::<toml::Value>(&contents).ok())
        .and_then(|value| {
            value
                .get("package")
                .and_then(|package| package.get("name"))
                .and_then(|name| name.as_str())
                .map(String::from)
        });

    let name = from_manifest.unwrap_or_else(|| {
        debug!("No package name in {:?}, using directory name", manifest);
        crate_dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string()
    });
    name.to_case(Case::Snake)
}

/// Parses one file's structs into class descriptors.
pub fn parse_source_file(file_path: &Path, package: &str) -> Result<Vec<ClassDescriptor>> {
    let content = fs::read_to_string(file_path)?;
    parse_source(&content, package)
        .map_err(|e| Dto2TsError::parse_error(file_path, e.to_string()))
}

/// Parses Rust source text into class descriptors. Inline `mod` blocks
/// extend the package.
pub fn parse_source(content: &str, package: &str) -> Result<Vec<ClassDescriptor>> {
    let syntax = syn::parse_file(content)?;
    let mut classes = Vec::new();
    collect_items(&syntax.items, package, &mut classes);
    Ok(classes)
}

fn collect_items(items: &[Item], package: &str, classes: &mut Vec<ClassDescriptor>) {
    let imports = collect_imports(items);

    for item in items {
        match item {
            Item::Struct(item_struct) => {
                if let Some(class) = struct_to_class(item_struct, package, &imports) {
                    debug!("Found struct: {}", class.qualified_name());
                    classes.push(class);
                }
            }
            Item::Mod(item_mod) => {
                if let Some((_, nested)) = &item_mod.content {
                    let nested_package = if package.is_empty() {
                        item_mod.ident.to_string()
                    } else {
                        format!("{}.{}", package, item_mod.ident)
                    };
                    collect_items(nested, &nested_package, classes);
                }
            }
            _ => {}
        }
    }
}

/// Maps imported idents to the path they were imported from.
fn collect_imports(items: &[Item]) -> HashMap<String, String> {
    let mut imports = HashMap::new();
    for item in items {
        if let Item::Use(item_use) = item {
            walk_use_tree(&item_use.tree, &mut Vec::new(), &mut imports);
        }
    }
    imports
}

fn walk_use_tree(tree: &UseTree, prefix: &mut Vec<String>, imports: &mut HashMap<String, String>) {
    match tree {
        UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            walk_use_tree(&path.tree, prefix, imports);
            prefix.pop();
        }
        UseTree::Name(name) => {
            let ident = name.ident.to_string();
            let mut full = prefix.clone();
            full.push(ident.clone());
            imports.insert(ident, full.join("::"));
        }
        UseTree::Rename(rename) => {
            let mut full = prefix.clone();
            full.push(rename.ident.to_string());
            imports.insert(rename.rename.to_string(), full.join("::"));
        }
        UseTree::Group(group) => {
            for tree in &group.items {
                walk_use_tree(tree, prefix, imports);
            }
        }
        UseTree::Glob(_) => {}
    }
}

fn struct_to_class(
    item_struct: &ItemStruct,
    package: &str,
    imports: &HashMap<String, String>,
) -> Option<ClassDescriptor> {
    let mut class = ClassDescriptor::new(item_struct.ident.to_string(), package);

    match &item_struct.fields {
        Fields::Named(named) => {
            for field in &named.named {
                let Some(ident) = &field.ident else { continue };
                let host = host_type(&field.ty, imports);
                class.fields.push(FieldDescriptor {
                    name: ident.to_string().trim_start_matches("r#").to_string(),
                    declared_type_name: host.simple_name,
                    qualified_type_name: host.qualified_name,
                    is_array: host.is_array,
                    modifiers: visibility_modifiers(&field.vis),
                });
            }
        }
        Fields::Unit => {}
        Fields::Unnamed(_) => {
            trace!("Skipping tuple struct {}", item_struct.ident);
            return None;
        }
    }

    Some(class)
}

fn visibility_modifiers(vis: &syn::Visibility) -> Modifiers {
    match vis {
        syn::Visibility::Public(_) => Modifiers::PUBLIC,
        syn::Visibility::Restricted(_) => Modifiers::PROTECTED,
        syn::Visibility::Inherited => Modifiers::PRIVATE,
    }
}

/// A Rust type expressed as a host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostType {
    pub simple_name: String,
    pub qualified_name: Option<String>,
    pub is_array: bool,
}

impl HostType {
    fn scalar(simple_name: impl Into<String>, qualified_name: Option<String>) -> Self {
        Self {
            simple_name: simple_name.into(),
            qualified_name,
            is_array: false,
        }
    }

    fn into_array(self) -> Self {
        Self {
            is_array: true,
            ..self
        }
    }
}

/// Host keyword for Rust primitives and `String`.
fn primitive_host_name(ident: &str) -> Option<&'static str> {
    Some(match ident {
        "String" | "str" => "String",
        "bool" => "boolean",
        "i8" | "u8" => "byte",
        "i16" | "u16" => "short",
        "i32" | "u32" => "int",
        "i64" | "u64" | "i128" | "u128" | "isize" | "usize" => "long",
        "f32" => "float",
        "f64" => "double",
        _ => return None,
    })
}

fn first_type_argument(arguments: &PathArguments) -> Option<&Type> {
    match arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        }),
        _ => None,
    }
}

/// Translates a field type, unwrapping transparent wrappers and turning
/// sequences into one-level arrays.
pub fn host_type(ty: &Type, imports: &HashMap<String, String>) -> HostType {
    match ty {
        Type::Reference(reference) => host_type(&reference.elem, imports),
        Type::Paren(paren) => host_type(&paren.elem, imports),
        Type::Group(group) => host_type(&group.elem, imports),
        Type::Array(array) => element_type(&array.elem, imports).into_array(),
        Type::Slice(slice) => element_type(&slice.elem, imports).into_array(),
        Type::Path(type_path) => {
            let Some(last) = type_path.path.segments.last() else {
                return HostType::scalar("", None);
            };
            let ident = last.ident.to_string();

            if TRANSPARENT_TYPES.contains(&ident.as_str())
                && let Some(inner) = first_type_argument(&last.arguments)
            {
                return host_type(inner, imports);
            }
            if SEQUENCE_TYPES.contains(&ident.as_str())
                && let Some(inner) = first_type_argument(&last.arguments)
            {
                return element_type(inner, imports).into_array();
            }
            element_type(ty, imports)
        }
        _ => HostType::scalar("", None),
    }
}

/// Translates an array element. Wrappers are unwrapped; nested sequences
/// are not.
fn element_type(ty: &Type, imports: &HashMap<String, String>) -> HostType {
    match ty {
        Type::Reference(reference) => element_type(&reference.elem, imports),
        Type::Paren(paren) => element_type(&paren.elem, imports),
        Type::Group(group) => element_type(&group.elem, imports),
        Type::Path(type_path) => {
            let Some(last) = type_path.path.segments.last() else {
                return HostType::scalar("", None);
            };
            let ident = last.ident.to_string();

            if TRANSPARENT_TYPES.contains(&ident.as_str())
                && let Some(inner) = first_type_argument(&last.arguments)
            {
                return element_type(inner, imports);
            }
            if let Some(primitive) = primitive_host_name(&ident) {
                return HostType::scalar(primitive, None);
            }

            let written: Vec<String> = type_path
                .path
                .segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect();
            let qualified = if written.len() > 1 {
                written.join("::")
            } else {
                imports.get(&ident).cloned().unwrap_or_else(|| ident.clone())
            };
            HostType::scalar(ident, Some(qualified))
        }
        _ => HostType::scalar("", None),
    }
}
