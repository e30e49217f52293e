//! Class resolution: turning a configured class name into a descriptor.

use crate::error::{Dto2TsError, Result};
use crate::types::ClassDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Supplies class descriptors by fully-qualified name.
pub trait ClassResolver {
    /// Returns the descriptor for `class_name`, or
    /// [`Dto2TsError::ClassNotFound`] when this resolver does not know it.
    /// A name matching several classes is [`Dto2TsError::AmbiguousClass`].
    fn resolve(&self, class_name: &str) -> Result<ClassDescriptor>;

    /// Qualified names of every class this resolver can supply.
    fn known_classes(&self) -> Vec<String>;
}

/// Canonical form of a class name: `::` separators become `.`.
pub fn normalize_class_name(class_name: &str) -> String {
    class_name.trim().replace("::", ".")
}

/// In-memory set of class descriptors, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: Vec<ClassDescriptor>,
    by_qualified_name: HashMap<String, usize>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class. The first definition of a qualified name wins.
    pub fn insert(&mut self, class: ClassDescriptor) -> bool {
        let qualified = class.qualified_name();
        if self.by_qualified_name.contains_key(&qualified) {
            warn!(class = %qualified, "Duplicate class definition ignored");
            return false;
        }
        self.by_qualified_name.insert(qualified, self.classes.len());
        self.classes.push(class);
        true
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes.iter()
    }

    /// Looks a class up by qualified name, then by a unique match on the
    /// trailing name segments (`UserDto`, `dto.UserDto`).
    fn find(&self, class_name: &str) -> Result<&ClassDescriptor> {
        let normalized = normalize_class_name(class_name);
        if let Some(&index) = self.by_qualified_name.get(&normalized) {
            return Ok(&self.classes[index]);
        }

        let tail = normalized.strip_prefix("crate.").unwrap_or(&normalized);
        if tail.is_empty() {
            return Err(Dto2TsError::class_not_found(class_name));
        }
        let dotted_tail = format!(".{}", tail);
        let candidates: Vec<&ClassDescriptor> = self
            .classes
            .iter()
            .filter(|class| {
                let qualified = class.qualified_name();
                qualified == tail || qualified.ends_with(&dotted_tail)
            })
            .collect();

        match candidates.as_slice() {
            [] => Err(Dto2TsError::class_not_found(class_name)),
            [only] => Ok(*only),
            many => {
                warn!(class = %class_name, "Ambiguous class name; use the fully-qualified name");
                Err(Dto2TsError::AmbiguousClass {
                    class_name: class_name.to_string(),
                    candidates: many.iter().map(|class| class.qualified_name()).collect(),
                })
            }
        }
    }

    /// Parses a JSON descriptor document.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: DescriptorDocument = serde_json::from_str(json)?;
        let mut registry = ClassRegistry::new();
        for class in document.classes {
            registry.insert(class);
        }
        Ok(registry)
    }

    /// Serializes the registry in the descriptor document format.
    pub fn to_json(&self) -> Result<String> {
        let document = DescriptorDocument {
            classes: self.classes.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl ClassResolver for ClassRegistry {
    fn resolve(&self, class_name: &str) -> Result<ClassDescriptor> {
        self.find(class_name).cloned()
    }

    fn known_classes(&self) -> Vec<String> {
        self.classes.iter().map(ClassDescriptor::qualified_name).collect()
    }
}

/// On-disk layout of a descriptor file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DescriptorDocument {
    #[serde(default)]
    classes: Vec<ClassDescriptor>,
}

/// Loads class descriptors from a JSON file.
pub fn load_descriptor_file(path: impl AsRef<Path>) -> Result<ClassRegistry> {
    let path = path.as_ref();
    debug!("Reading class descriptors from {:?}", path);
    let contents = fs::read_to_string(path)?;
    let registry = ClassRegistry::from_json(&contents)
        .map_err(|e| Dto2TsError::parse_error(path, e.to_string()))?;
    info!("Loaded {} class descriptors from {:?}", registry.len(), path);
    Ok(registry)
}

/// Tries resolvers in order; the first one that knows a class wins. An
/// ambiguous name stops the chain.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn ClassResolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: impl ClassResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn push(&mut self, resolver: Box<dyn ClassResolver>) {
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl ClassResolver for ResolverChain {
    fn resolve(&self, class_name: &str) -> Result<ClassDescriptor> {
        for resolver in &self.resolvers {
            match resolver.resolve(class_name) {
                Ok(class) => return Ok(class),
                Err(Dto2TsError::ClassNotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(Dto2TsError::class_not_found(class_name))
    }

    fn known_classes(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.resolvers
            .iter()
            .flat_map(|resolver| resolver.known_classes())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}
