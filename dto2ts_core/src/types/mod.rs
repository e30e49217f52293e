//! Class and field descriptors consumed by the emitter.

use crate::error::Dto2TsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host field modifiers, stored with the JVM access-flag bit values so that
/// descriptors exported from a JVM backend can be read without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Modifiers(u16);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const PUBLIC: Modifiers = Modifiers(0x0001);
    pub const PRIVATE: Modifiers = Modifiers(0x0002);
    pub const PROTECTED: Modifiers = Modifiers(0x0004);
    pub const STATIC: Modifiers = Modifiers(0x0008);
    pub const FINAL: Modifiers = Modifiers(0x0010);
    pub const VOLATILE: Modifiers = Modifiers(0x0040);
    pub const TRANSIENT: Modifiers = Modifiers(0x0080);

    const KEYWORDS: [(&'static str, Modifiers); 7] = [
        ("public", Modifiers::PUBLIC),
        ("private", Modifiers::PRIVATE),
        ("protected", Modifiers::PROTECTED),
        ("static", Modifiers::STATIC),
        ("final", Modifiers::FINAL),
        ("volatile", Modifiers::VOLATILE),
        ("transient", Modifiers::TRANSIENT),
    ];

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn from_bits(bits: u16) -> Self {
        Modifiers(bits)
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Modifiers) -> Self {
        Modifiers(self.0 | other.0)
    }

    /// Parses a single modifier keyword such as `public` or `static`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::KEYWORDS
            .iter()
            .find(|(name, _)| *name == keyword)
            .map(|(_, modifier)| *modifier)
    }

    pub fn keywords(self) -> Vec<&'static str> {
        Self::KEYWORDS
            .iter()
            .filter(|(_, modifier)| self.contains(*modifier))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers::PUBLIC
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl TryFrom<Vec<String>> for Modifiers {
    type Error = Dto2TsError;

    fn try_from(keywords: Vec<String>) -> Result<Self, Self::Error> {
        keywords.iter().try_fold(Modifiers::NONE, |acc, keyword| {
            Modifiers::from_keyword(keyword.trim())
                .map(|modifier| acc | modifier)
                .ok_or_else(|| Dto2TsError::InvalidModifier(keyword.clone()))
        })
    }
}

impl From<Modifiers> for Vec<String> {
    fn from(modifiers: Modifiers) -> Self {
        modifiers.keywords().into_iter().map(String::from).collect()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keywords().join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    NonPublic,
}

/// One field of a class, in the host type system's terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// Simple host type name of the element type (`int`, `String`, `Date`).
    #[serde(rename = "type")]
    pub declared_type_name: String,
    /// Fully-qualified host type name, when the source knows it.
    #[serde(rename = "qualified_type", default, skip_serializing_if = "Option::is_none")]
    pub qualified_type_name: Option<String>,
    #[serde(rename = "array", default)]
    pub is_array: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, declared_type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type_name: declared_type_name.into(),
            qualified_type_name: None,
            is_array: false,
            modifiers: Modifiers::PUBLIC,
        }
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn qualified(mut self, qualified_type_name: impl Into<String>) -> Self {
        self.qualified_type_name = Some(qualified_type_name.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// A field counts as public only when its modifier set is exactly
    /// `{public}`. `public static`, `public final` and friends are
    /// non-public here; generated output for existing backends depends on it.
    pub fn visibility(&self) -> Visibility {
        if self.modifiers == Modifiers::PUBLIC {
            Visibility::Public
        } else {
            Visibility::NonPublic
        }
    }
}

/// Resolved metadata for one class. Fields keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    #[serde(rename = "name")]
    pub simple_name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl ClassDescriptor {
    pub fn new(simple_name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            simple_name: simple_name.into(),
            package: package.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package, self.simple_name)
        }
    }
}
