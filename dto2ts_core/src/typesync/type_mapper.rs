//! Host type name to TypeScript type mapping.
//!
//! Rules are checked in order and the first match wins. The `String` and
//! `Date` prefixes are case-sensitive while the boolean and numeric prefixes
//! are not; generated files for existing projects rely on that asymmetry.

use crate::types::FieldDescriptor;
use std::fmt;

/// The fixed set of TypeScript groupings host types are narrowed onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Rendered with the host keyword `String`, not TypeScript's `string`.
    String,
    Boolean,
    Number,
    Any,
}

impl Category {
    pub fn as_typescript(self) -> &'static str {
        match self {
            Category::String => "String",
            Category::Boolean => "boolean",
            Category::Number => "number",
            Category::Any => "any",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_typescript())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    Prefix(&'static str),
    PrefixIgnoreCase(&'static [&'static str]),
}

impl Match {
    fn matches(self, type_name: &str) -> bool {
        match self {
            Match::Prefix(prefix) => type_name.starts_with(prefix),
            Match::PrefixIgnoreCase(prefixes) => {
                let lowered = type_name.to_lowercase();
                prefixes.iter().any(|prefix| lowered.starts_with(prefix))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentRule {
    None,
    QualifiedName,
    SimpleName,
}

struct Rule {
    matcher: Match,
    category: Category,
    comment: CommentRule,
}

const RULES: [Rule; 4] = [
    Rule {
        matcher: Match::Prefix("String"),
        category: Category::String,
        comment: CommentRule::None,
    },
    Rule {
        matcher: Match::Prefix("Date"),
        category: Category::String,
        comment: CommentRule::QualifiedName,
    },
    Rule {
        matcher: Match::PrefixIgnoreCase(&["boolean"]),
        category: Category::Boolean,
        comment: CommentRule::None,
    },
    Rule {
        matcher: Match::PrefixIgnoreCase(&["byte", "short", "int", "long", "float", "double"]),
        category: Category::Number,
        comment: CommentRule::SimpleName,
    },
];

/// A resolved TypeScript type plus the note explaining any narrowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub category: Category,
    pub is_array: bool,
    /// Comment text without the `//` marker. Empty when nothing needs saying.
    pub comment: String,
}

impl MappedType {
    /// The type expression, `Array<T>`-wrapped for arrays.
    pub fn target_type(&self) -> String {
        if self.is_array {
            format!("Array<{}>", self.category)
        } else {
            self.category.to_string()
        }
    }

    /// The comment as it appears after the statement terminator.
    pub fn rendered_comment(&self) -> String {
        if self.comment.is_empty() {
            String::new()
        } else {
            format!("// {}", self.comment)
        }
    }
}

/// Maps a host type name onto a TypeScript type.
///
/// `qualified_type_name` feeds the comment of narrowed date types;
/// `declared_type_name` is used in its place when absent. Names that match
/// no rule, including the empty string, become `any`.
pub fn map_type(
    declared_type_name: &str,
    qualified_type_name: Option<&str>,
    is_array: bool,
) -> MappedType {
    let array_suffix = if is_array { "[]" } else { "" };

    let Some(rule) = RULES.iter().find(|rule| rule.matcher.matches(declared_type_name)) else {
        return MappedType {
            category: Category::Any,
            is_array,
            comment: String::new(),
        };
    };

    let comment = match rule.comment {
        CommentRule::None => String::new(),
        CommentRule::SimpleName => format!("{}{}", declared_type_name, array_suffix),
        CommentRule::QualifiedName => {
            let qualified = qualified_type_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(declared_type_name);
            format!("{}{}", qualified, array_suffix)
        }
    };

    MappedType {
        category: rule.category,
        is_array,
        comment,
    }
}

/// Maps a field descriptor's type.
pub fn map_field(field: &FieldDescriptor) -> MappedType {
    map_type(
        &field.declared_type_name,
        field.qualified_type_name.as_deref(),
        field.is_array,
    )
}
