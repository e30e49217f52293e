use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Dto2TsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in file {file}: {message}")]
    ParseError { file: PathBuf, message: String },

    #[error("Syn parse error: {0}")]
    SynParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("dto2ts.toml not found in {search_start} or any parent directory")]
    ConfigNotFound { search_start: PathBuf },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Class not found: {class_name}")]
    ClassNotFound { class_name: String },

    #[error("Ambiguous class name {class_name}; candidates: {}", candidates.join(", "))]
    AmbiguousClass {
        class_name: String,
        candidates: Vec<String>,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Workspace scan error: {0}")]
    WorkspaceScan(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Invalid regex pattern: {0}")]
    Regex(String),
}

impl From<syn::Error> for Dto2TsError {
    fn from(err: syn::Error) -> Self {
        Dto2TsError::SynParse(err.to_string())
    }
}

impl From<regex::Error> for Dto2TsError {
    fn from(err: regex::Error) -> Self {
        Dto2TsError::Regex(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Dto2TsError>;

impl Dto2TsError {
    pub fn parse_error(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Dto2TsError::ParseError {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Dto2TsError::Config(message.into())
    }

    pub fn class_not_found(class_name: impl Into<String>) -> Self {
        Dto2TsError::ClassNotFound {
            class_name: class_name.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Dto2TsError::Write {
            path: path.into(),
            source,
        }
    }

    pub fn workspace_scan(message: impl Into<String>) -> Self {
        Dto2TsError::WorkspaceScan(message.into())
    }
}
