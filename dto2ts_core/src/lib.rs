// dto2ts - TypeScript class generation from data-transfer object definitions

pub mod config;
pub mod error;
pub mod tooling;
pub mod types;
// TypeSync - TypeScript type mapping and emission
pub mod typesync;

// Re-export commonly used items for convenience
pub use config::Dto2TsConfig;
pub use error::{Dto2TsError, Result};
pub use types::{ClassDescriptor, FieldDescriptor, Modifiers, Visibility};
