//! TypeScript generation: type mapping and per-class emission.

pub mod emitter;
pub mod type_mapper;

pub use emitter::{EmissionResult, EmitterConfig, emit, output_path, render_class};
pub use type_mapper::{Category, MappedType, map_field, map_type};
