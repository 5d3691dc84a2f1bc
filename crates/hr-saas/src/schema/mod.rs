//! Statically registered HR models and their JSON-Schema export for the
//! database viewer.

mod export;
mod models;
pub mod registry;

pub use export::{export, SchemaCatalog, SchemaDocument};
pub use registry::{
    Constraints, DefaultValue, FieldDefinition, FieldErrorKind, FieldType, ModelDefinition,
    SchemaError, SchemaRegistry,
};
