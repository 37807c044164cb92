//! Definition parsing, naming conventions and project configuration.

pub mod config;
pub mod errors;
pub mod naming;
pub mod specs;

pub use config::ProjectConfig;
pub use errors::CoreError;
pub use naming::NameVariants;
pub use specs::{
    parse_fields, parse_relationships, FieldDefinition, RelationshipDefinition, RelationshipKind,
};
