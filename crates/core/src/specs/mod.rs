pub mod spec;

pub use spec::{
    parse_fields, parse_relationships, FieldDefinition, RelationshipDefinition, RelationshipKind,
    NULLABLE_MODIFIER,
};
