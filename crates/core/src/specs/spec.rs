use crate::errors::CoreError;
use crate::naming::to_snake_case;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Only modifier the field mini-language understands
pub const NULLABLE_MODIFIER: &str = "nullable";

/// One attribute of a generated entity, parsed from `name:type[:nullable]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub type_name: String,
    pub nullable: bool,
    pub column_name: String,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, nullable: bool) -> Self {
        let name = name.into();
        let column_name = to_snake_case(&name);
        Self {
            name,
            type_name: type_name.into(),
            nullable,
            column_name,
        }
    }

    /// Render the field back into its token form
    pub fn to_token(&self) -> String {
        if self.nullable {
            format!("{}:{}:{}", self.name, self.type_name, NULLABLE_MODIFIER)
        } else {
            format!("{}:{}", self.name, self.type_name)
        }
    }
}

/// JPA association kinds accepted in a relationship spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    #[serde(rename = "oneToOne")]
    OneToOne,
    #[serde(rename = "oneToMany")]
    OneToMany,
    #[serde(rename = "manyToOne")]
    ManyToOne,
    #[serde(rename = "manyToMany")]
    ManyToMany,
}

impl RelationshipKind {
    pub const ALL: [RelationshipKind; 4] = [
        RelationshipKind::OneToOne,
        RelationshipKind::OneToMany,
        RelationshipKind::ManyToOne,
        RelationshipKind::ManyToMany,
    ];

    /// Token form, e.g. `manyToOne`
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::OneToOne => "oneToOne",
            RelationshipKind::OneToMany => "oneToMany",
            RelationshipKind::ManyToOne => "manyToOne",
            RelationshipKind::ManyToMany => "manyToMany",
        }
    }

    /// JPA annotation name, e.g. `ManyToOne`
    pub fn annotation(&self) -> &'static str {
        match self {
            RelationshipKind::OneToOne => "OneToOne",
            RelationshipKind::OneToMany => "OneToMany",
            RelationshipKind::ManyToOne => "ManyToOne",
            RelationshipKind::ManyToMany => "ManyToMany",
        }
    }

    /// Whether the association side holds a collection of targets
    pub fn is_collection(&self) -> bool {
        matches!(self, RelationshipKind::OneToMany | RelationshipKind::ManyToMany)
    }
}

impl FromStr for RelationshipKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownRelationshipKind {
                kind: s.to_string(),
            })
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Association between the generated entity and another entity, parsed from
/// `kind:fieldName:TargetEntity`. The target is referenced by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDefinition {
    pub kind: RelationshipKind,
    pub field_name: String,
    pub target_entity: String,
}

impl RelationshipDefinition {
    pub fn to_token(&self) -> String {
        format!("{}:{}:{}", self.kind, self.field_name, self.target_entity)
    }
}

/// Parse a field spec such as `"email:String name:String:nullable age:Integer"`.
///
/// An empty spec yields no fields. A third part other than `nullable` is
/// ignored rather than rejected.
pub fn parse_fields(spec: &str) -> Result<Vec<FieldDefinition>, CoreError> {
    spec.split_whitespace().map(parse_field_token).collect()
}

fn parse_field_token(token: &str) -> Result<FieldDefinition, CoreError> {
    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() < 2 {
        return Err(CoreError::MalformedFieldToken {
            token: token.to_string(),
        });
    }

    let nullable = match parts.get(2) {
        Some(&NULLABLE_MODIFIER) => true,
        Some(other) => {
            tracing::warn!(token, modifier = *other, "ignoring unrecognized field modifier");
            false
        }
        None => false,
    };

    Ok(FieldDefinition::new(parts[0], parts[1], nullable))
}

/// Parse a relationship spec such as `"manyToOne:author:User oneToMany:comments:Comment"`.
pub fn parse_relationships(spec: &str) -> Result<Vec<RelationshipDefinition>, CoreError> {
    spec.split_whitespace().map(parse_relationship_token).collect()
}

fn parse_relationship_token(token: &str) -> Result<RelationshipDefinition, CoreError> {
    let parts: Vec<&str> = token.split(':').collect();
    let [kind, field_name, target_entity] = parts.as_slice() else {
        return Err(CoreError::MalformedRelationshipToken {
            token: token.to_string(),
        });
    };

    Ok(RelationshipDefinition {
        kind: kind.parse()?,
        field_name: field_name.to_string(),
        target_entity: target_entity.to_string(),
    })
}
