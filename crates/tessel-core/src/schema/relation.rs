use crate::{Error, Result};

use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// Association kinds the engine can wire between two models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
    BelongsToMany,
}

/// A relationship declared on a model, resolved by target name once every
/// model has been registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub kind: RelationKind,

    /// Name of the target model
    pub target: String,

    /// Association options passed through to the engine (`as`, `foreignKey`, `through`, ...)
    pub options: Map<String, Value>,
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::HasOne => "hasOne",
            RelationKind::HasMany => "hasMany",
            RelationKind::BelongsToMany => "belongsToMany",
        }
    }
}

impl FromStr for RelationKind {
    type Err = Error;

    fn from_str(src: &str) -> Result<RelationKind> {
        match src {
            "belongsTo" => Ok(RelationKind::BelongsTo),
            "hasOne" => Ok(RelationKind::HasOne),
            "hasMany" => Ok(RelationKind::HasMany),
            "belongsToMany" => Ok(RelationKind::BelongsToMany),
            _ => Err(Error::unsupported_relation_type(src)),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl Relationship {
    pub fn new(kind: RelationKind, target: impl Into<String>, options: Map<String, Value>) -> Self {
        Relationship {
            kind,
            target: target.into(),
            options,
        }
    }
}
