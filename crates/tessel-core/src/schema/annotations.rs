use super::{Function, Hook, Index, Relationship, Scope, Snapshot};

use indexmap::IndexMap;
use serde_json::Value;

/// Metadata collected by annotations while a model is being declared.
///
/// Owned by exactly one declaration and moved into that model's snapshot
/// when options are generated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub validators: IndexMap<String, Function>,
    pub hooks: IndexMap<String, Hook>,
    pub indexes: Vec<Index>,
    pub scopes: IndexMap<String, Scope>,
    pub default_scope: Option<Scope>,
    pub relationships: Vec<Relationship>,
    pub options: IndexMap<String, Value>,

    /// Generated snapshots of the models this one extends, in registration order
    pub extensions: Vec<Snapshot>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        *self == Annotations::default()
    }
}
