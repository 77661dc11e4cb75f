use super::{Annotations, Classified, FieldDef, Function, Hook, Index, Relationship, Scope};

use indexmap::IndexMap;
use serde_json::Value;

/// Everything the engine needs to define one model.
///
/// Produced once per definition; extensions have already been merged into
/// the buckets by the time a snapshot is handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Model name, used as the engine's model name
    pub name: String,

    pub fields: IndexMap<String, FieldDef>,
    pub instance_methods: IndexMap<String, Function>,
    pub class_methods: IndexMap<String, Function>,
    pub getters: IndexMap<String, Function>,
    pub setters: IndexMap<String, Function>,

    pub validators: IndexMap<String, Function>,
    pub hooks: IndexMap<String, Hook>,
    pub indexes: Vec<Index>,
    pub scopes: IndexMap<String, Scope>,
    pub default_scope: Option<Scope>,
    pub relationships: Vec<Relationship>,

    /// Free-form options passed through to the engine (`schema`, `paranoid`, ...)
    pub options: IndexMap<String, Value>,

    /// Snapshots of extended models, kept for inspection
    pub extensions: Vec<Snapshot>,
}

impl Snapshot {
    /// Combines classified members with the annotation metadata moved out
    /// of the declaration. Extensions are not merged yet.
    pub fn assemble(name: impl Into<String>, members: Classified, annotations: Annotations) -> Snapshot {
        Snapshot {
            name: name.into(),
            fields: members.fields,
            instance_methods: members.instance_methods,
            class_methods: members.class_methods,
            getters: members.getters,
            setters: members.setters,
            validators: annotations.validators,
            hooks: annotations.hooks,
            indexes: annotations.indexes,
            scopes: annotations.scopes,
            default_scope: annotations.default_scope,
            relationships: annotations.relationships,
            options: annotations.options,
            extensions: annotations.extensions,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Scope by name, including the default scope.
    pub fn scope(&self, name: &str) -> Option<&Scope> {
        if name == super::DEFAULT_SCOPE {
            self.default_scope.as_ref()
        } else {
            self.scopes.get(name)
        }
    }

    /// Returns `true` if any scope includes models by name.
    pub fn has_unresolved_includes(&self) -> bool {
        self.default_scope
            .iter()
            .chain(self.scopes.values())
            .any(|scope| scope.unresolved().next().is_some())
    }
}
