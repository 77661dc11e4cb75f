use crate::schema::{Function, Index, Scope, Snapshot};

use indexmap::IndexMap;
use serde_json::Value;

/// Everything besides the field map that the engine's define call takes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefineOptions {
    pub instance_methods: IndexMap<String, Function>,
    pub class_methods: IndexMap<String, Function>,
    pub getters: IndexMap<String, Function>,
    pub setters: IndexMap<String, Function>,
    pub indexes: Vec<Index>,
    pub validators: IndexMap<String, Function>,
    pub scopes: IndexMap<String, Scope>,
    pub default_scope: Option<Scope>,

    /// Free-form options (`schema`, `paranoid`, `tableName`, ...)
    pub options: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncOptions {
    /// Drop tables before creating them
    pub force: bool,

    /// Alter existing tables to match the models
    pub alter: bool,

    /// Anything else, passed through to the engine
    pub options: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Positional bind parameters
    pub bind: Vec<Value>,

    /// Return plain records instead of model instances
    pub raw: bool,

    pub options: IndexMap<String, Value>,
}

impl From<&Snapshot> for DefineOptions {
    fn from(snapshot: &Snapshot) -> Self {
        DefineOptions {
            instance_methods: snapshot.instance_methods.clone(),
            class_methods: snapshot.class_methods.clone(),
            getters: snapshot.getters.clone(),
            setters: snapshot.setters.clone(),
            indexes: snapshot.indexes.clone(),
            validators: snapshot.validators.clone(),
            scopes: snapshot.scopes.clone(),
            default_scope: snapshot.default_scope.clone(),
            options: snapshot.options.clone(),
        }
    }
}

impl SyncOptions {
    pub fn force() -> SyncOptions {
        SyncOptions {
            force: true,
            ..SyncOptions::default()
        }
    }
}
