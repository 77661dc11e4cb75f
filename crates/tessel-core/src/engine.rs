//! Interface to the external mapping engine.
//!
//! Tessel never builds queries, runs hooks or talks to a database itself;
//! it hands finished model configuration to an [`Engine`] and wires the
//! returned [`SchemaHandle`]s together.

mod capability;
pub use capability::Capability;

mod options;
pub use options::{DefineOptions, QueryOptions, SyncOptions};

use crate::{
    async_trait,
    schema::{FieldDef, Function, HookAction, Record, RelationKind, Scope},
    Result,
};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::{fmt::Debug, sync::Arc};

#[async_trait]
pub trait Engine: Debug + Send + Sync + 'static {
    /// Define a model and return the engine's live handle for it.
    fn define(
        &mut self,
        name: &str,
        fields: &IndexMap<String, FieldDef>,
        options: DefineOptions,
    ) -> Result<Arc<dyn SchemaHandle>>;

    /// Returns `true` if a model with this name has been defined.
    fn is_defined(&self, name: &str) -> bool;

    /// Create (or recreate, when forced) the tables of every defined model.
    async fn sync(&self, options: SyncOptions) -> Result<()>;

    /// Run a raw query.
    async fn query(&self, sql: &str, options: QueryOptions) -> Result<Vec<Record>>;

    /// Check that the connection works.
    async fn authenticate(&self) -> Result<()>;
}

/// A model as defined by the engine.
pub trait SchemaHandle: Debug + Send + Sync + 'static {
    /// Name the model was defined under.
    fn name(&self) -> &str;

    /// Describes what this handle accepts.
    fn capability(&self) -> &Capability;

    fn add_hook(&self, action: HookAction, name: &str, function: Function) -> Result<()>;

    /// Register a scope; `override_existing` replaces a scope of the same name.
    fn add_scope(&self, name: &str, scope: Scope, override_existing: bool) -> Result<()>;

    /// Declare an association from this model to `target`.
    fn associate(
        &self,
        kind: RelationKind,
        target: Arc<dyn SchemaHandle>,
        options: &Map<String, Value>,
    ) -> Result<()>;
}
