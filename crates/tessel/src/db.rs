mod builder;
pub use builder::Builder;

mod connect;
pub use connect::{ConnectOptions, Driver, Target};

use crate::{Model, Result};

use indexmap::IndexMap;
use std::sync::Arc;
use tessel_core::{
    engine::{QueryOptions, SyncOptions},
    schema::Record,
    Engine, SchemaHandle,
};

/// Registered models and the engine they were defined on.
#[derive(Debug)]
pub struct Db {
    engine: Box<dyn Engine>,

    /// Handles by model name, in registration order
    models: IndexMap<String, Arc<dyn SchemaHandle>>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Handle of a registered model by name.
    pub fn model(&self, name: &str) -> Option<&Arc<dyn SchemaHandle>> {
        self.models.get(name)
    }

    /// Handle of a registered model by type.
    pub fn get<M: Model>(&self) -> Option<&Arc<dyn SchemaHandle>> {
        self.model(M::NAME)
    }

    pub fn models(&self) -> impl Iterator<Item = (&str, &Arc<dyn SchemaHandle>)> {
        self.models.iter().map(|(name, handle)| (name.as_str(), handle))
    }

    /// The underlying engine.
    pub fn base(&self) -> &dyn Engine {
        &*self.engine
    }

    pub fn base_mut(&mut self) -> &mut dyn Engine {
        &mut *self.engine
    }

    /// Replace the underlying engine, returning the previous one. Registered
    /// handles are kept.
    pub fn set_base(&mut self, engine: impl Engine) -> Box<dyn Engine> {
        std::mem::replace(&mut self.engine, Box::new(engine))
    }

    pub async fn sync(&self, options: SyncOptions) -> Result<()> {
        self.engine.sync(options).await
    }

    pub async fn query(&self, sql: &str, options: QueryOptions) -> Result<Vec<Record>> {
        self.engine.query(sql, options).await
    }

    pub async fn authenticate(&self) -> Result<()> {
        self.engine.authenticate().await
    }
}
