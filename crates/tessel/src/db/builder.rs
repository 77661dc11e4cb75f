use super::{ConnectOptions, Db, Driver};
use crate::{err, register_model, Definition, Error, Model, Result};

use indexmap::IndexMap;
use std::sync::Arc;
use tessel_core::{
    schema::{Scope, DEFAULT_SCOPE},
    Engine, SchemaHandle, Snapshot,
};

#[derive(Debug, Default)]
pub struct Builder {
    /// Models in registration order
    models: Vec<Registration>,
}

#[derive(Debug)]
struct Registration {
    name: &'static str,
    define: fn() -> Result<Definition>,
}

type Handles = IndexMap<String, Arc<dyn SchemaHandle>>;

impl Builder {
    pub fn register<M: Model>(&mut self) -> &mut Self {
        self.models.push(Registration {
            name: M::NAME,
            define: Definition::new::<M>,
        });
        self
    }

    /// Connect through `driver` and build against the resulting engine.
    pub fn connect(&mut self, options: &ConnectOptions, driver: &dyn Driver) -> Result<Db> {
        options.target()?;
        let engine = driver.connect(options)?;
        self.build_boxed(engine)
    }

    /// Instantiate and register every model, then wire relationships and
    /// scopes between them.
    pub fn build(&mut self, engine: impl Engine) -> Result<Db> {
        self.build_boxed(Box::new(engine))
    }

    fn build_boxed(&mut self, mut engine: Box<dyn Engine>) -> Result<Db> {
        let mut snapshots: IndexMap<String, Snapshot> = IndexMap::new();
        let mut models = Handles::new();

        for registration in &self.models {
            let snapshot = (registration.define)()?.into_snapshot()?;
            let handle = register_model(&snapshot, &mut *engine)?;

            if models.insert(snapshot.name.clone(), handle).is_some() {
                log::warn!(
                    "model `{}` registered more than once; the last registration wins",
                    registration.name
                );
            }

            snapshots.insert(snapshot.name.clone(), snapshot);
        }

        for snapshot in snapshots.values() {
            wire_relationships(snapshot, &models)?;
        }

        for snapshot in snapshots.values() {
            wire_scopes(snapshot, &models)?;
        }

        log::debug!("built {} model(s)", models.len());

        Ok(Db { engine, models })
    }
}

fn handle<'a>(models: &'a Handles, name: &str) -> Result<&'a Arc<dyn SchemaHandle>> {
    models
        .get(name)
        .ok_or_else(|| err!("model `{name}` was not registered"))
}

fn wire_relationships(snapshot: &Snapshot, models: &Handles) -> Result<()> {
    let source = handle(models, &snapshot.name)?;

    for relationship in &snapshot.relationships {
        let target = models.get(&relationship.target).ok_or_else(|| {
            Error::unknown_relation_target(&snapshot.name, &relationship.target)
        })?;

        log::debug!(
            "`{}` {} `{}`",
            snapshot.name,
            relationship.kind,
            relationship.target
        );

        source.associate(relationship.kind, target.clone(), &relationship.options)?;
    }

    Ok(())
}

/// Re-registers scopes once include targets can be resolved to handles.
fn wire_scopes(snapshot: &Snapshot, models: &Handles) -> Result<()> {
    let source = handle(models, &snapshot.name)?;

    let resolve = |target: &str| -> Result<Arc<dyn SchemaHandle>> {
        models
            .get(target)
            .cloned()
            .ok_or_else(|| Error::unknown_relation_target(&snapshot.name, target))
    };

    let resolved = |scope: &Scope| -> Result<Scope> {
        let mut scope = scope.clone();
        scope.resolve_includes(&resolve)?;
        Ok(scope)
    };

    if let Some(scope) = &snapshot.default_scope {
        source.add_scope(DEFAULT_SCOPE, resolved(scope)?, true)?;
    }

    for (name, scope) in &snapshot.scopes {
        if scope.include.is_empty() {
            continue;
        }

        log::trace!("`{}`: re-registering scope `{name}`", snapshot.name);
        source.add_scope(name, resolved(scope)?, true)?;
    }

    Ok(())
}
