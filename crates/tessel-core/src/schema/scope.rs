use super::merge::merge_map;
use crate::{engine::SchemaHandle, Error, Result};

use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

/// A named query shape registered on a model.
///
/// `query` holds everything except `include` (`where`, `attributes`,
/// `order`, ...) and is passed through to the engine. `include` entries
/// reference other models by name until the builder resolves them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scope {
    pub query: Map<String, Value>,
    pub include: Vec<Include>,
}

/// One entry of a scope's `include` list.
#[derive(Debug, Clone, PartialEq)]
pub struct Include {
    pub model: ModelRef,

    /// Remaining include options (`as`, `where`, `required`, ...)
    pub options: Map<String, Value>,
}

/// Reference to a model from inside a scope.
#[derive(Clone)]
pub enum ModelRef {
    /// Declared by name, not yet resolved
    Name(String),

    /// Resolved to the engine's handle
    Handle(Arc<dyn SchemaHandle>),
}

impl Scope {
    /// Parses a scope declaration. The value must be a record; when present,
    /// `include` must be a list of model names or `{ model, .. }` records.
    pub fn parse(name: &str, value: &Value) -> Result<Scope> {
        let Value::Object(map) = value else {
            return Err(Error::invalid_scope_shape(
                name,
                format!("expected a record, found {value}"),
            ));
        };

        let mut scope = Scope::default();

        for (key, value) in map {
            if key != "include" {
                scope.query.insert(key.clone(), value.clone());
                continue;
            }

            let Value::Array(entries) = value else {
                return Err(Error::invalid_scope_shape(name, "`include` must be a list"));
            };

            for entry in entries {
                scope.include.push(Include::parse(name, entry)?);
            }
        }

        Ok(scope)
    }

    /// Names of included models that still need resolving.
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.include.iter().filter_map(|include| match &include.model {
            ModelRef::Name(name) => Some(name.as_str()),
            ModelRef::Handle(_) => None,
        })
    }

    /// Replaces every model name in `include` with the handle returned by
    /// `resolve`.
    pub fn resolve_includes<F>(&mut self, mut resolve: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<Arc<dyn SchemaHandle>>,
    {
        for include in &mut self.include {
            if let ModelRef::Name(name) = &include.model {
                include.model = ModelRef::Handle(resolve(name)?);
            }
        }

        Ok(())
    }

    /// Folds `winner` into `self`: query keys deep-merge with `winner`
    /// taking precedence, a non-empty `include` list on the winning side
    /// replaces this one.
    pub(crate) fn merge_from(&mut self, winner: &Scope) {
        merge_map(&mut self.query, &winner.query);

        if !winner.include.is_empty() {
            self.include = winner.include.clone();
        }
    }
}

impl Include {
    fn parse(scope: &str, entry: &Value) -> Result<Include> {
        match entry {
            Value::String(model) => Ok(Include {
                model: ModelRef::Name(model.clone()),
                options: Map::new(),
            }),
            Value::Object(map) => {
                let Some(Value::String(model)) = map.get("model") else {
                    return Err(Error::invalid_scope_shape(
                        scope,
                        "`include` records need a `model` name",
                    ));
                };

                let mut options = map.clone();
                options.remove("model");

                Ok(Include {
                    model: ModelRef::Name(model.clone()),
                    options,
                })
            }
            other => Err(Error::invalid_scope_shape(
                scope,
                format!("unexpected `include` entry {other}"),
            )),
        }
    }
}

impl ModelRef {
    /// Name of the referenced model.
    pub fn name(&self) -> &str {
        match self {
            ModelRef::Name(name) => name,
            ModelRef::Handle(handle) => handle.name(),
        }
    }

    pub fn as_handle(&self) -> Option<&Arc<dyn SchemaHandle>> {
        match self {
            ModelRef::Handle(handle) => Some(handle),
            ModelRef::Name(_) => None,
        }
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ModelRef::Name(a), ModelRef::Name(b)) => a == b,
            (ModelRef::Handle(a), ModelRef::Handle(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelRef::Name(name) => write!(fmt, "Name({name:?})"),
            ModelRef::Handle(handle) => write!(fmt, "Handle({:?})", handle.name()),
        }
    }
}
