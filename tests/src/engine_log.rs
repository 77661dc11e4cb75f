use crate::EngineOp;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};
use tessel_core::{
    engine::DefineOptions,
    schema::{FieldDef, HookAction, RelationKind, Scope},
};

/// A wrapper around the operations log that provides a clean API for tests
#[derive(Debug, Clone)]
pub struct EngineLog {
    ops: Arc<Mutex<Vec<EngineOp>>>,
}

impl EngineLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<EngineOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Check if any operation matches the given predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&EngineOp) -> bool,
    {
        self.ops.lock().unwrap().iter().any(predicate)
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&EngineOp) -> bool,
    {
        self.ops.lock().unwrap().iter().filter(|op| predicate(op)).count()
    }

    /// Names passed to `define`, in call order
    pub fn defined(&self) -> Vec<String> {
        self.with_ops(|ops| {
            ops.iter()
                .filter_map(|op| match op {
                    EngineOp::Define { name, .. } => Some(name.clone()),
                    _ => None,
                })
                .collect()
        })
    }

    /// Fields and options of the last `define` call for `model`
    pub fn definition(&self, model: &str) -> Option<(IndexMap<String, FieldDef>, DefineOptions)> {
        self.with_ops(|ops| {
            ops.iter().rev().find_map(|op| match op {
                EngineOp::Define {
                    name,
                    fields,
                    options,
                } if name == model => Some((fields.clone(), options.clone())),
                _ => None,
            })
        })
    }

    /// `(action, hook name)` pairs attached to `model`
    pub fn hooks(&self, model: &str) -> Vec<(HookAction, String)> {
        self.with_ops(|ops| {
            ops.iter()
                .filter_map(|op| match op {
                    EngineOp::AddHook {
                        model: m,
                        action,
                        name,
                        ..
                    } if m == model => Some((*action, name.clone())),
                    _ => None,
                })
                .collect()
        })
    }

    /// `(scope name, scope, override)` registered on `model` after definition
    pub fn scopes(&self, model: &str) -> Vec<(String, Scope, bool)> {
        self.with_ops(|ops| {
            ops.iter()
                .filter_map(|op| match op {
                    EngineOp::AddScope {
                        model: m,
                        name,
                        scope,
                        override_existing,
                    } if m == model => Some((name.clone(), scope.clone(), *override_existing)),
                    _ => None,
                })
                .collect()
        })
    }

    /// `(kind, target name, options)` associations declared from `model`
    pub fn associations(&self, model: &str) -> Vec<(RelationKind, String, Map<String, Value>)> {
        self.with_ops(|ops| {
            ops.iter()
                .filter_map(|op| match op {
                    EngineOp::Associate {
                        model: m,
                        kind,
                        target,
                        options,
                    } if m == model => Some((*kind, target.name().to_string(), options.clone())),
                    _ => None,
                })
                .collect()
        })
    }

    /// Clear the log
    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first operation from the log
    pub fn pop(&mut self) -> Option<EngineOp> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            Some(ops.remove(0))
        }
    }

    /// Get access to all operations for custom assertions
    pub fn with_ops<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[EngineOp]) -> R,
    {
        let ops = self.ops.lock().unwrap();
        f(&ops)
    }
}
