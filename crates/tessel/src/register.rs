use crate::{Error, Result};

use std::sync::Arc;
use tessel_core::{engine::DefineOptions, Engine, SchemaHandle, Snapshot};

/// Define a model on the engine and attach its hooks.
///
/// The handle is returned, not cached; the caller decides where it lives.
pub fn register_model(snapshot: &Snapshot, engine: &mut dyn Engine) -> Result<Arc<dyn SchemaHandle>> {
    if engine.is_defined(&snapshot.name) {
        log::warn!("model `{}` is already defined; redefining", snapshot.name);
    }

    let handle = engine
        .define(&snapshot.name, &snapshot.fields, DefineOptions::from(snapshot))
        .map_err(|err| err.context(format!("defining model `{}`", snapshot.name)))?;

    if snapshot.hooks.is_empty() {
        return Ok(handle);
    }

    if !handle.capability().hooks {
        return Err(Error::hooks_applied_before_registration(&snapshot.name));
    }

    for (name, hook) in &snapshot.hooks {
        for &action in &hook.actions {
            log::trace!("`{}`: {action} hook `{name}`", snapshot.name);
            handle.add_hook(action, name, hook.function.clone())?;
        }
    }

    log::debug!(
        "registered model `{}` with {} hook(s)",
        snapshot.name,
        snapshot.hooks.len()
    );

    Ok(handle)
}
