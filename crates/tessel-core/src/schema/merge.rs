use super::{FieldDef, Index, Scope, Snapshot};

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Folds every registered extension into the owner's buckets.
///
/// Extensions apply in registration order, later ones overriding earlier
/// ones on colliding keys; the owner's own declarations override them all.
/// Relationships and free-form options are not taken from extensions.
pub fn merge_extensions(snapshot: &mut Snapshot) {
    if snapshot.extensions.is_empty() {
        return;
    }

    log::trace!(
        "merging {} extension(s) into `{}`",
        snapshot.extensions.len(),
        snapshot.name
    );

    let extensions = &snapshot.extensions;

    merge_bucket(
        &mut snapshot.fields,
        extensions.iter().map(|ext| &ext.fields),
        FieldDef::merge_from,
    );
    merge_bucket(
        &mut snapshot.validators,
        extensions.iter().map(|ext| &ext.validators),
        replace,
    );
    merge_bucket(
        &mut snapshot.class_methods,
        extensions.iter().map(|ext| &ext.class_methods),
        replace,
    );
    merge_bucket(
        &mut snapshot.instance_methods,
        extensions.iter().map(|ext| &ext.instance_methods),
        replace,
    );
    merge_bucket(
        &mut snapshot.hooks,
        extensions.iter().map(|ext| &ext.hooks),
        replace,
    );
    merge_bucket(
        &mut snapshot.getters,
        extensions.iter().map(|ext| &ext.getters),
        replace,
    );
    merge_bucket(
        &mut snapshot.setters,
        extensions.iter().map(|ext| &ext.setters),
        replace,
    );
    merge_bucket(
        &mut snapshot.scopes,
        extensions.iter().map(|ext| &ext.scopes),
        Scope::merge_from,
    );

    let mut default_scope: Option<Scope> = None;
    for scope in extensions
        .iter()
        .filter_map(|ext| ext.default_scope.as_ref())
        .chain(snapshot.default_scope.as_ref())
    {
        match &mut default_scope {
            Some(base) => base.merge_from(scope),
            None => default_scope = Some(scope.clone()),
        }
    }
    snapshot.default_scope = default_scope;

    merge_indexes(
        &mut snapshot.indexes,
        extensions.iter().map(|ext| &ext.indexes[..]),
    );
}

/// Merges a keyed bucket. The owner's keys keep their position; keys only
/// provided by extensions are appended in the order they first appear.
fn merge_bucket<'a, T, I>(owner: &mut IndexMap<String, T>, extensions: I, merge: fn(&mut T, &T))
where
    T: Clone + 'a,
    I: Iterator<Item = &'a IndexMap<String, T>>,
{
    let mut acc: IndexMap<String, T> = IndexMap::new();

    for bucket in extensions {
        for (key, value) in bucket {
            match acc.get_mut(key) {
                Some(base) => merge(base, value),
                None => {
                    acc.insert(key.clone(), value.clone());
                }
            }
        }
    }

    for (key, value) in owner.iter_mut() {
        if let Some(mut base) = acc.shift_remove(key) {
            merge(&mut base, value);
            *value = base;
        }
    }

    owner.extend(acc);
}

/// Named indexes collide by name; unnamed ones are always kept.
fn merge_indexes<'a, I>(owner: &mut Vec<Index>, extensions: I)
where
    I: Iterator<Item = &'a [Index]>,
{
    let mut acc: Vec<Index> = vec![];

    for indexes in extensions {
        for index in indexes {
            let existing = index
                .name
                .as_ref()
                .and_then(|name| acc.iter().position(|i| i.name.as_ref() == Some(name)));

            match existing {
                Some(position) => acc[position] = index.clone(),
                None => acc.push(index.clone()),
            }
        }
    }

    acc.retain(|index| match &index.name {
        Some(name) => !owner.iter().any(|i| i.name.as_ref() == Some(name)),
        None => true,
    });

    owner.extend(acc);
}

fn replace<T: Clone>(base: &mut T, winner: &T) {
    *base = winner.clone();
}

/// Deep-merges JSON: records merge key by key, anything else is replaced
/// by the winning value.
pub(crate) fn merge_value(base: &mut Value, winner: &Value) {
    match (base, winner) {
        (Value::Object(base), Value::Object(winner)) => merge_map(base, winner),
        (base, winner) => *base = winner.clone(),
    }
}

pub(crate) fn merge_map(base: &mut Map<String, Value>, winner: &Map<String, Value>) {
    for (key, value) in winner {
        match base.get_mut(key) {
            Some(existing) => merge_value(existing, value),
            None => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}
