use super::{field_name, is_internal, FieldDef, Function, Member, Members};
use crate::Result;

use indexmap::IndexMap;

/// Callable names that are never captured as methods.
const IGNORE: &[&str] = &[
    "constructor",
    "Model",
    "length",
    "name",
    "arguments",
    "caller",
    "prototype",
];

/// Members partitioned into the buckets the engine's define call expects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    pub fields: IndexMap<String, FieldDef>,
    pub instance_methods: IndexMap<String, Function>,
    pub class_methods: IndexMap<String, Function>,
    pub getters: IndexMap<String, Function>,
    pub setters: IndexMap<String, Function>,
}

/// Partitions a declaration's members.
///
/// The field map is seeded from data members first, skipping internal
/// (`_`-prefixed) names. Class methods are scanned before instance members;
/// both scans keep declaration order. An accessor named `_x` where `x` is a
/// field is folded into that field's `get`/`set` instead of the getter and
/// setter buckets.
pub fn classify(members: &Members) -> Result<Classified> {
    let mut classified = Classified::default();

    for (name, member) in members.iter() {
        if is_internal(name) {
            continue;
        }

        let def = match member {
            Member::Field(def) => def.clone(),
            Member::Value(value) => {
                FieldDef::from_json(value).map_err(|err| err.context(format!("field `{name}`")))?
            }
            _ => continue,
        };

        classified.fields.insert(name.to_string(), def);
    }

    for (name, member) in members.iter().filter(|(_, m)| m.is_static()) {
        if IGNORE.contains(&name) {
            continue;
        }

        if let Member::ClassMethod(function) = member {
            classified
                .class_methods
                .insert(name.to_string(), function.clone());
        }
    }

    for (name, member) in members.iter().filter(|(_, m)| !m.is_static()) {
        if IGNORE.contains(&name) {
            continue;
        }

        match member {
            Member::Method(function) => {
                classified
                    .instance_methods
                    .insert(name.to_string(), function.clone());
            }
            Member::Accessor { get, set } => {
                classified.accessor(name, get.as_ref(), set.as_ref());
            }
            _ => {}
        }
    }

    Ok(classified)
}

impl Classified {
    fn accessor(&mut self, name: &str, get: Option<&Function>, set: Option<&Function>) {
        if get.is_none() && set.is_none() {
            return;
        }

        if is_internal(name) {
            if let Some(field) = self.fields.get_mut(field_name(name)) {
                field.attach_accessors(get, set);
                return;
            }
        }

        if let Some(get) = get {
            self.getters.insert(name.to_string(), get.clone());
        }

        if let Some(set) = set {
            self.setters.insert(name.to_string(), set.clone());
        }
    }
}
