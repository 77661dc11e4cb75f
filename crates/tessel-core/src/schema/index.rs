use serde_json::{Map, Value};

/// An index declaration. `spec` is passed to the engine untouched
/// (`fields`, `unique`, `using`, `where`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    /// Index name; defaults to the name of the annotated member
    pub name: Option<String>,

    pub spec: Map<String, Value>,
}

/// Options for the `index` annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Do not name the index after the annotated member
    pub no_name: bool,
}

impl Index {
    pub fn new(name: Option<String>, spec: Map<String, Value>) -> Index {
        Index { name, spec }
    }

    /// The record handed to the engine, with `name` injected when set.
    pub fn to_value(&self) -> Value {
        let mut spec = self.spec.clone();
        if let Some(name) = &self.name {
            spec.insert("name".to_string(), Value::String(name.clone()));
        }
        Value::Object(spec)
    }
}

impl IndexOptions {
    pub fn no_name() -> IndexOptions {
        IndexOptions { no_name: true }
    }
}
