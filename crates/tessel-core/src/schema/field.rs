use super::{merge::merge_value, DataType, Function};
use crate::{Error, Result};

use indexmap::IndexMap;
use serde_json::Value;

/// A field declaration: either a bare type or a full attribute record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDef {
    Type(DataType),
    Spec(FieldSpec),
}

/// Attribute record for a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub ty: DataType,

    /// Engine-side validation rules, passed through untouched
    pub validate: Option<Value>,

    /// Virtual getter merged in from an `_name` accessor
    pub get: Option<Function>,

    /// Virtual setter merged in from an `_name` accessor
    pub set: Option<Function>,

    /// Remaining attribute options (`allowNull`, `defaultValue`, `unique`, ...)
    pub options: IndexMap<String, Value>,
}

impl FieldDef {
    pub fn ty(&self) -> &DataType {
        match self {
            FieldDef::Type(ty) => ty,
            FieldDef::Spec(spec) => &spec.ty,
        }
    }

    pub fn as_spec(&self) -> Option<&FieldSpec> {
        match self {
            FieldDef::Spec(spec) => Some(spec),
            FieldDef::Type(_) => None,
        }
    }

    pub fn getter(&self) -> Option<&Function> {
        self.as_spec().and_then(|spec| spec.get.as_ref())
    }

    pub fn setter(&self) -> Option<&Function> {
        self.as_spec().and_then(|spec| spec.set.as_ref())
    }

    /// Coerces a bare type into an attribute record.
    pub fn into_spec(self) -> FieldSpec {
        match self {
            FieldDef::Type(ty) => FieldSpec::new(ty),
            FieldDef::Spec(spec) => spec,
        }
    }

    /// Parses a declared value: a type name (`"STRING"`) or a record with a
    /// `type` key and optional `validate` and attribute options.
    pub fn from_json(value: &Value) -> Result<FieldDef> {
        match value {
            Value::String(name) => Ok(FieldDef::Type(name.parse()?)),
            Value::Object(map) => {
                let ty = match map.get("type") {
                    Some(Value::String(name)) => name.parse()?,
                    Some(other) => {
                        return Err(Error::invalid_field_type(format!(
                            "`type` must be a type name, found {other}"
                        )))
                    }
                    None => return Err(Error::invalid_field_type("record is missing `type`")),
                };

                let mut spec = FieldSpec::new(ty);

                for (key, value) in map {
                    match key.as_str() {
                        "type" => {}
                        "validate" => spec.validate = Some(value.clone()),
                        _ => {
                            spec.options.insert(key.clone(), value.clone());
                        }
                    }
                }

                Ok(FieldDef::Spec(spec))
            }
            other => Err(Error::invalid_field_type(format!(
                "expected a type name or a `{{ type, .. }}` record, found {other}"
            ))),
        }
    }

    /// Attaches virtual accessors, coercing a bare type into a record first.
    pub(crate) fn attach_accessors(&mut self, get: Option<&Function>, set: Option<&Function>) {
        let def = std::mem::replace(self, FieldDef::Type(DataType::Virtual));
        let mut spec = def.into_spec();

        if let Some(get) = get {
            spec.get = Some(get.clone());
        }

        if let Some(set) = set {
            spec.set = Some(set.clone());
        }

        *self = FieldDef::Spec(spec);
    }

    /// Folds `winner` into `self`. Records merge key by key with `winner`
    /// taking precedence; a bare type on the winning side replaces the
    /// whole declaration.
    pub(crate) fn merge_from(&mut self, winner: &FieldDef) {
        if let (FieldDef::Spec(base), FieldDef::Spec(winner)) = (&mut *self, winner) {
            base.merge_from(winner);
            return;
        }

        *self = winner.clone();
    }
}

impl FieldSpec {
    pub fn new(ty: DataType) -> FieldSpec {
        FieldSpec {
            ty,
            validate: None,
            get: None,
            set: None,
            options: IndexMap::new(),
        }
    }

    pub fn with_validate(mut self, validate: Value) -> FieldSpec {
        self.validate = Some(validate);
        self
    }

    pub fn with_getter(mut self, get: Function) -> FieldSpec {
        self.get = Some(get);
        self
    }

    pub fn with_setter(mut self, set: Function) -> FieldSpec {
        self.set = Some(set);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> FieldSpec {
        self.options.insert(key.into(), value.into());
        self
    }

    fn merge_from(&mut self, winner: &FieldSpec) {
        self.ty = winner.ty.clone();

        match (&mut self.validate, &winner.validate) {
            (Some(base), Some(winner)) => merge_value(base, winner),
            (None, Some(winner)) => self.validate = Some(winner.clone()),
            _ => {}
        }

        if winner.get.is_some() {
            self.get = winner.get.clone();
        }

        if winner.set.is_some() {
            self.set = winner.set.clone();
        }

        for (key, value) in &winner.options {
            match self.options.get_mut(key) {
                Some(base) => merge_value(base, value),
                None => {
                    self.options.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

impl From<DataType> for FieldDef {
    fn from(value: DataType) -> Self {
        FieldDef::Type(value)
    }
}

impl From<FieldSpec> for FieldDef {
    fn from(value: FieldSpec) -> Self {
        FieldDef::Spec(value)
    }
}
