use super::{FieldDef, Function};

use serde_json::Value;

/// One member of a model declaration, before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// Typed field declaration
    Field(FieldDef),

    /// Plain data. Consumed by `index` and `scope`; otherwise parsed into a
    /// field declaration.
    Value(Value),

    /// Method called on an instance
    Method(Function),

    /// Method called on the model itself
    ClassMethod(Function),

    /// Getter and/or setter pair
    Accessor {
        get: Option<Function>,
        set: Option<Function>,
    },
}

/// Where a member lives once the model is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Per-instance data: fields and plain values
    Data,

    /// Shared by every instance: methods and accessors
    Instance,

    /// On the model itself: class methods
    Static,
}

/// Members of a declaration in declaration order.
///
/// Data, instance callables and class methods each have their own
/// namespace, so a field, a method and a class method may share a name.
/// Redeclaring a name within a namespace replaces the earlier member in
/// place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Members {
    entries: Vec<(String, Member)>,
}

impl Member {
    pub fn namespace(&self) -> Namespace {
        match self {
            Member::Field(_) | Member::Value(_) => Namespace::Data,
            Member::Method(_) | Member::Accessor { .. } => Namespace::Instance,
            Member::ClassMethod(_) => Namespace::Static,
        }
    }

    pub fn is_static(&self) -> bool {
        self.namespace() == Namespace::Static
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Member::Method(_) | Member::ClassMethod(_))
    }

    pub fn function(&self) -> Option<&Function> {
        match self {
            Member::Method(f) | Member::ClassMethod(f) => Some(f),
            _ => None,
        }
    }

    /// Human readable kind, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Member::Field(_) => "field",
            Member::Value(_) => "value",
            Member::Method(_) => "method",
            Member::ClassMethod(_) => "class method",
            Member::Accessor { .. } => "accessor",
        }
    }
}

impl Members {
    pub fn new() -> Members {
        Members::default()
    }

    /// Inserts a member and returns its position.
    pub fn insert(&mut self, name: impl Into<String>, member: Member) -> usize {
        let name = name.into();

        match self.position(&name, member.namespace()) {
            Some(position) => {
                self.entries[position].1 = member;
                position
            }
            None => {
                self.entries.push((name, member));
                self.entries.len() - 1
            }
        }
    }

    /// Position of a member by name within a namespace.
    pub fn position(&self, name: &str, namespace: Namespace) -> Option<usize> {
        self.entries
            .iter()
            .position(|(n, m)| n == name && m.namespace() == namespace)
    }

    pub fn get(&self, position: usize) -> Option<(&str, &Member)> {
        self.entries
            .get(position)
            .map(|(name, member)| (name.as_str(), member))
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut Member> {
        self.entries.get_mut(position).map(|(_, member)| member)
    }

    /// Removes the member at `position` from the declaration surface.
    pub fn take(&mut self, position: usize) -> Option<(String, Member)> {
        (position < self.entries.len()).then(|| self.entries.remove(position))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.entries
            .iter()
            .map(|(name, member)| (name.as_str(), member))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
