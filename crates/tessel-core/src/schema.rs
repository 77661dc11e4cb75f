//! Declaration-level schema: the values a model declaration is made of and
//! the snapshot handed to the mapping engine.

mod annotations;
pub use annotations::Annotations;

mod classify;
pub use classify::{classify, Classified};

mod field;
pub use field::{FieldDef, FieldSpec};

mod function;
pub use function::Function;

mod hook;
pub use hook::{Hook, HookAction};

mod index;
pub use index::{Index, IndexOptions};

mod member;
pub use member::{Member, Members, Namespace};

mod merge;
pub use merge::merge_extensions;

mod record;
pub use record::Record;

mod relation;
pub use relation::{RelationKind, Relationship};

mod scope;
pub use scope::{Include, ModelRef, Scope};

mod snapshot;
pub use snapshot::Snapshot;

mod ty;
pub use ty::DataType;

/// Name of the distinguished default scope.
pub const DEFAULT_SCOPE: &str = "defaultScope";

/// Returns `true` for bookkeeping names, which start with an underscore.
pub fn is_internal(name: &str) -> bool {
    name.starts_with('_')
}

/// Strips one leading underscore, mapping an accessor name onto the field it
/// augments.
pub fn field_name(name: &str) -> &str {
    name.strip_prefix('_').unwrap_or(name)
}
