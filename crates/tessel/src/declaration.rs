use crate::{err, Definition, Error, Model, Result};

use serde_json::{Map, Value};
use std::any::TypeId;
use tessel_core::schema::{
    Annotations, FieldDef, Function, Hook, HookAction, Index, IndexOptions, Member, Members, Namespace,
    Record, RelationKind, Relationship, Scope, DEFAULT_SCOPE,
};

/// A model on the chain of declarations currently being built. Used to
/// detect extension cycles.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Link {
    id: TypeId,
    name: &'static str,
}

/// Collects a model's members and annotation metadata while its
/// [`Model::declare`] runs.
///
/// Each instantiation gets its own declaration; the collected state is
/// moved into the model's snapshot when options are generated.
#[derive(Debug)]
pub struct Declaration {
    name: &'static str,
    id: TypeId,

    /// Declarations that are extending this one, outermost first
    chain: Vec<Link>,

    members: Members,
    annotations: Annotations,
}

/// A freshly declared member, ready to be annotated.
///
/// Annotations that capture the member (`validate`, hooks, `index`,
/// `scope`) remove it from the declaration, so it never shows up as a
/// field or method.
#[derive(Debug)]
pub struct MemberMut<'a> {
    declaration: &'a mut Declaration,
    position: usize,
}

impl Declaration {
    pub(crate) fn new<M: Model>(chain: Vec<Link>) -> Declaration {
        Declaration {
            name: M::NAME,
            id: TypeId::of::<M>(),
            chain,
            members: Members::new(),
            annotations: Annotations::default(),
        }
    }

    /// Name of the model being declared.
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Declare a typed field.
    pub fn field(&mut self, name: impl Into<String>, def: impl Into<FieldDef>) -> MemberMut<'_> {
        self.insert(name, Member::Field(def.into()))
    }

    /// Declare a plain value. Left unannotated, it is parsed into a field
    /// declaration (`"STRING"`, `{ "type": "TEXT", .. }`) when options are
    /// generated.
    pub fn value(&mut self, name: impl Into<String>, value: impl Into<Value>) -> MemberMut<'_> {
        self.insert(name, Member::Value(value.into()))
    }

    /// Declare an instance method.
    pub fn method<F>(&mut self, name: impl Into<String>, f: F) -> MemberMut<'_>
    where
        F: Fn(&mut Record, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert(name, Member::Method(Function::new(f)))
    }

    /// Declare a class (static) method.
    pub fn class_method<F>(&mut self, name: impl Into<String>, f: F) -> MemberMut<'_>
    where
        F: Fn(&mut Record, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert(name, Member::ClassMethod(Function::new(f)))
    }

    /// Declare a getter. A getter named `_x` augments field `x`.
    pub fn getter<F>(&mut self, name: impl Into<String>, f: F) -> MemberMut<'_>
    where
        F: Fn(&Record) -> Result<Value> + Send + Sync + 'static,
    {
        let get = Function::new(move |this, _| f(this));
        self.accessor(name.into(), Some(get), None)
    }

    /// Declare a setter. A setter named `_x` augments field `x`.
    pub fn setter<F>(&mut self, name: impl Into<String>, f: F) -> MemberMut<'_>
    where
        F: Fn(&mut Record, Value) -> Result<()> + Send + Sync + 'static,
    {
        let set = Function::new(move |this, args| {
            f(this, args.first().cloned().unwrap_or(Value::Null))?;
            Ok(Value::Null)
        });
        self.accessor(name.into(), None, Some(set))
    }

    /// Declare a relationship by kind name (`belongsTo`, `hasOne`,
    /// `hasMany`, `belongsToMany`).
    pub fn relationship(&mut self, kind: &str, target: &str, options: Value) -> Result<&mut Self> {
        let kind = kind.parse::<RelationKind>()?;
        self.relate(kind, target, options)
    }

    pub fn belongs_to(&mut self, target: &str, options: Value) -> Result<&mut Self> {
        self.relate(RelationKind::BelongsTo, target, options)
    }

    pub fn has_one(&mut self, target: &str, options: Value) -> Result<&mut Self> {
        self.relate(RelationKind::HasOne, target, options)
    }

    pub fn has_many(&mut self, target: &str, options: Value) -> Result<&mut Self> {
        self.relate(RelationKind::HasMany, target, options)
    }

    pub fn belongs_to_many(&mut self, target: &str, options: Value) -> Result<&mut Self> {
        self.relate(RelationKind::BelongsToMany, target, options)
    }

    /// Merge another model's declarations into this one.
    ///
    /// `E` is declared and its options generated right away. Members declared
    /// by this model win over the extension's on conflict.
    pub fn extend<E: Model>(&mut self) -> Result<&mut Self> {
        let id = TypeId::of::<E>();

        if self.id == id || self.chain.iter().any(|link| link.id == id) {
            let path = self
                .chain
                .iter()
                .map(|link| link.name)
                .chain([self.name, E::NAME]);
            return Err(Error::extension_cycle_detected(path));
        }

        log::debug!("`{}` extends `{}`", self.name, E::NAME);

        let mut chain = self.chain.clone();
        chain.push(Link {
            id: self.id,
            name: self.name,
        });

        let snapshot = Definition::with_chain::<E>(chain)?.into_snapshot()?;
        self.annotations.extensions.push(snapshot);

        Ok(self)
    }

    /// Free-form option passed through to the engine's define call.
    pub fn option(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.annotations.options.insert(key.into(), value.into());
        self
    }

    /// Database schema (namespace) the table lives in.
    pub fn schema(&mut self, name: &str) -> &mut Self {
        self.option("schema", name)
    }

    /// Soft deletes: rows are marked deleted instead of removed.
    pub fn paranoid(&mut self, paranoid: bool) -> &mut Self {
        self.option("paranoid", paranoid)
    }

    pub fn table_name(&mut self, name: &str) -> &mut Self {
        self.option("tableName", name)
    }

    pub fn timestamps(&mut self, timestamps: bool) -> &mut Self {
        self.option("timestamps", timestamps)
    }

    pub(crate) fn into_parts(self) -> (Members, Annotations) {
        (self.members, self.annotations)
    }

    fn insert(&mut self, name: impl Into<String>, member: Member) -> MemberMut<'_> {
        let position = self.members.insert(name, member);
        MemberMut {
            declaration: self,
            position,
        }
    }

    /// Getters and setters of the same name form one accessor.
    fn accessor(
        &mut self,
        name: String,
        get: Option<Function>,
        set: Option<Function>,
    ) -> MemberMut<'_> {
        if let Some(position) = self.members.position(&name, Namespace::Instance) {
            if let Some(Member::Accessor {
                get: existing_get,
                set: existing_set,
            }) = self.members.get_mut(position)
            {
                if get.is_some() {
                    *existing_get = get;
                }
                if set.is_some() {
                    *existing_set = set;
                }
                return MemberMut {
                    declaration: self,
                    position,
                };
            }
        }

        self.insert(name, Member::Accessor { get, set })
    }

    fn relate(&mut self, kind: RelationKind, target: &str, options: Value) -> Result<&mut Self> {
        let options = match options {
            Value::Object(options) => options,
            Value::Null => Map::new(),
            other => {
                return Err(err!(
                    "options for {kind} `{}` -> `{target}` must be a record, found {other}",
                    self.name
                ))
            }
        };

        self.annotations
            .relationships
            .push(Relationship::new(kind, target, options));

        Ok(self)
    }
}

impl MemberMut<'_> {
    /// Name of the member.
    pub fn name(&self) -> &str {
        self.declaration
            .members
            .get(self.position)
            .map(|(name, _)| name)
            .unwrap_or_default()
    }

    /// Register the member as a validator. The member must be a method.
    pub fn validate(mut self) -> Result<()> {
        let (name, function) = self.take_callable("validate")?;
        self.declaration.annotations.validators.insert(name, function);
        Ok(())
    }

    /// Register the member as a hook for `action`. The member must be a
    /// method.
    pub fn hook(self, action: HookAction) -> Result<()> {
        self.hooks([action])
    }

    /// Register the member as a hook for several actions at once.
    pub fn hooks(mut self, actions: impl IntoIterator<Item = HookAction>) -> Result<()> {
        let (name, function) = self.take_callable("hook")?;

        let hook = Hook {
            actions: actions.into_iter().collect(),
            function,
        };

        log::trace!("`{}.{name}` hooks {:?}", self.declaration.name, hook.actions);
        self.declaration.annotations.hooks.insert(name, hook);
        Ok(())
    }

    /// Make the method accept a batch as well as a single record. The member
    /// stays declared and can be annotated further.
    pub fn bulkify(mut self) -> Result<Self> {
        let (name, member) = self.member()?;

        let bulkified = match member {
            Member::Method(f) => Member::Method(f.bulkify()),
            Member::ClassMethod(f) => Member::ClassMethod(f.bulkify()),
            other => {
                return Err(Error::invalid_annotation_target(
                    self.declaration.name,
                    name,
                    "bulkify",
                    other.describe(),
                ))
            }
        };

        if let Some(member) = self.declaration.members.get_mut(self.position) {
            *member = bulkified;
        }

        Ok(self)
    }

    /// Register the member's value as an index definition. The index is
    /// named after the member unless `options.no_name` is set.
    pub fn index(mut self, options: IndexOptions) -> Result<()> {
        let (name, member) = self.member()?;

        let Member::Value(Value::Object(spec)) = member else {
            return Err(Error::invalid_annotation_target(
                self.declaration.name,
                name,
                "index",
                member.describe(),
            ));
        };

        let index = Index::new((!options.no_name).then(|| name.clone()), spec.clone());

        self.declaration.members.take(self.position);
        self.declaration.annotations.indexes.push(index);
        Ok(())
    }

    /// Register the member's value as a named scope, or as the default
    /// scope when the member is called `defaultScope`.
    pub fn scope(mut self) -> Result<()> {
        let (name, member) = self.member()?;

        let scope = match member {
            Member::Value(value) => Scope::parse(&name, value)?,
            other => {
                return Err(Error::invalid_scope_shape(
                    name,
                    format!("expected a record, found {}", other.describe()),
                ))
            }
        };

        self.declaration.members.take(self.position);

        if name == DEFAULT_SCOPE || name == "default_scope" {
            self.declaration.annotations.default_scope = Some(scope);
        } else {
            self.declaration.annotations.scopes.insert(name, scope);
        }

        Ok(())
    }

    fn member(&self) -> Result<(String, &Member)> {
        self.declaration
            .members
            .get(self.position)
            .map(|(name, member)| (name.to_string(), member))
            .ok_or_else(|| err!("member of `{}` is no longer declared", self.declaration.name))
    }

    /// Removes a callable member from the declaration and returns it.
    fn take_callable(&mut self, annotation: &str) -> Result<(String, Function)> {
        let (name, member) = self.member()?;

        let Some(function) = member.function().cloned() else {
            return Err(Error::invalid_annotation_target(
                self.declaration.name,
                name,
                annotation,
                member.describe(),
            ));
        };

        self.declaration.members.take(self.position);
        Ok((name, function))
    }
}

macro_rules! hook_shortcuts {
    ( $( $method:ident => $action:ident, )* ) => {
        impl MemberMut<'_> {
            $(
                #[doc = concat!("Register the member as a `", stringify!($action), "` hook.")]
                pub fn $method(self) -> Result<()> {
                    self.hook(HookAction::$action)
                }
            )*
        }
    };
}

hook_shortcuts! {
    before_validate => BeforeValidate,
    after_validate => AfterValidate,
    validation_failed => ValidationFailed,
    before_create => BeforeCreate,
    after_create => AfterCreate,
    before_destroy => BeforeDestroy,
    after_destroy => AfterDestroy,
    before_restore => BeforeRestore,
    after_restore => AfterRestore,
    before_update => BeforeUpdate,
    after_update => AfterUpdate,
    before_save => BeforeSave,
    after_save => AfterSave,
    before_upsert => BeforeUpsert,
    after_upsert => AfterUpsert,
    before_bulk_create => BeforeBulkCreate,
    after_bulk_create => AfterBulkCreate,
    before_bulk_destroy => BeforeBulkDestroy,
    after_bulk_destroy => AfterBulkDestroy,
    before_bulk_restore => BeforeBulkRestore,
    after_bulk_restore => AfterBulkRestore,
    before_bulk_update => BeforeBulkUpdate,
    after_bulk_update => AfterBulkUpdate,
    before_find => BeforeFind,
    before_find_after_expand_include_all => BeforeFindAfterExpandIncludeAll,
    before_find_after_options => BeforeFindAfterOptions,
    after_find => AfterFind,
    before_count => BeforeCount,
    before_define => BeforeDefine,
    after_define => AfterDefine,
    before_init => BeforeInit,
    after_init => AfterInit,
    before_associate => BeforeAssociate,
    after_associate => AfterAssociate,
    before_connect => BeforeConnect,
    after_connect => AfterConnect,
    before_disconnect => BeforeDisconnect,
    after_disconnect => AfterDisconnect,
    before_sync => BeforeSync,
    after_sync => AfterSync,
    before_bulk_sync => BeforeBulkSync,
    after_bulk_sync => AfterBulkSync,
    before_query => BeforeQuery,
    after_query => AfterQuery,
}
