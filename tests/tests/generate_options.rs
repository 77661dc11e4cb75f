//! Option generation: classification of declared members and the metadata
//! recorded by annotations.

use tessel::prelude::*;
use tessel::{schema::FieldDef, Definition};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

struct User;

impl Model for User {
    const NAME: &'static str = "User";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.field("name", DataType::String(None));
        model.value("email", json!({ "type": "STRING", "validate": { "isEmail": true } }));
        model.value("_secret", "TEXT");

        model.getter("_name", |this| {
            Ok(this.get("name").cloned().unwrap_or(Value::Null))
        });
        model.setter("_name", |this, value| {
            let lower = value.as_str().map(str::to_lowercase).unwrap_or_default();
            this.set("name", lower);
            Ok(())
        });
        model.getter("display", |this| {
            Ok(json!(format!("<{}>", this.get("name").and_then(Value::as_str).unwrap_or(""))))
        });

        model.method("greet", |this, _| {
            Ok(json!(format!("hello {}", this.get("name").and_then(Value::as_str).unwrap_or(""))))
        });
        model.method("constructor", |_, _| Ok(Value::Null));
        model.method("nameIsSet", |this, _| Ok(json!(this.contains("name")))).validate()?;

        model.class_method("findByName", |_, _| Ok(Value::Null));
        model
            .class_method("lowercase", |_, _| Ok(Value::Null))
            .before_create()?;

        model
            .value("byEmail", json!({ "fields": ["email"], "unique": true }))
            .index(IndexOptions::default())?;
        model
            .value("byName", json!({ "fields": ["name"] }))
            .index(IndexOptions::no_name())?;

        model
            .value("defaultScope", json!({ "where": { "active": true } }))
            .scope()?;
        model
            .value("withPosts", json!({ "include": ["Post"] }))
            .scope()?;

        model.has_many("Post", json!({ "as": "posts" }))?;
        model.paranoid(true).schema("app");

        Ok(())
    }
}

fn snapshot() -> tessel::schema::Snapshot {
    Definition::new::<User>().unwrap().into_snapshot().unwrap()
}

#[test]
fn generate_options_is_idempotent() {
    let mut definition = Definition::new::<User>().unwrap();

    let first = definition.generate_options().unwrap().clone();
    let second = definition.generate_options().unwrap();

    assert_eq!(&first, second);
}

#[test]
fn field_map_keeps_declaration_order() {
    let snapshot = snapshot();

    assert_eq!(snapshot.fields.keys().collect::<Vec<_>>(), ["name", "email"]);
    assert!(snapshot.field("_secret").is_none());

    let email = snapshot.field("email").and_then(FieldDef::as_spec).unwrap();
    assert_eq!(email.ty, DataType::String(None));
    assert_eq!(email.validate, Some(json!({ "isEmail": true })));
}

#[test]
fn underscore_accessor_merges_into_field() {
    let snapshot = snapshot();

    let name = snapshot.field("name").unwrap();
    assert_eq!(name.ty(), &DataType::String(None));
    assert!(name.getter().is_some());
    assert!(name.setter().is_some());

    assert!(!snapshot.getters.contains_key("_name"));
    assert!(!snapshot.setters.contains_key("_name"));
    assert!(!snapshot.getters.contains_key("name"));

    let mut record = Record::new();
    name.setter()
        .unwrap()
        .call(&mut record, &[json!("ALICE")])
        .unwrap();
    assert_eq!(record.get("name"), Some(&json!("alice")));
    assert_eq!(name.getter().unwrap().call(&mut record, &[]).unwrap(), json!("alice"));
}

#[test]
fn unmatched_accessor_goes_to_getters() {
    let snapshot = snapshot();
    assert_eq!(snapshot.getters.keys().collect::<Vec<_>>(), ["display"]);
    assert!(snapshot.setters.is_empty());
}

#[test]
fn methods_are_partitioned() {
    let snapshot = snapshot();

    assert_eq!(snapshot.instance_methods.keys().collect::<Vec<_>>(), ["greet"]);
    assert_eq!(snapshot.class_methods.keys().collect::<Vec<_>>(), ["findByName"]);
}

#[test]
fn validate_moves_method_to_validators() {
    let snapshot = snapshot();

    assert!(snapshot.validators.contains_key("nameIsSet"));
    assert!(!snapshot.instance_methods.contains_key("nameIsSet"));
}

#[test]
fn static_hook_moves_to_hooks() {
    let snapshot = snapshot();

    let hook = &snapshot.hooks["lowercase"];
    assert_eq!(hook.actions, [HookAction::BeforeCreate]);
    assert!(!snapshot.class_methods.contains_key("lowercase"));
}

#[test]
fn index_names() {
    let snapshot = snapshot();

    assert_eq!(snapshot.indexes.len(), 2);
    assert_eq!(snapshot.indexes[0].name.as_deref(), Some("byEmail"));
    assert_eq!(
        snapshot.indexes[0].to_value(),
        json!({ "fields": ["email"], "unique": true, "name": "byEmail" })
    );
    assert_eq!(snapshot.indexes[1].name, None);
    assert_eq!(snapshot.indexes[1].to_value(), json!({ "fields": ["name"] }));
}

#[test]
fn scopes_and_options() {
    let snapshot = snapshot();

    let default_scope = snapshot.default_scope.as_ref().unwrap();
    assert_eq!(default_scope.query.get("where"), Some(&json!({ "active": true })));
    assert_eq!(snapshot.scopes.keys().collect::<Vec<_>>(), ["withPosts"]);
    assert!(snapshot.has_unresolved_includes());

    assert_eq!(snapshot.relationships.len(), 1);
    assert_eq!(snapshot.options.get("paranoid"), Some(&json!(true)));
    assert_eq!(snapshot.options.get("schema"), Some(&json!("app")));
}

struct Invalid;

impl Model for Invalid {
    const NAME: &'static str = "Invalid";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.field("title", DataType::Text).validate()?;
        Ok(())
    }
}

#[test]
fn annotation_on_field_fails_declaration() {
    let err = Definition::new::<Invalid>().unwrap_err();

    assert!(err.root().is_invalid_annotation_target());
    assert_eq!(
        err.to_string(),
        "declaring model `Invalid`: invalid annotation target: `validate` cannot be applied to field `Invalid.title`"
    );
}

struct BadType;

impl Model for BadType {
    const NAME: &'static str = "BadType";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.value("size", "HUGEINT");
        Ok(())
    }
}

#[test]
fn unknown_type_name_fails_generation() {
    let mut definition = Definition::new::<BadType>().unwrap();
    let err = definition.generate_options().unwrap_err();

    assert!(err.root().is_invalid_field_type());
    assert!(!definition.is_generated());
}
