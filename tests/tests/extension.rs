//! Extending one model's declarations with another's.

use tessel::prelude::*;
use tessel::Definition;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

struct Timestamps;

impl Model for Timestamps {
    const NAME: &'static str = "Timestamps";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.value("createdAt", "DATE");
        model.value(
            "name",
            json!({ "type": "STRING", "validate": { "notEmpty": true }, "allowNull": true }),
        );
        model.method("touch", |this, _| {
            this.set("updatedAt", "now");
            Ok(Value::Null)
        });
        model.method("stamp", |_, _| Ok(Value::Null)).before_save()?;
        model
            .value("byCreatedAt", json!({ "fields": ["createdAt"] }))
            .index(IndexOptions::default())?;
        model
            .value("defaultScope", json!({ "order": [["createdAt", "DESC"]] }))
            .scope()?;
        model.belongs_to("Account", Value::Null)?;
        model.paranoid(true);
        Ok(())
    }
}

struct Audit;

impl Model for Audit {
    const NAME: &'static str = "Audit";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.value("why", "TEXT");
        model.value("createdAt", "DATEONLY");
        Ok(())
    }
}

struct Post;

impl Model for Post {
    const NAME: &'static str = "Post";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.extend::<Timestamps>()?.extend::<Audit>()?;

        model.value(
            "name",
            json!({ "type": "STRING(64)", "validate": { "len": [1, 64] } }),
        );
        model.value("type", "STRING");
        model
            .value("defaultScope", json!({ "where": { "published": true } }))
            .scope()?;
        Ok(())
    }
}

fn snapshot() -> tessel::schema::Snapshot {
    Definition::new::<Post>().unwrap().into_snapshot().unwrap()
}

#[test]
fn fields_are_merged_with_owner_first() {
    let snapshot = snapshot();

    assert_eq!(
        snapshot.fields.keys().collect::<Vec<_>>(),
        ["name", "type", "createdAt", "why"]
    );
}

#[test]
fn owner_wins_and_records_deep_merge() {
    let snapshot = snapshot();

    let name = snapshot.field("name").and_then(|f| f.as_spec()).unwrap();
    assert_eq!(name.ty, DataType::String(Some(64)));
    assert_eq!(
        name.validate,
        Some(json!({ "notEmpty": true, "len": [1, 64] }))
    );
    assert_eq!(name.options.get("allowNull"), Some(&json!(true)));
}

#[test]
fn later_extension_wins_over_earlier() {
    let snapshot = snapshot();
    assert_eq!(snapshot.field("createdAt").map(|f| f.ty()), Some(&DataType::DateOnly));
}

#[test]
fn methods_hooks_and_indexes_are_inherited() {
    let snapshot = snapshot();

    assert!(snapshot.instance_methods.contains_key("touch"));
    assert_eq!(snapshot.hooks["stamp"].actions, [HookAction::BeforeSave]);
    assert_eq!(snapshot.indexes.len(), 1);
    assert_eq!(snapshot.indexes[0].name.as_deref(), Some("byCreatedAt"));
}

#[test]
fn default_scopes_deep_merge() {
    let snapshot = snapshot();

    let scope = snapshot.default_scope.as_ref().unwrap();
    assert_eq!(scope.query.get("where"), Some(&json!({ "published": true })));
    assert_eq!(
        scope.query.get("order"),
        Some(&json!([["createdAt", "DESC"]]))
    );
}

#[test]
fn relationships_and_options_are_not_inherited() {
    let snapshot = snapshot();

    assert!(snapshot.relationships.is_empty());
    assert!(snapshot.options.is_empty());
    assert_eq!(snapshot.extensions.len(), 2);
    assert_eq!(snapshot.extensions[0].relationships.len(), 1);
}

#[test]
fn extensions_are_not_mutated() {
    let snapshot = snapshot();

    let timestamps = &snapshot.extensions[0];
    assert_eq!(timestamps.name, "Timestamps");
    assert_eq!(
        timestamps.field("name").and_then(|f| f.as_spec()).map(|s| &s.ty),
        Some(&DataType::String(None))
    );
}

struct Left;
struct Right;

impl Model for Left {
    const NAME: &'static str = "Left";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.extend::<Right>()?;
        Ok(())
    }
}

impl Model for Right {
    const NAME: &'static str = "Right";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.extend::<Left>()?;
        Ok(())
    }
}

#[test]
fn extension_cycle_is_detected() {
    let err = Definition::new::<Left>().unwrap_err();

    assert!(err.root().is_extension_cycle_detected());
    assert!(err
        .to_string()
        .ends_with("extension cycle detected: Left -> Right -> Left"));
}

struct Narcissus;

impl Model for Narcissus {
    const NAME: &'static str = "Narcissus";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.extend::<Narcissus>()?;
        Ok(())
    }
}

#[test]
fn self_extension_is_a_cycle() {
    let err = Definition::new::<Narcissus>().unwrap_err();

    assert!(err.root().is_extension_cycle_detected());
    assert!(err.to_string().ends_with("Narcissus -> Narcissus"));
}
