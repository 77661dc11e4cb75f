//! Registering a snapshot with the engine and attaching its hooks.

use tests::*;

use tessel::engine::Capability;
use tessel::prelude::*;
use tessel::{register_model, Definition};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

struct User;

impl Model for User {
    const NAME: &'static str = "User";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.value("name", "STRING");
        model.value("email", "STRING");

        model
            .method("lowercaseEmail", |this, _| {
                let email = this
                    .get("email")
                    .and_then(Value::as_str)
                    .map(str::to_lowercase)
                    .unwrap_or_default();
                this.set("email", email);
                Ok(Value::Null)
            })
            .hooks([HookAction::BeforeCreate, HookAction::BeforeUpdate])?;

        model
            .class_method("stampAll", |this, _| {
                this.set("stamped", true);
                Ok(Value::Null)
            })
            .bulkify()?
            .before_bulk_create()?;

        model.method("nameIsSet", |this, _| Ok(json!(this.contains("name")))).validate()?;
        Ok(())
    }
}

#[test]
fn hooks_are_attached_per_action() {
    init_logging();

    let snapshot = Definition::new::<User>().unwrap().into_snapshot().unwrap();
    let mut engine = RecordingEngine::new();
    let log = engine.log();

    let handle = register_model(&snapshot, &mut engine).unwrap();

    assert_eq!(handle.name(), "User");
    assert_eq!(
        log.hooks("User"),
        [
            (HookAction::BeforeCreate, "lowercaseEmail".to_string()),
            (HookAction::BeforeUpdate, "lowercaseEmail".to_string()),
            (HookAction::BeforeBulkCreate, "stampAll".to_string()),
        ]
    );
}

#[test]
fn define_receives_every_bucket() {
    let engine = RecordingEngine::new();
    let log = engine.log();

    models!(User).build(engine).unwrap();

    let (fields, options) = log.definition("User").unwrap();
    assert_eq!(fields.keys().collect::<Vec<_>>(), ["name", "email"]);
    assert_eq!(options.validators.keys().collect::<Vec<_>>(), ["nameIsSet"]);
    assert!(options.instance_methods.is_empty());
    assert!(options.class_methods.is_empty());
}

#[test]
fn attached_hooks_run() {
    let engine = RecordingEngine::new();
    let log = engine.log();

    models!(User).build(engine).unwrap();

    let hook = log
        .with_ops(|ops| {
            ops.iter().find_map(|op| match op {
                EngineOp::AddHook { name, function, .. } if name == "lowercaseEmail" => {
                    Some(function.clone())
                }
                _ => None,
            })
        })
        .unwrap();

    let mut record = Record::new();
    record.set("email", "Alice@Example.COM");
    hook.call(&mut record, &[]).unwrap();
    assert_eq!(record.get("email"), Some(&json!("alice@example.com")));
}

#[test]
fn bulkified_hook_handles_batches() {
    let engine = RecordingEngine::new();
    let log = engine.log();

    models!(User).build(engine).unwrap();

    let hook = log
        .with_ops(|ops| {
            ops.iter().find_map(|op| match op {
                EngineOp::AddHook { name, function, .. } if name == "stampAll" => {
                    Some(function.clone())
                }
                _ => None,
            })
        })
        .unwrap();

    let out = hook
        .call(&mut Record::new(), &[json!([{ "name": "a" }, { "name": "b" }])])
        .unwrap();

    assert_eq!(
        out,
        json!([{ "name": "a", "stamped": true }, { "name": "b", "stamped": true }])
    );
}

#[test]
fn hooks_need_a_defined_model() {
    let engine = RecordingEngine::new().with_capability(Capability::PENDING);
    let log = engine.log();

    let err = models!(User).build(engine).unwrap_err();

    assert!(err.is_hooks_applied_before_registration());
    assert!(log.hooks("User").is_empty());
}

struct Plain;

impl Model for Plain {
    const NAME: &'static str = "Plain";

    fn declare(model: &mut Declaration) -> tessel::Result<()> {
        model.value("name", "STRING");
        Ok(())
    }
}

#[test]
fn models_without_hooks_ignore_capability() {
    let engine = RecordingEngine::new().with_capability(Capability::PENDING);
    let db = models!(Plain).build(engine).unwrap();
    assert!(db.get::<Plain>().is_some());
}
