use super::Record;
use crate::Result;

use serde_json::Value;
use std::{fmt, sync::Arc};

type Callable = dyn Fn(&mut Record, &[Value]) -> Result<Value> + Send + Sync;

/// A callable attached to a model: instance or class method, accessor,
/// validator or hook.
///
/// The first argument is the record the call operates on (the instance for
/// methods, accessors and validators, the affected record for hooks). Getters
/// take no arguments, setters take the new value. Two functions are equal when
/// they share the same underlying closure.
#[derive(Clone)]
pub struct Function {
    callable: Arc<Callable>,
}

impl Function {
    pub fn new<F>(f: F) -> Function
    where
        F: Fn(&mut Record, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Function {
            callable: Arc::new(f),
        }
    }

    pub fn call(&self, this: &mut Record, args: &[Value]) -> Result<Value> {
        (self.callable)(this, args)
    }

    /// Wraps the function so that it also accepts a batch.
    ///
    /// When the first argument is an array, the inner function runs once per
    /// element and the results are collected into an array. Object elements
    /// are passed as the record being operated on and come back updated;
    /// other elements are passed as the first argument and their return value
    /// is collected. Any other call is forwarded unchanged.
    pub fn bulkify(&self) -> Function {
        let inner = self.clone();

        Function::new(move |this, args| {
            let Some((Value::Array(items), rest)) = args.split_first() else {
                return inner.call(this, args);
            };

            let mut out = Vec::with_capacity(items.len());

            for item in items {
                match Record::from_value(item.clone()) {
                    Some(mut record) => {
                        inner.call(&mut record, rest)?;
                        out.push(record.into_value());
                    }
                    None => {
                        let mut item_args = Vec::with_capacity(args.len());
                        item_args.push(item.clone());
                        item_args.extend_from_slice(rest);
                        out.push(inner.call(this, &item_args)?);
                    }
                }
            }

            Ok(Value::Array(out))
        })
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callable, &other.callable)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Function({:p})", Arc::as_ptr(&self.callable) as *const ())
    }
}
