pub mod db;
pub use db::Db;

mod declaration;
pub use declaration::{Declaration, MemberMut};

mod definition;
pub use definition::Definition;

mod model;
pub use model::Model;

mod register;
pub use register::register_model;

pub use tessel_core::{bail, engine, err, schema, Error, Result};

pub mod prelude {
    pub use crate::{
        engine::{Engine, SchemaHandle},
        schema::{DataType, FieldSpec, Function, HookAction, IndexOptions, Record},
        Declaration, Model,
    };
}
