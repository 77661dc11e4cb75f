mod error;
pub use error::{Error, IntoError};

pub mod engine;
pub use engine::{Engine, SchemaHandle};

pub mod schema;
pub use schema::Snapshot;

/// A Result type alias that uses Tessel's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
