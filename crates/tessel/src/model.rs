use crate::{Declaration, Result};

/// A model declaration.
///
/// `declare` plays the part of a class body: it declares fields, methods
/// and accessors and applies annotations to them. It runs every time the
/// model is instantiated, against a fresh [`Declaration`], so no state is
/// shared between instantiations.
///
/// ```ignore
/// struct User;
///
/// impl Model for User {
///     const NAME: &'static str = "User";
///
///     fn declare(model: &mut Declaration) -> Result<()> {
///         model.field("name", DataType::String(None));
///         model.value("byName", json!({ "fields": ["name"] })).index(IndexOptions::default())?;
///         model.has_many("Post", json!({ "as": "posts" }))?;
///         Ok(())
///     }
/// }
/// ```
pub trait Model: 'static {
    /// Name the model is registered under.
    const NAME: &'static str;

    fn declare(model: &mut Declaration) -> Result<()>;
}
