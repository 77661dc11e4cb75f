use crate::{declaration::Link, err, Declaration, Model, Result};

use tessel_core::schema::{classify, merge_extensions, Snapshot};

/// One instantiation of a model.
///
/// Holds the declaration produced by [`Model::declare`] until options are
/// generated, then the resulting [`Snapshot`]. Generation happens at most
/// once; later calls return the cached snapshot.
#[derive(Debug)]
pub struct Definition {
    name: &'static str,
    declaration: Option<Declaration>,
    snapshot: Option<Snapshot>,
}

impl Definition {
    /// Instantiate `M`, running its declaration against fresh state.
    pub fn new<M: Model>() -> Result<Definition> {
        Definition::with_chain::<M>(vec![])
    }

    pub(crate) fn with_chain<M: Model>(chain: Vec<Link>) -> Result<Definition> {
        let mut declaration = Declaration::new::<M>(chain);

        M::declare(&mut declaration)
            .map_err(|err| err.context(format!("declaring model `{}`", M::NAME)))?;

        Ok(Definition {
            name: M::NAME,
            declaration: Some(declaration),
            snapshot: None,
        })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Classify the declared members, fold in the annotation metadata and
    /// merge extensions. Idempotent.
    pub fn generate_options(&mut self) -> Result<&Snapshot> {
        match self.snapshot {
            Some(ref snapshot) => Ok(snapshot),
            None => {
                let snapshot = self.build()?;
                Ok(self.snapshot.insert(snapshot))
            }
        }
    }

    /// The generated snapshot, if options have been generated.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_generated(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Generate options if needed and take the snapshot.
    pub fn into_snapshot(mut self) -> Result<Snapshot> {
        self.generate_options()?;
        self.snapshot
            .take()
            .ok_or_else(|| err!("model `{}` has no generated options", self.name))
    }

    fn build(&mut self) -> Result<Snapshot> {
        let declaration = self
            .declaration
            .take()
            .ok_or_else(|| err!("declaration of `{}` was already consumed", self.name))?;

        let (members, annotations) = declaration.into_parts();

        let classified = classify(&members)
            .map_err(|err| err.context(format!("generating options for `{}`", self.name)))?;

        let mut snapshot = Snapshot::assemble(self.name, classified, annotations);
        merge_extensions(&mut snapshot);

        log::debug!(
            "generated options for `{}`: {} field(s), {} hook(s), {} scope(s)",
            snapshot.name,
            snapshot.fields.len(),
            snapshot.hooks.len(),
            snapshot.scopes.len()
        );

        Ok(snapshot)
    }
}
