use super::Error;

/// Error reported by the external mapping engine.
#[derive(Debug)]
pub(super) struct EngineError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a failure reported by the mapping engine.
    ///
    /// Engine implementations use this to surface their own errors (connection
    /// failures, rejected definitions, constraint violations) unchanged.
    pub fn engine(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Engine(EngineError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error was reported by the mapping engine.
    pub fn is_engine(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Engine(_))
    }
}
