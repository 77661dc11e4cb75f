use super::Error;

/// Error when a scope declaration is not a structured record, or its
/// `include` list is malformed.
#[derive(Debug)]
pub(super) struct InvalidScopeShape {
    scope: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidScopeShape {}

impl core::fmt::Display for InvalidScopeShape {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid scope `{}`: {}", self.scope, self.reason)
    }
}

impl Error {
    pub fn invalid_scope_shape(scope: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidScopeShape(InvalidScopeShape {
            scope: scope.into().into(),
            reason: reason.into().into(),
        }))
    }

    pub fn is_invalid_scope_shape(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidScopeShape(_))
    }
}
