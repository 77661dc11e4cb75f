use super::Error;

/// Error when hooks are applied to a schema handle that cannot accept them.
///
/// Hooks can only be attached once the engine has defined the model and
/// returned a handle that supports hook registration.
#[derive(Debug)]
pub(super) struct HooksAppliedBeforeRegistration {
    model: Box<str>,
}

impl std::error::Error for HooksAppliedBeforeRegistration {}

impl core::fmt::Display for HooksAppliedBeforeRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "hooks applied before registration: the handle for model `{}` does not accept hooks",
            self.model
        )
    }
}

impl Error {
    pub fn hooks_applied_before_registration(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::HooksAppliedBeforeRegistration(
            HooksAppliedBeforeRegistration {
                model: model.into().into(),
            },
        ))
    }

    pub fn is_hooks_applied_before_registration(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::HooksAppliedBeforeRegistration(_)
        )
    }
}
