use super::Error;

/// Error when a relationship or a scope `include` names a model that was not
/// registered with the builder.
#[derive(Debug)]
pub(super) struct UnknownRelationTarget {
    model: Box<str>,
    target: Box<str>,
}

impl std::error::Error for UnknownRelationTarget {}

impl core::fmt::Display for UnknownRelationTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown relation target: model `{}` references `{}`, which is not registered",
            self.model, self.target
        )
    }
}

impl Error {
    pub fn unknown_relation_target(model: impl Into<String>, target: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownRelationTarget(
            UnknownRelationTarget {
                model: model.into().into(),
                target: target.into().into(),
            },
        ))
    }

    pub fn is_unknown_relation_target(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownRelationTarget(_))
    }
}
