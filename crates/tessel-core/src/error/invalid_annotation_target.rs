use super::Error;

/// Error when an annotation is applied to a member of the wrong kind.
///
/// This occurs when:
/// - `validate` or a hook annotation targets a member that is not callable
/// - `index` targets a member whose value is not a structured record
#[derive(Debug)]
pub(super) struct InvalidAnnotationTarget {
    model: Box<str>,
    member: Box<str>,
    annotation: Box<str>,
    found: Box<str>,
}

impl std::error::Error for InvalidAnnotationTarget {}

impl core::fmt::Display for InvalidAnnotationTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid annotation target: `{}` cannot be applied to {} `{}.{}`",
            self.annotation, self.found, self.model, self.member
        )
    }
}

impl Error {
    /// Creates an invalid annotation target error.
    ///
    /// `found` describes the kind of member the annotation was applied to.
    pub fn invalid_annotation_target(
        model: impl Into<String>,
        member: impl Into<String>,
        annotation: impl Into<String>,
        found: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidAnnotationTarget(
            InvalidAnnotationTarget {
                model: model.into().into(),
                member: member.into().into(),
                annotation: annotation.into().into(),
                found: found.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid annotation target error.
    pub fn is_invalid_annotation_target(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidAnnotationTarget(_))
    }
}
