use super::Error;

/// Error when a relationship is declared with a kind other than
/// `belongsTo`, `hasOne`, `hasMany` or `belongsToMany`.
#[derive(Debug)]
pub(super) struct UnsupportedRelationType {
    kind: Box<str>,
}

impl std::error::Error for UnsupportedRelationType {}

impl core::fmt::Display for UnsupportedRelationType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported relation type `{}`; expected one of belongsTo, hasOne, hasMany, belongsToMany",
            self.kind
        )
    }
}

impl Error {
    pub fn unsupported_relation_type(kind: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedRelationType(
            UnsupportedRelationType {
                kind: kind.into().into(),
            },
        ))
    }

    pub fn is_unsupported_relation_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedRelationType(_))
    }
}
