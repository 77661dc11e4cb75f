use super::Error;

/// Error when a field declaration names a data type the engine does not know,
/// or is neither a type name nor a `{ type, .. }` record.
#[derive(Debug)]
pub(super) struct InvalidFieldType {
    message: Box<str>,
}

impl std::error::Error for InvalidFieldType {}

impl core::fmt::Display for InvalidFieldType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid field type: {}", self.message)
    }
}

impl Error {
    pub fn invalid_field_type(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidFieldType(InvalidFieldType {
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_field_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidFieldType(_))
    }
}
