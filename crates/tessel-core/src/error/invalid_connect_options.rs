use super::Error;

/// Error when connection options name no usable target, or one of them
/// fails to parse.
#[derive(Debug)]
pub(super) struct InvalidConnectOptions {
    option: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidConnectOptions {}

impl core::fmt::Display for InvalidConnectOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid connection option `{}`: {}",
            self.option, self.reason
        )
    }
}

impl Error {
    pub fn invalid_connect_options(option: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConnectOptions(
            InvalidConnectOptions {
                option: option.into().into(),
                reason: reason.into().into(),
            },
        ))
    }

    pub fn is_invalid_connect_options(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConnectOptions(_))
    }
}
