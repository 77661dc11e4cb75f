use super::Error;

/// Error when a model extends itself, directly or through other extensions.
#[derive(Debug)]
pub(super) struct ExtensionCycleDetected {
    path: Box<[Box<str>]>,
}

impl std::error::Error for ExtensionCycleDetected {}

impl core::fmt::Display for ExtensionCycleDetected {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("extension cycle detected: ")?;
        for (i, model) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(model)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an extension cycle error. `path` lists the models from the
    /// outermost declaration to the repeated one.
    pub fn extension_cycle_detected<I, S>(path: I) -> Error
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error::from(super::ErrorKind::ExtensionCycleDetected(
            ExtensionCycleDetected {
                path: path.into_iter().map(|s| s.into().into()).collect(),
            },
        ))
    }

    pub fn is_extension_cycle_detected(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ExtensionCycleDetected(_))
    }
}
