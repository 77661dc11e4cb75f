#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    /// The handle accepts lifecycle hooks. Only true once the engine has
    /// finished defining the model.
    pub hooks: bool,
}

impl Capability {
    /// A fully defined model.
    pub const DEFINED: Self = Self { hooks: true };

    /// A placeholder handle whose model is not defined yet.
    pub const PENDING: Self = Self { hooks: false };
}

impl Default for Capability {
    fn default() -> Self {
        Self::DEFINED
    }
}
