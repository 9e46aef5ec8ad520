//! Provider and model identifiers usable across crates.

use core::fmt;

use serde::Serialize;

/// Typed key identifying a data provider in registries and priority lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProviderId(pub &'static str);

impl ProviderId {
    /// The synthetic provider handle carrying the standard schema pair for
    /// every model. It never executes a fetch.
    pub const STANDARD: Self = Self("standard");

    /// Construct a new typed provider key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// Whether this key is the synthetic standard handle.
    #[must_use]
    pub fn is_standard(self) -> bool {
        self == Self::STANDARD
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<ProviderId> for &'static str {
    fn from(k: ProviderId) -> Self {
        k.0
    }
}

/// Typed key for a model: the stable name of a query/answer pair served by
/// one or more providers (e.g. `EquityHistorical`).
///
/// The set of models is the public vocabulary; adding a provider never
/// renames a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModelId(pub &'static str);

impl ModelId {
    /// Construct a new typed model key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<ModelId> for &'static str {
    fn from(k: ModelId) -> Self {
        k.0
    }
}
