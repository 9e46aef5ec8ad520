//! Warning DTO accumulated on result envelopes and at interface build time.

use serde::Serialize;

use crate::ids::ProviderId;

/// A non-fatal diagnostic attached to a result envelope or recorded while
/// building the provider interface.
///
/// Warnings accumulate and never raise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Stable machine-readable category (e.g. `"empty_data"`, `"schema_merge"`).
    pub category: String,
    /// Human-readable message.
    pub message: String,
    /// Provider the warning refers to, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderId>,
}

impl Warning {
    /// Build a warning with a category and message.
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
            provider: None,
        }
    }

    /// Build a warning attributed to a provider.
    pub fn for_provider(
        provider: ProviderId,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
            provider: Some(provider),
        }
    }
}
