//! The `ProviderModule` registration trait implemented by provider crates.

use crate::error::MercatoError;
use crate::registry::{FetcherRegistry, SchemaRegistry};
use mercato_types::ProviderId;

/// A provider plugin: a named source of data supplying schemas and fetchers
/// for one or more models.
///
/// Modules are handed to the orchestrator builder at startup; their
/// registration order is the default priority when none is configured.
pub trait ProviderModule: Send + Sync {
    /// Stable identifier used in priority lists and envelopes.
    fn id(&self) -> ProviderId;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Register this provider's schema pairs and fetchers.
    ///
    /// # Errors
    /// `Schema` on duplicate or malformed registrations; the build aborts.
    fn register(
        &self,
        schemas: &mut SchemaRegistry,
        fetchers: &mut FetcherRegistry,
    ) -> Result<(), MercatoError>;
}
