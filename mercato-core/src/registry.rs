//! Schema and fetcher registries.
//!
//! Both registries are populated during provider registration at startup and
//! consumed by the interface builder, which freezes them into the read-only
//! [`crate::interface::ProviderInterface`]. Registration order matters: it is
//! the default provider priority when none is configured.

use std::collections::BTreeSet;
use std::sync::Arc;

use mercato_types::{ModelId, ProviderId};

use crate::error::MercatoError;
use crate::fetcher::Fetcher;
use crate::schema::Schema;

/// One registered `(provider, model)` schema pair.
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    /// Provider the pair belongs to (`ProviderId::STANDARD` for the
    /// synthetic standard pair).
    pub provider: ProviderId,
    /// Model the pair describes.
    pub model: ModelId,
    /// Query parameter schema.
    pub query: Schema,
    /// Data schema.
    pub data: Schema,
}

/// Holds per-provider query/data schemas for every named model.
///
/// Performs no I/O; rejects duplicates and illegal field names at
/// registration. Intersection rules are enforced later by the interface
/// builder, which sees all providers at once.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    entries: Vec<SchemaEntry>,
}

impl SchemaRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the schema pair for `(provider, model)`.
    ///
    /// # Errors
    /// `Schema` on a duplicate `(provider, model)` pair or on field names
    /// violating the naming rules (including the reserved separator).
    pub fn register(
        &mut self,
        provider: ProviderId,
        model: ModelId,
        query: Schema,
        data: Schema,
    ) -> Result<(), MercatoError> {
        if self.lookup(provider, model).is_some() {
            return Err(MercatoError::schema(format!(
                "duplicate schema registration for ({provider}, {model})"
            )));
        }
        query.validate()?;
        data.validate()?;
        self.entries.push(SchemaEntry {
            provider,
            model,
            query,
            data,
        });
        Ok(())
    }

    /// The schema pair for `(provider, model)`, if registered.
    #[must_use]
    pub fn lookup(&self, provider: ProviderId, model: ModelId) -> Option<(&Schema, &Schema)> {
        self.entries
            .iter()
            .find(|e| e.provider == provider && e.model == model)
            .map(|e| (&e.query, &e.data))
    }

    /// Providers serving a model, in registration order, deduplicated,
    /// excluding the synthetic standard handle.
    ///
    /// This order is the default priority when none is configured.
    #[must_use]
    pub fn providers_for(&self, model: ModelId) -> Vec<ProviderId> {
        let mut out = Vec::new();
        for e in &self.entries {
            if e.model == model && !e.provider.is_standard() && !out.contains(&e.provider) {
                out.push(e.provider);
            }
        }
        out
    }

    /// The set of registered model names.
    #[must_use]
    pub fn models(&self) -> BTreeSet<ModelId> {
        self.entries.iter().map(|e| e.model).collect()
    }

    /// Iterate all registered entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter()
    }
}

/// Maps `(provider, model)` to the fetcher servicing it.
#[derive(Default)]
pub struct FetcherRegistry {
    entries: Vec<(ProviderId, ModelId, Arc<dyn Fetcher>)>,
}

impl std::fmt::Debug for FetcherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<String> = self
            .entries
            .iter()
            .map(|(p, m, _)| format!("({p}, {m})"))
            .collect();
        f.debug_struct("FetcherRegistry").field("keys", &keys).finish()
    }
}

impl FetcherRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the fetcher for `(provider, model)`.
    ///
    /// # Errors
    /// `Schema` when no matching schema pair exists in `schemas`, or on a
    /// duplicate registration.
    pub fn register(
        &mut self,
        schemas: &SchemaRegistry,
        provider: ProviderId,
        model: ModelId,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<(), MercatoError> {
        if schemas.lookup(provider, model).is_none() {
            return Err(MercatoError::schema(format!(
                "fetcher for ({provider}, {model}) has no registered schemas"
            )));
        }
        if self.lookup(provider, model).is_some() {
            return Err(MercatoError::schema(format!(
                "duplicate fetcher registration for ({provider}, {model})"
            )));
        }
        self.entries.push((provider, model, fetcher));
        Ok(())
    }

    /// The fetcher for `(provider, model)`, if registered.
    #[must_use]
    pub fn lookup(&self, provider: ProviderId, model: ModelId) -> Option<Arc<dyn Fetcher>> {
        self.entries
            .iter()
            .find(|(p, m, _)| *p == provider && *m == model)
            .map(|(_, _, f)| Arc::clone(f))
    }

    /// Whether the fetcher for `(provider, model)` needs credentials.
    #[must_use]
    pub fn requires_credentials(&self, provider: ProviderId, model: ModelId) -> bool {
        self.lookup(provider, model)
            .is_some_and(|f| f.require_credentials())
    }
}
