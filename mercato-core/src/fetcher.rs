//! The `Fetcher` trait implemented by provider crates.
//!
//! A fetcher services exactly one `(provider, model)` pair as a pipeline of
//! three phases: `transform_query` (pure), `extract_data` (the only I/O and
//! suspension point), and `transform_data` (pure). The executor runs the
//! phases strictly in order, applies the call timeout around
//! `extract_data`, and never calls `transform_data` after cancellation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::CommandContext;
use crate::error::MercatoError;
use crate::params::ParamMap;

/// One transformed data record, keyed by public field names.
pub type Row = serde_json::Map<String, Value>;

/// Opaque credential map resolved per call from the `CommandContext`.
///
/// Key names are provider-defined (e.g. `gamma_api_key`) and opaque to the
/// core; credentials never enter transformed data rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    /// An empty credential map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Insert one credential.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a credential by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether the map holds no credentials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The three-phase fetch pipeline servicing one `(provider, model)` pair.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Whether this fetcher needs credentials before `extract_data` runs.
    fn require_credentials(&self) -> bool {
        false
    }

    /// Credential key names this fetcher consumes; used to compose
    /// `Unauthorized` messages naming what is missing.
    fn credential_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// Pure provider-side query adjustment, applied after the executor has
    /// coerced the parameters against this provider's query schema.
    ///
    /// The default is the identity transform.
    ///
    /// # Errors
    /// `Validation` with a field path on provider-specific constraint
    /// violations the schema cannot express.
    fn transform_query(&self, params: &ParamMap) -> Result<ParamMap, MercatoError> {
        Ok(params.clone())
    }

    /// Perform the I/O for the call and return the raw provider payload.
    ///
    /// This is the only suspension point in the pipeline. Transport failures
    /// map to the error taxonomy here: auth rejections to `Unauthorized`,
    /// throttling to `RateLimit`, no-data responses to `EmptyData`, anything
    /// else to `Provider` with the cause preserved.
    async fn extract_data(
        &self,
        query: &ParamMap,
        credentials: &Credentials,
        ctx: &CommandContext,
    ) -> Result<Value, MercatoError>;

    /// Pure reshaping of the raw payload into public-name rows.
    ///
    /// # Errors
    /// `EmptyData` when the payload decodes to nothing (surfaced by the
    /// executor as an empty envelope with a warning), `Provider` on
    /// unexpected payload shapes.
    fn transform_data(&self, query: &ParamMap, raw: Value) -> Result<Vec<Row>, MercatoError>;
}
