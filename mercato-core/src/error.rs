use std::time::Duration;

use thiserror::Error;

/// Unified error type for the mercato workspace.
///
/// Build-time schema violations, call-time validation failures, and
/// provider-tagged runtime failures all map to a distinct variant so callers
/// can branch on `kind()` at the boundary.
#[derive(Debug, Error)]
pub enum MercatoError {
    /// Build-time schema violation: duplicate registration, bad field name,
    /// or an intersection/merge rule failure. Fatal; aborts startup.
    #[error("schema error: {message}")]
    Schema {
        /// Human-readable description naming the offending provider/field.
        message: String,
    },

    /// Bad or missing parameter, unknown provider, or unknown keyword.
    #[error("validation error at `{path}`: {message}")]
    Validation {
        /// Field path inside the parameter map (e.g. `start_date`,
        /// `options.granularity`).
        path: String,
        /// Human-readable error message.
        message: String,
    },

    /// Credentials missing or rejected by the provider.
    #[error("unauthorized for {provider}: {message}")]
    Unauthorized {
        /// Provider that required or rejected the credentials.
        provider: String,
        /// Message naming the credential keys needed.
        message: String,
    },

    /// The provider throttled the call.
    #[error("rate limited by {provider}: {msg}")]
    RateLimit {
        /// Provider that throttled the call.
        provider: String,
        /// Human-readable throttle message.
        msg: String,
    },

    /// The provider successfully returned nothing matching the query.
    ///
    /// The executor surfaces this as an empty envelope with a warning unless
    /// strict empty-data mode is enabled.
    #[error("no results found: {message}")]
    EmptyData {
        /// Description of the query that produced no data.
        message: String,
    },

    /// Any other provider-side failure (parsing, transport, unexpected shape).
    #[error("{provider} failed: {message}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        message: String,
        /// Underlying cause, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The call exceeded its deadline.
    #[error("call timed out after {after:?}")]
    Timeout {
        /// The deadline that was exceeded.
        after: Duration,
    },

    /// The call was cancelled via the context token.
    #[error("call cancelled")]
    Cancelled,
}

impl MercatoError {
    /// Helper: build a `Schema` error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Helper: build a `Validation` error with the offending field path.
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Helper: build an `Unauthorized` error naming the provider.
    pub fn unauthorized(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Helper: build a `RateLimit` error.
    pub fn rate_limit(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::RateLimit {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `EmptyData` error describing the query.
    pub fn empty_data(message: impl Into<String>) -> Self {
        Self::EmptyData {
            message: message.into(),
        }
    }

    /// Helper: build a `Provider` error without a cause.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Helper: build a `Provider` error preserving the underlying cause.
    pub fn provider_with_source(
        provider: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Stable machine-readable kind tag for the boundary contract.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Schema { .. } => "SchemaError",
            Self::Validation { .. } => "ValidationError",
            Self::Unauthorized { .. } => "UnauthorizedError",
            Self::RateLimit { .. } => "RateLimitError",
            Self::EmptyData { .. } => "EmptyDataError",
            Self::Provider { .. } => "ProviderError",
            Self::Timeout { .. } => "Timeout",
            Self::Cancelled => "Cancelled",
        }
    }

    /// The provider this error is tagged with, when one is known.
    #[must_use]
    pub fn provider_name(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { provider, .. }
            | Self::RateLimit { provider, .. }
            | Self::Provider { provider, .. } => Some(provider),
            _ => None,
        }
    }

    /// The field path inside the parameter map, for validation failures.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Validation { path, .. } => Some(path),
            _ => None,
        }
    }
}
