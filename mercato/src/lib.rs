//! Mercato exposes a uniform, discoverable command surface over pluggable
//! financial data providers.
//!
//! Overview
//! - Provider modules register declarative query/data schemas and fetchers
//!   for named models (`EquityHistorical`, `BalanceSheet`, ...).
//! - At build time the provider interface is derived: standard schemas,
//!   per-provider extras, merged introspection schemas, and the provider
//!   choices per model. Schema violations abort startup.
//! - A hierarchical route tree (`/equity/price/historical`) binds paths to
//!   models; every route is invoked with a parameter map and a per-call
//!   context and returns the uniform [`Obbject`] envelope.
//! - The executor selects a provider (explicit or by configured priority),
//!   filters and coerces parameters against the chosen provider's schema,
//!   runs the fetch pipeline under a deadline with cooperative cancellation,
//!   and packages results with provenance.
//!
//! Key behaviors and trade-offs
//! - Provider selection: an explicit `provider` argument must name a provider
//!   serving the model; otherwise the configured priority list is tried in
//!   order, skipping providers whose credentials are missing from the
//!   context. Registration order is the fallback priority.
//! - Parameters unknown to every provider fail validation; parameters known
//!   only to non-selected providers are dropped silently, so one call site
//!   can carry several providers' extras.
//! - Empty datasets surface as an empty envelope plus a warning rather than
//!   an error, unless strict empty-data mode is configured.
//!
//! Examples
//! Building an orchestrator with two providers and invoking a route:
//! ```rust,ignore
//! use std::sync::Arc;
//! use mercato::{CommandContext, Mercato, ModelId};
//!
//! let mercato = Mercato::builder()
//!     .with_provider(Arc::new(AlphaProvider::new()))
//!     .with_provider(Arc::new(BetaProvider::new()))
//!     .route("/equity/price/historical", ModelId::new("EquityHistorical"))
//!     .prefer_for_model(ModelId::new("EquityHistorical"), &[AlphaProvider::ID])
//!     .build()?;
//!
//! let obb = mercato
//!     .invoke("/equity/price/historical", params, &CommandContext::new())
//!     .await?;
//! for row in obb.to_rows() {
//!     // inspect rows keyed by public field names
//! }
//! ```
//!
//! See `mercato/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod executor;
mod router;

pub use crate::core::{Mercato, MercatoBuilder, RouteHandle};
pub use router::introspect::{RouteDescription, RouteInfo};

// Re-export core types for convenience
pub use mercato_core::{
    CancelToken, CommandContext, Credentials, Fetcher, FetcherRegistry, FieldDef, FieldHints,
    FieldType, MercatoConfig, MercatoError, ModelId, ModelInterface, Obbject, ParamMap, ProviderId,
    ProviderInterface, ProviderModule, ProviderRecord, Results, Row, Schema, SchemaRegistry, Unit,
    Warning,
};
