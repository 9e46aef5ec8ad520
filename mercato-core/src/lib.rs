//! mercato-core
//!
//! Schema model, registries, fetcher protocol, and the provider interface
//! builder shared across the mercato ecosystem.
//!
//! - `schema`: declarative field and schema records for query and data shapes.
//! - `alias`: nested-alias flattening and provider payload marshalling.
//! - `params`: dynamic parameter maps and schema-driven coercion.
//! - `fetcher`: the `Fetcher` trait implemented by provider crates.
//! - `registry`: schema and fetcher registries populated during startup.
//! - `interface`: the derived per-model provider interface (standard, extra,
//!   and merged schemas) consumed by the router and the executor.
//! - `obbject`: the uniform result envelope returned by every route.
//! - `context`: per-call context (credentials, deadline, cancellation).
//!
//! Async runtime (Tokio)
//! ---------------------
//! This crate assumes the Tokio ecosystem as the async runtime. The
//! `Fetcher::extract_data` suspension point and `CancelToken` are coupled to
//! Tokio sync facilities, so executing fetch pipelines requires a Tokio 1.x
//! runtime. Schema registration and interface building are runtime-free.
#![warn(missing_docs)]

/// Nested-alias flattening and payload alias marshalling.
pub mod alias;
/// Per-call context: credentials, deadline, cancellation token.
pub mod context;
mod error;
/// The `Fetcher` trait and credential types.
pub mod fetcher;
/// The derived provider interface built once per process.
pub mod interface;
/// The uniform result envelope.
pub mod obbject;
/// Dynamic parameter maps and schema-driven coercion.
pub mod params;
/// The `ProviderModule` registration trait.
pub mod provider;
/// Schema and fetcher registries.
pub mod registry;
/// Declarative field and schema records.
pub mod schema;

pub use context::{CancelToken, CommandContext};
pub use error::MercatoError;
pub use fetcher::{Credentials, Fetcher, Row};
pub use interface::{ModelInterface, ProviderInterface, ProviderRecord};
pub use obbject::{Obbject, Results};
pub use params::ParamMap;
pub use provider::ProviderModule;
pub use registry::{FetcherRegistry, SchemaRegistry};
pub use schema::{FieldDef, FieldHints, FieldType, Schema, Unit};

pub use mercato_types::{MercatoConfig, ModelId, ProviderId, Warning};
