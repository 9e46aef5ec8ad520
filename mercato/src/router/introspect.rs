//! Serde-serializable introspection DTOs for the route tree.

use std::collections::BTreeMap;

use serde::Serialize;

use mercato_core::{ModelId, ProviderId, ProviderInterface, Schema};

use super::tree::Route;

/// Summary of one route: path, bound model, providers, description.
#[derive(Debug, Clone, Serialize)]
pub struct RouteInfo {
    /// Route path (`/equity/price/historical`).
    pub path: String,
    /// Bound model.
    pub model: ModelId,
    /// Providers serving the model, in priority order.
    pub providers: Vec<ProviderId>,
    /// Description from the bound model.
    pub description: String,
}

/// Full description of one route, for API reference and tooling.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDescription {
    /// Route path.
    pub path: String,
    /// Bound model.
    pub model: ModelId,
    /// Description from the bound model.
    pub description: String,
    /// Providers serving the model.
    pub providers: Vec<ProviderId>,
    /// Standard query schema (flattened).
    pub standard_query: Schema,
    /// Per-provider query fields beyond the standard set.
    pub extra_query_per_provider: BTreeMap<ProviderId, Schema>,
    /// Standard data schema.
    pub data_schema: Schema,
    /// Standard plus merged extras, with provider attribution per field.
    pub merged_query: Schema,
}

impl RouteDescription {
    pub(crate) fn for_route(route: &Route, interface: &ProviderInterface) -> Self {
        let model = interface
            .model(route.model)
            .expect("routes are validated at build time");
        Self {
            path: route.path.clone(),
            model: model.model,
            description: model.description.clone(),
            providers: model.providers.clone(),
            standard_query: model.standard_query.clone(),
            extra_query_per_provider: model.extra_query.clone(),
            data_schema: model.standard_data.clone(),
            merged_query: model.merged_query.clone(),
        }
    }
}
