//! The derived provider interface, built once per process.
//!
//! The builder walks the schema registry and produces, for every model, the
//! standard schemas, the per-provider extra schemas, the merged introspection
//! schemas, the provider choices, and the accepted-name sets the executor
//! filters against. Registries are consumed and frozen; the resulting
//! [`ProviderInterface`] is read-only and safe to share without locks.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;

use mercato_types::{ModelId, ProviderId, Warning};

use crate::alias::flatten_schema;
use crate::error::MercatoError;
use crate::fetcher::Fetcher;
use crate::registry::{FetcherRegistry, SchemaRegistry};
use crate::schema::{FieldDef, Schema};

/// The derived typed surface for one model.
#[derive(Debug, Clone)]
pub struct ModelInterface {
    /// The model this interface describes.
    pub model: ModelId,
    /// Description from the standard query schema.
    pub description: String,
    /// Providers serving the model, in registration order. This is the
    /// `ProviderChoices` enumeration and the default priority.
    pub providers: Vec<ProviderId>,
    /// Standard query schema (flattened).
    pub standard_query: Schema,
    /// Standard data schema (flattened).
    pub standard_data: Schema,
    /// Per-provider query fields beyond the standard set.
    pub extra_query: BTreeMap<ProviderId, Schema>,
    /// Per-provider data fields beyond the standard set.
    pub extra_data: BTreeMap<ProviderId, Schema>,
    /// Standard plus union of extras; introspection only. Each extra field's
    /// description records which providers accept it.
    pub merged_query: Schema,
    /// Standard plus union of data extras; descriptive only, never used to
    /// validate a single call.
    pub merged_data: Schema,
    /// Full flattened query schema per provider, used for per-call coercion.
    provider_query: BTreeMap<ProviderId, Schema>,
    /// Names accepted per provider: standard plus that provider's extras.
    accepted: BTreeMap<ProviderId, BTreeSet<String>>,
}

impl ModelInterface {
    /// Whether a provider serves this model.
    #[must_use]
    pub fn has_provider(&self, provider: ProviderId) -> bool {
        self.providers.contains(&provider)
    }

    /// Names accepted by a provider: standard fields plus its extras.
    #[must_use]
    pub fn accepted_names(&self, provider: ProviderId) -> Option<&BTreeSet<String>> {
        self.accepted.get(&provider)
    }

    /// The provider's full flattened query schema.
    #[must_use]
    pub fn query_schema_for(&self, provider: ProviderId) -> Option<&Schema> {
        self.provider_query.get(&provider)
    }

    /// Union of every provider's accepted names, plus the standard fields.
    #[must_use]
    pub fn merged_names(&self) -> BTreeSet<String> {
        self.merged_query.field_names().map(str::to_string).collect()
    }
}

/// Introspection record for one provider across all models.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderRecord {
    /// Provider name.
    pub name: ProviderId,
    /// Models the provider serves, in registration order.
    pub models: Vec<ModelId>,
    /// Models for which the provider's fetcher needs credentials.
    pub requires_credentials_for: Vec<ModelId>,
}

/// The frozen product of the build phase: every model's derived interface,
/// the fetcher registry, and per-provider records.
#[derive(Debug)]
pub struct ProviderInterface {
    models: BTreeMap<ModelId, ModelInterface>,
    fetchers: FetcherRegistry,
    providers: Vec<ProviderRecord>,
    warnings: Vec<Warning>,
}

impl ProviderInterface {
    /// Derive the interface from the populated registries.
    ///
    /// Validates the intersection rule for data schemas and the
    /// type-and-default agreement for standard query fields, merges extra
    /// query fields across providers, and verifies that every non-standard
    /// schema pair has a fetcher. With `strict`, build warnings become
    /// fatal.
    ///
    /// # Errors
    /// `Schema` naming the first offending `(provider, field)` on any
    /// violation.
    pub fn build(
        schemas: SchemaRegistry,
        fetchers: FetcherRegistry,
        strict: bool,
    ) -> Result<Self, MercatoError> {
        let mut warnings: Vec<Warning> = Vec::new();
        let mut models = BTreeMap::new();

        for model in schemas.models() {
            let interface = build_model(&schemas, &fetchers, model, &mut warnings)?;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                model = %interface.model,
                providers = interface.providers.len(),
                "derived model interface"
            );
            models.insert(model, interface);
        }

        if strict && let Some(w) = warnings.first() {
            return Err(MercatoError::schema(format!(
                "strict build: {} ({})",
                w.message, w.category
            )));
        }

        let providers = provider_records(&schemas, &fetchers);
        Ok(Self {
            models,
            fetchers,
            providers,
            warnings,
        })
    }

    /// The interface for a model, if registered.
    #[must_use]
    pub fn model(&self, model: ModelId) -> Option<&ModelInterface> {
        self.models.get(&model)
    }

    /// Iterate all model interfaces.
    pub fn models(&self) -> impl Iterator<Item = &ModelInterface> {
        self.models.values()
    }

    /// The fetcher for `(provider, model)`.
    #[must_use]
    pub fn fetcher(&self, provider: ProviderId, model: ModelId) -> Option<Arc<dyn Fetcher>> {
        self.fetchers.lookup(provider, model)
    }

    /// Whether `(provider, model)` needs credentials.
    #[must_use]
    pub fn requires_credentials(&self, provider: ProviderId, model: ModelId) -> bool {
        self.fetchers.requires_credentials(provider, model)
    }

    /// Per-provider introspection records.
    #[must_use]
    pub fn providers(&self) -> &[ProviderRecord] {
        &self.providers
    }

    /// Warnings recorded while building (extra-field merges).
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

fn build_model(
    schemas: &SchemaRegistry,
    fetchers: &FetcherRegistry,
    model: ModelId,
    warnings: &mut Vec<Warning>,
) -> Result<ModelInterface, MercatoError> {
    let (std_query, std_data) = schemas.lookup(ProviderId::STANDARD, model).ok_or_else(|| {
        MercatoError::schema(format!("model `{model}` has no standard schema pair"))
    })?;
    let providers = schemas.providers_for(model);
    if providers.is_empty() {
        return Err(MercatoError::schema(format!(
            "model `{model}` has no providers"
        )));
    }

    let standard_query = flatten_schema(std_query);
    let standard_data = flatten_schema(std_data);

    let mut extra_query = BTreeMap::new();
    let mut extra_data = BTreeMap::new();
    let mut provider_query = BTreeMap::new();
    let mut accepted = BTreeMap::new();

    for &provider in &providers {
        let (query, data) = schemas
            .lookup(provider, model)
            .expect("providers_for returned a registered provider");
        let flat_query = flatten_schema(query);
        let flat_data = flatten_schema(data);

        // Intersection rule: every standard data field must exist in every
        // provider's data schema.
        if let Some(missing) = standard_data
            .field_names()
            .find(|name| !flat_data.contains(name))
        {
            return Err(MercatoError::schema(format!(
                "provider `{provider}` data schema for `{model}` is missing standard field `{missing}`"
            )));
        }

        // Standard query fields must agree on semantic type and default.
        for std_field in &standard_query.fields {
            let Some(field) = flat_query.field(&std_field.name) else {
                return Err(MercatoError::schema(format!(
                    "provider `{provider}` query schema for `{model}` is missing standard field `{}`",
                    std_field.name
                )));
            };
            if field.ty != std_field.ty {
                return Err(MercatoError::schema(format!(
                    "provider `{provider}` declares standard query field `{}` on `{model}` as {} (standard: {})",
                    std_field.name, field.ty, std_field.ty
                )));
            }
            if field.default != std_field.default {
                return Err(MercatoError::schema(format!(
                    "provider `{provider}` declares a different default for standard query field `{}` on `{model}`",
                    std_field.name
                )));
            }
        }

        if fetchers.lookup(provider, model).is_none() {
            return Err(MercatoError::schema(format!(
                "no fetcher registered for ({provider}, {model})"
            )));
        }

        let extra_q = extras_of(&flat_query, &standard_query, model, provider, "ExtraQuery");
        let extra_d = extras_of(&flat_data, &standard_data, model, provider, "ExtraData");

        let mut names: BTreeSet<String> =
            standard_query.field_names().map(str::to_string).collect();
        names.extend(extra_q.field_names().map(str::to_string));
        accepted.insert(provider, names);

        extra_query.insert(provider, extra_q);
        extra_data.insert(provider, extra_d);
        provider_query.insert(provider, flat_query);
    }

    let merged_query = merged_schema(
        format!("{model}.MergedQuery"),
        &standard_query,
        &providers,
        &extra_query,
        model,
        Some(warnings),
    );
    let merged_data = merged_schema(
        format!("{model}.MergedData"),
        &standard_data,
        &providers,
        &extra_data,
        model,
        None,
    );

    Ok(ModelInterface {
        model,
        description: std_query.description.clone(),
        providers,
        standard_query,
        standard_data,
        extra_query,
        extra_data,
        merged_query,
        merged_data,
        provider_query,
        accepted,
    })
}

/// Fields of `schema` that are not in `standard`, as a derived schema.
fn extras_of(
    schema: &Schema,
    standard: &Schema,
    model: ModelId,
    provider: ProviderId,
    label: &str,
) -> Schema {
    let mut out = Schema::new(
        format!("{model}.{label}.{provider}"),
        format!("{provider} fields beyond the standard {model} schema"),
    );
    for field in &schema.fields {
        if !standard.contains(&field.name) {
            out.fields.push(field.clone());
        }
    }
    out
}

/// Standard fields plus the union of per-provider extras.
///
/// Shared extra names merge: equal types keep the type; unequal types become
/// a tagged union with a build warning (query side only). Descriptions are
/// concatenated with a prefix naming each provider. A `multiple_items_allowed`
/// conflict resolves to the permissive value with a warning.
fn merged_schema(
    name: String,
    standard: &Schema,
    providers: &[ProviderId],
    extras: &BTreeMap<ProviderId, Schema>,
    model: ModelId,
    mut warnings: Option<&mut Vec<Warning>>,
) -> Schema {
    let mut out = Schema::new(name, standard.description.clone());
    out.fields = standard.fields.clone();

    // (merged field, providers that accept it with their own descriptions)
    let mut merged: Vec<(FieldDef, Vec<(ProviderId, String)>)> = Vec::new();

    for &provider in providers {
        let Some(extra) = extras.get(&provider) else {
            continue;
        };
        for field in &extra.fields {
            match merged.iter_mut().find(|(f, _)| f.name == field.name) {
                None => {
                    merged.push((field.clone(), vec![(provider, field.description.clone())]));
                }
                Some((existing, sources)) => {
                    if existing.ty != field.ty {
                        if let Some(w) = warnings.as_mut() {
                            w.push(Warning::new(
                                "schema_merge",
                                format!(
                                    "extra field `{}` on `{model}` has incompatible types across providers; recording the union",
                                    field.name
                                ),
                            ));
                        }
                        existing.ty = existing.ty.clone().union_with(field.ty.clone());
                    }
                    if field.hints.multiple_items_allowed && !existing.hints.multiple_items_allowed
                    {
                        // Contradictory hints: prefer the permissive value.
                        existing.hints.multiple_items_allowed = true;
                        if let Some(w) = warnings.as_mut() {
                            w.push(Warning::new(
                                "schema_merge",
                                format!(
                                    "extra field `{}` on `{model}` disagrees on multiple_items_allowed; using true",
                                    field.name
                                ),
                            ));
                        }
                    }
                    sources.push((provider, field.description.clone()));
                }
            }
        }
    }

    for (mut field, sources) in merged {
        let parts: Vec<String> = sources
            .iter()
            .map(|(p, desc)| format!("{p}: {desc}"))
            .collect();
        field.description = format!("Available for providers: {}", parts.join("; "));
        out.fields.push(field);
    }
    out
}

fn provider_records(schemas: &SchemaRegistry, fetchers: &FetcherRegistry) -> Vec<ProviderRecord> {
    let mut order: Vec<ProviderId> = Vec::new();
    for entry in schemas.iter() {
        if !entry.provider.is_standard() && !order.contains(&entry.provider) {
            order.push(entry.provider);
        }
    }
    order
        .into_iter()
        .map(|provider| {
            let models: Vec<ModelId> = schemas
                .iter()
                .filter(|e| e.provider == provider)
                .map(|e| e.model)
                .collect();
            let requires_credentials_for = models
                .iter()
                .copied()
                .filter(|&m| fetchers.requires_credentials(provider, m))
                .collect();
            ProviderRecord {
                name: provider,
                models,
                requires_credentials_for,
            }
        })
        .collect()
}
