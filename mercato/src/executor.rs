//! The query executor: one call end-to-end with uniform error and warning
//! semantics.
//!
//! Pipeline per call: provider resolution, filtering of other providers'
//! extras, schema coercion, `transform_query`, credential resolution,
//! `extract_data` under timeout and cancellation, `transform_data`, and
//! envelope packaging. Executor calls share nothing mutable beyond the
//! frozen interface, so any number may run concurrently.

use std::time::Instant;

use serde_json::Value;

use mercato_core::alias::{flatten_params, unflatten_params};
use mercato_core::params::{coerce, field_path};
use mercato_core::{
    CommandContext, MercatoConfig, MercatoError, ModelInterface, Obbject, ParamMap, ProviderId,
    ProviderInterface, Results, Warning,
};

/// Reserved parameter name selecting the provider for a call.
const PROVIDER_KEY: &str = "provider";

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "mercato::executor::execute",
        skip(interface, cfg, model, params, ctx),
        fields(model = %model.model),
    )
)]
pub(crate) async fn execute(
    interface: &ProviderInterface,
    cfg: &MercatoConfig,
    model: &ModelInterface,
    params: ParamMap,
    ctx: &CommandContext,
) -> Result<Obbject, MercatoError> {
    let started = Instant::now();

    // Normalize nested structured parameters to the separator-joined names
    // the interface was built with; the encoding is reversed again before the
    // fetcher runs.
    let mut params = flatten_params(&params);

    let explicit = take_provider(&mut params, model)?;

    // Unknown keywords fail against the union of every provider's accepted
    // names; keywords known to non-selected providers are dropped later.
    let merged = model.merged_names();
    if let Some(unknown) = params.keys().find(|k| !merged.contains(*k)) {
        return Err(MercatoError::validation(
            field_path(unknown),
            format!("unknown parameter for `{}`", model.model),
        ));
    }

    let provider = match explicit {
        Some(p) => p,
        None => select_provider(interface, cfg, model, ctx)?,
    };

    let accepted = model
        .accepted_names(provider)
        .expect("chosen provider serves the model");
    params.retain(|k, _| accepted.contains(k));

    let schema = model
        .query_schema_for(provider)
        .expect("chosen provider serves the model");
    let resolved = coerce(schema, &params)?;

    let fetcher = interface
        .fetcher(provider, model.model)
        .expect("fetcher presence is verified at build time");

    let nested = unflatten_params(&resolved);
    let query = fetcher.transform_query(&nested).map_err(|e| match e {
        e @ MercatoError::Validation { .. } => e,
        other => MercatoError::validation("", other.to_string()),
    })?;

    let credentials = ctx
        .credentials_for(provider.as_str())
        .cloned()
        .unwrap_or_default();
    if fetcher.require_credentials() && credentials.is_empty() {
        return Err(MercatoError::unauthorized(
            provider.as_str(),
            format!(
                "missing credentials [{}] for `{}`",
                fetcher.credential_keys().join(", "),
                model.model
            ),
        ));
    }

    let timeout = ctx.timeout().unwrap_or(cfg.default_timeout);
    let mut warnings: Vec<Warning> = Vec::new();

    let raw = tokio::select! {
        () = ctx.cancel_token().cancelled() => return Err(MercatoError::Cancelled),
        res = tokio::time::timeout(timeout, fetcher.extract_data(&query, &credentials, ctx)) => {
            match res {
                Err(_) => return Err(MercatoError::Timeout { after: timeout }),
                Ok(inner) => inner,
            }
        }
    };

    let results = match raw {
        Err(MercatoError::EmptyData { message }) => {
            empty_results(cfg, provider, message, &mut warnings)?
        }
        Err(e) => return Err(e),
        Ok(payload) => match fetcher.transform_data(&query, payload) {
            Err(MercatoError::EmptyData { message }) => {
                empty_results(cfg, provider, message, &mut warnings)?
            }
            Err(e) => return Err(e),
            Ok(rows) => Results::Many(rows),
        },
    };

    let mut extra = serde_json::Map::new();
    extra.insert(
        "elapsed_ms".to_string(),
        Value::from(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)),
    );
    extra.insert(
        "resolved_params".to_string(),
        Value::Object(resolved.into_iter().collect()),
    );

    Ok(Obbject::new(results, Some(provider), warnings, extra))
}

/// Surface an empty dataset as an envelope warning, or raise it in strict
/// empty-data mode.
fn empty_results(
    cfg: &MercatoConfig,
    provider: ProviderId,
    message: String,
    warnings: &mut Vec<Warning>,
) -> Result<Results, MercatoError> {
    if cfg.strict_empty_data {
        return Err(MercatoError::EmptyData { message });
    }
    warnings.push(Warning::for_provider(provider, "empty_data", message));
    Ok(Results::Empty)
}

/// Remove and validate the `provider` selector from the parameter map.
fn take_provider(
    params: &mut ParamMap,
    model: &ModelInterface,
) -> Result<Option<ProviderId>, MercatoError> {
    let Some(value) = params.remove(PROVIDER_KEY) else {
        return Ok(None);
    };
    let Value::String(name) = value else {
        return Err(MercatoError::validation(
            PROVIDER_KEY,
            "expected a provider name",
        ));
    };
    match model.providers.iter().find(|p| p.as_str() == name) {
        Some(&p) => Ok(Some(p)),
        None => {
            let valid: Vec<&str> = model.providers.iter().map(|p| p.as_str()).collect();
            Err(MercatoError::validation(
                PROVIDER_KEY,
                format!(
                    "unknown provider `{name}` for `{}`; valid providers: {}",
                    model.model,
                    valid.join(", ")
                ),
            ))
        }
    }
}

/// Pick the first provider in priority order that either needs no
/// credentials or has them available in the context.
fn select_provider(
    interface: &ProviderInterface,
    cfg: &MercatoConfig,
    model: &ModelInterface,
    ctx: &CommandContext,
) -> Result<ProviderId, MercatoError> {
    let mut order: Vec<ProviderId> = Vec::new();
    if let Some(pref) = cfg.per_model_priority.get(&model.model) {
        order.extend(pref.iter().copied().filter(|p| model.has_provider(*p)));
    }
    for &p in &model.providers {
        if !order.contains(&p) {
            order.push(p);
        }
    }

    for &p in &order {
        if !interface.requires_credentials(p, model.model) || ctx.has_credentials(p.as_str()) {
            return Ok(p);
        }
    }

    // Every eligible provider needs credentials the context does not hold.
    let needs: Vec<String> = order
        .iter()
        .map(|&p| {
            let keys = interface
                .fetcher(p, model.model)
                .map(|f| f.credential_keys().join(", "))
                .unwrap_or_default();
            format!("{p} requires [{keys}]")
        })
        .collect();
    let first = order.first().expect("models have at least one provider");
    Err(MercatoError::unauthorized(
        first.as_str(),
        format!(
            "no provider for `{}` has credentials available; {}",
            model.model,
            needs.join("; ")
        ),
    ))
}
