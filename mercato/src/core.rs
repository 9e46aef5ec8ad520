use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use mercato_core::{
    CommandContext, FetcherRegistry, MercatoConfig, MercatoError, ModelId, Obbject, ParamMap,
    ProviderId, ProviderInterface, ProviderModule, ProviderRecord, SchemaRegistry,
};

use crate::router::Router;
use crate::router::introspect::{RouteDescription, RouteInfo};

/// Orchestrator exposing the derived provider interface as a callable route
/// tree.
///
/// Registries are frozen at the end of the build phase; a `Mercato` instance
/// is read-only and safe to share across tasks.
#[derive(Debug)]
pub struct Mercato {
    pub(crate) interface: Arc<ProviderInterface>,
    pub(crate) router: Router,
    pub(crate) cfg: MercatoConfig,
}

/// Builder for constructing a `Mercato` orchestrator.
pub struct MercatoBuilder {
    modules: Vec<Arc<dyn ProviderModule>>,
    routes: Vec<(String, ModelId)>,
    cfg: MercatoConfig,
}

impl Default for MercatoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MercatoBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no provider modules and no routes; register at least one
    ///   of each before calling [`build`](Self::build).
    /// - Defaults are conservative: 30 s call timeout, merge warnings are
    ///   non-fatal, empty datasets surface as warnings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            routes: Vec::new(),
            cfg: MercatoConfig::default(),
        }
    }

    /// Register a provider module.
    ///
    /// Behavior and trade-offs:
    /// - Registration order is the default provider priority for every model
    ///   the module serves; `prefer_for_model` overrides it per model.
    /// - Registering the same module twice fails the build with a duplicate
    ///   schema error.
    #[must_use]
    pub fn with_provider(mut self, module: Arc<dyn ProviderModule>) -> Self {
        self.modules.push(module);
        self
    }

    /// Bind a route path to a model.
    ///
    /// Paths are `/`-separated (`/equity/price/historical`), unique in the
    /// tree, and live here in the router configuration; schemas never carry
    /// paths.
    #[must_use]
    pub fn route(mut self, path: impl Into<String>, model: ModelId) -> Self {
        self.routes.push((path.into(), model));
        self
    }

    /// Set the preferred provider order for a model.
    ///
    /// Listed providers are tried first, in list order; unlisted providers
    /// serving the model remain eligible after them. Unknown or duplicate
    /// keys are dropped during the build step.
    #[must_use]
    pub fn prefer_for_model(mut self, model: ModelId, providers: &[ProviderId]) -> Self {
        self.cfg
            .per_model_priority
            .insert(model, providers.to_vec());
        self
    }

    /// Set the timeout applied when the per-call context carries no deadline.
    #[must_use]
    pub const fn default_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.default_timeout = timeout;
        self
    }

    /// Promote build-time merge warnings to fatal errors.
    #[must_use]
    pub const fn strict_build(mut self, yes: bool) -> Self {
        self.cfg.strict_build = yes;
        self
    }

    /// Raise `EmptyData` as an error instead of an empty envelope.
    #[must_use]
    pub const fn strict_empty_data(mut self, yes: bool) -> Self {
        self.cfg.strict_empty_data = yes;
        self
    }

    /// Build the `Mercato` orchestrator.
    ///
    /// Runs provider registration, derives the provider interface (schema
    /// intersection and merge validation), and constructs the route tree.
    ///
    /// # Errors
    /// `Schema` on any registration or derivation violation; `Validation`
    /// on malformed route paths. Build-time errors abort startup.
    pub fn build(mut self) -> Result<Mercato, MercatoError> {
        if self.modules.is_empty() {
            return Err(MercatoError::schema(
                "no provider modules registered; add at least one via with_provider(...)",
            ));
        }

        let mut schemas = SchemaRegistry::new();
        let mut fetchers = FetcherRegistry::new();
        for module in &self.modules {
            module.register(&mut schemas, &mut fetchers)?;
        }

        // Validate priority keys against registered providers; drop unknowns
        // and dedup, keeping list order.
        let known: HashSet<ProviderId> = schemas
            .iter()
            .map(|e| e.provider)
            .filter(|p| !p.is_standard())
            .collect();
        for list in self.cfg.per_model_priority.values_mut() {
            let mut seen: HashSet<ProviderId> = HashSet::new();
            list.retain(|p| known.contains(p) && seen.insert(*p));
        }

        let interface = ProviderInterface::build(schemas, fetchers, self.cfg.strict_build)?;
        let router = Router::new(&self.routes, &interface)?;

        Ok(Mercato {
            interface: Arc::new(interface),
            router,
            cfg: self.cfg,
        })
    }
}

impl Mercato {
    /// Start building a new `Mercato` instance.
    ///
    /// Typical usage chains provider registration, route bindings, and
    /// preferences:
    ///
    /// ```rust,ignore
    /// let mercato = Mercato::builder()
    ///     .with_provider(alpha)
    ///     .with_provider(beta)
    ///     .route("/equity/price/historical", ModelId::new("EquityHistorical"))
    ///     .prefer_for_model(ModelId::new("EquityHistorical"), &[ProviderId::new("alpha")])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> MercatoBuilder {
        MercatoBuilder::new()
    }

    /// Invoke a route with a parameter map and a per-call context.
    ///
    /// The parameter map may carry a `provider` selector, standard fields,
    /// any provider's extra fields (non-selected providers' extras are
    /// dropped), and nested or separator-flattened structured parameters.
    ///
    /// # Errors
    /// `Validation` for unknown routes, unknown providers, or bad
    /// parameters; `Unauthorized`, `RateLimit`, `Provider`, `Timeout`,
    /// `Cancelled` from the executor.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "mercato::invoke", skip(self, params, ctx), fields(path = path))
    )]
    pub async fn invoke(
        &self,
        path: &str,
        params: ParamMap,
        ctx: &CommandContext,
    ) -> Result<Obbject, MercatoError> {
        let route = self.router.resolve(path)?;
        let model = self
            .interface
            .model(route.model)
            .expect("routes are validated against the interface at build time");
        crate::executor::execute(&self.interface, &self.cfg, model, params, ctx).await
    }

    /// Bind a route path once and invoke it repeatedly.
    ///
    /// This is the in-process ergonomic form of route access; it is
    /// syntactic sugar over [`invoke`](Self::invoke).
    ///
    /// # Errors
    /// `Validation` when the path names no route.
    pub fn at(&self, path: &str) -> Result<RouteHandle<'_>, MercatoError> {
        let route = self.router.resolve(path)?;
        Ok(RouteHandle {
            mercato: self,
            path: route.path.clone(),
        })
    }

    /// List every route with its model, providers, and description.
    #[must_use]
    pub fn list_routes(&self) -> Vec<RouteInfo> {
        self.router.list(&self.interface)
    }

    /// Describe one route: standard query, per-provider extras, data schema,
    /// and providers. Pure; structurally stable across calls.
    ///
    /// # Errors
    /// `Validation` when the path names no route.
    pub fn describe(&self, path: &str) -> Result<RouteDescription, MercatoError> {
        let route = self.router.resolve(path)?;
        Ok(RouteDescription::for_route(route, &self.interface))
    }

    /// Per-provider records: models served and credential requirements.
    #[must_use]
    pub fn list_providers(&self) -> Vec<ProviderRecord> {
        self.interface.providers().to_vec()
    }

    /// Warnings recorded while deriving the provider interface.
    #[must_use]
    pub fn build_warnings(&self) -> &[mercato_types::Warning] {
        self.interface.warnings()
    }
}

/// A route bound to a `Mercato` instance for repeated invocation.
pub struct RouteHandle<'a> {
    mercato: &'a Mercato,
    path: String,
}

impl RouteHandle<'_> {
    /// The bound route path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Invoke the bound route.
    ///
    /// # Errors
    /// Same as [`Mercato::invoke`].
    pub async fn call(
        &self,
        params: ParamMap,
        ctx: &CommandContext,
    ) -> Result<Obbject, MercatoError> {
        self.mercato.invoke(&self.path, params, ctx).await
    }
}
