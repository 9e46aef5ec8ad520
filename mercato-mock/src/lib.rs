//! Mock mercato provider modules for CI-safe tests and examples.
//!
//! Three deterministic providers backed by static fixtures:
//!
//! - `alpha`: `EquityHistorical`, vendor-keyed payloads mapped through field
//!   aliases, no credentials.
//! - `beta`: `EquityHistorical` with an `adjustment` extra and nested
//!   sampling options, no credentials.
//! - `gamma`: `BalanceSheet`, requires a `gamma_api_key` credential.
//!
//! [`StandardModels`] registers the standard schema pairs both models share;
//! include it in every build alongside the providers.
//!
//! Reserved symbols (`FAIL`, `RATELIMIT`, `NOAUTH`, `EMPTY`, `SLOW`) script
//! failure modes; see [`fetchers`].
#![warn(missing_docs)]

use std::sync::Arc;

/// Fetcher implementations and scripted failure symbols.
pub mod fetchers;
/// Deterministic fixture data.
pub mod fixtures;
mod schemas;

use mercato_core::{FetcherRegistry, MercatoError, ProviderModule, SchemaRegistry};
use mercato_types::{ModelId, ProviderId};

use fetchers::{AlphaEquityFetcher, BetaEquityFetcher, GammaBalanceFetcher};

/// The `alpha` provider key.
pub const ALPHA: ProviderId = ProviderId::new("alpha");
/// The `beta` provider key.
pub const BETA: ProviderId = ProviderId::new("beta");
/// The `gamma` provider key.
pub const GAMMA: ProviderId = ProviderId::new("gamma");

/// Historical OHLCV price data.
pub const EQUITY_HISTORICAL: ModelId = ModelId::new("EquityHistorical");
/// Balance sheet statements.
pub const BALANCE_SHEET: ModelId = ModelId::new("BalanceSheet");

/// Registers the standard schema pairs for the mock models.
pub struct StandardModels;

impl ProviderModule for StandardModels {
    fn id(&self) -> ProviderId {
        ProviderId::STANDARD
    }

    fn vendor(&self) -> &'static str {
        "Mercato"
    }

    fn register(
        &self,
        schemas: &mut SchemaRegistry,
        _fetchers: &mut FetcherRegistry,
    ) -> Result<(), MercatoError> {
        schemas.register(
            ProviderId::STANDARD,
            EQUITY_HISTORICAL,
            schemas::standard_equity_query(),
            schemas::standard_equity_data(),
        )?;
        schemas.register(
            ProviderId::STANDARD,
            BALANCE_SHEET,
            schemas::standard_balance_query(),
            schemas::standard_balance_data(),
        )
    }
}

/// The `alpha` mock provider module.
pub struct AlphaProvider;

impl ProviderModule for AlphaProvider {
    fn id(&self) -> ProviderId {
        ALPHA
    }

    fn vendor(&self) -> &'static str {
        "Alpha Mock"
    }

    fn register(
        &self,
        schemas: &mut SchemaRegistry,
        fetchers: &mut FetcherRegistry,
    ) -> Result<(), MercatoError> {
        schemas.register(
            ALPHA,
            EQUITY_HISTORICAL,
            schemas::alpha_equity_query(),
            schemas::alpha_equity_data(),
        )?;
        fetchers.register(
            schemas,
            ALPHA,
            EQUITY_HISTORICAL,
            Arc::new(AlphaEquityFetcher::new()),
        )
    }
}

/// The `beta` mock provider module.
pub struct BetaProvider;

impl ProviderModule for BetaProvider {
    fn id(&self) -> ProviderId {
        BETA
    }

    fn vendor(&self) -> &'static str {
        "Beta Mock"
    }

    fn register(
        &self,
        schemas: &mut SchemaRegistry,
        fetchers: &mut FetcherRegistry,
    ) -> Result<(), MercatoError> {
        schemas.register(
            BETA,
            EQUITY_HISTORICAL,
            schemas::beta_equity_query(),
            schemas::beta_equity_data(),
        )?;
        fetchers.register(schemas, BETA, EQUITY_HISTORICAL, Arc::new(BetaEquityFetcher))
    }
}

/// The `gamma` mock provider module.
pub struct GammaProvider;

impl ProviderModule for GammaProvider {
    fn id(&self) -> ProviderId {
        GAMMA
    }

    fn vendor(&self) -> &'static str {
        "Gamma Mock"
    }

    fn register(
        &self,
        schemas: &mut SchemaRegistry,
        fetchers: &mut FetcherRegistry,
    ) -> Result<(), MercatoError> {
        schemas.register(
            GAMMA,
            BALANCE_SHEET,
            schemas::gamma_balance_query(),
            schemas::gamma_balance_data(),
        )?;
        fetchers.register(schemas, GAMMA, BALANCE_SHEET, Arc::new(GammaBalanceFetcher))
    }
}

/// The standard-model module, as a shared handle.
#[must_use]
pub fn standard() -> Arc<dyn ProviderModule> {
    Arc::new(StandardModels)
}

/// The `alpha` module, as a shared handle.
#[must_use]
pub fn alpha() -> Arc<dyn ProviderModule> {
    Arc::new(AlphaProvider)
}

/// The `beta` module, as a shared handle.
#[must_use]
pub fn beta() -> Arc<dyn ProviderModule> {
    Arc::new(BetaProvider)
}

/// The `gamma` module, as a shared handle.
#[must_use]
pub fn gamma() -> Arc<dyn ProviderModule> {
    Arc::new(GammaProvider)
}
