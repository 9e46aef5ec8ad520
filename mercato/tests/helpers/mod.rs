#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use mercato::{
    CommandContext, Credentials, Fetcher, Mercato, MercatoBuilder, MercatoError, ParamMap, Row,
};
use mercato_mock::{BALANCE_SHEET, EQUITY_HISTORICAL};

/// Builder preloaded with the standard models and all three mock providers.
pub fn builder() -> MercatoBuilder {
    Mercato::builder()
        .with_provider(mercato_mock::standard())
        .with_provider(mercato_mock::alpha())
        .with_provider(mercato_mock::beta())
        .with_provider(mercato_mock::gamma())
        .route("/equity/price/historical", EQUITY_HISTORICAL)
        .route("/fundamentals/balance", BALANCE_SHEET)
}

pub fn platform() -> Mercato {
    builder().build().unwrap()
}

pub fn params(pairs: &[(&str, Value)]) -> ParamMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

/// Standard historical params for `[2024-01-02, 2024-01-03]`.
pub fn hist_params(symbol: &str) -> ParamMap {
    params(&[
        ("symbol", Value::String(symbol.to_string())),
        ("start_date", Value::String("2024-01-02".to_string())),
        ("end_date", Value::String("2024-01-03".to_string())),
    ])
}

/// Context carrying gamma's API key.
pub fn gamma_ctx() -> CommandContext {
    CommandContext::new().with_credentials(
        "gamma",
        Credentials::from_pairs([("gamma_api_key", "test-key")]),
    )
}

/// Fetcher stub that always reports an empty dataset; used by build-phase
/// tests that need a fetcher but never execute one.
pub struct StubFetcher;

#[async_trait]
impl Fetcher for StubFetcher {
    async fn extract_data(
        &self,
        _query: &ParamMap,
        _credentials: &Credentials,
        _ctx: &CommandContext,
    ) -> Result<Value, MercatoError> {
        Err(MercatoError::empty_data("stub"))
    }

    fn transform_data(&self, _query: &ParamMap, _raw: Value) -> Result<Vec<Row>, MercatoError> {
        Err(MercatoError::empty_data("stub"))
    }
}

pub fn stub_fetcher() -> Arc<dyn Fetcher> {
    Arc::new(StubFetcher)
}
