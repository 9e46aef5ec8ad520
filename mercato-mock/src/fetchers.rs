//! Fetcher implementations backed by deterministic fixtures.
//!
//! Reserved symbols script failure modes so tests and examples can exercise
//! the whole error taxonomy without a network:
//! `FAIL` (provider error), `RATELIMIT` (throttle), `NOAUTH` (credentials
//! rejected), `EMPTY` (no rows), `SLOW` (latency for timeout/cancel tests).

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};

use mercato_core::alias::apply_aliases_from_provider;
use mercato_core::{CommandContext, Credentials, Fetcher, MercatoError, ParamMap, Row, Schema};

use crate::fixtures;
use crate::schemas;

fn symbol_of(query: &ParamMap) -> &str {
    query
        .get("symbol")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn date_of(query: &ParamMap, key: &str) -> Result<NaiveDate, MercatoError> {
    let s = query
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| MercatoError::validation(key, "missing date"))?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| MercatoError::validation(key, "expected a date (YYYY-MM-DD)"))
}

fn scripted(provider: &'static str, symbol: &str) -> Result<(), MercatoError> {
    match symbol {
        "FAIL" => Err(MercatoError::provider(provider, "forced failure")),
        "RATELIMIT" => Err(MercatoError::rate_limit(provider, "forced throttle")),
        "NOAUTH" => Err(MercatoError::unauthorized(provider, "credentials rejected")),
        _ => Ok(()),
    }
}

async fn maybe_slow(symbol: &str) {
    if symbol == "SLOW" {
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
}

fn rows_from(
    provider: &'static str,
    payload: &Value,
    key: &str,
    not_found: String,
) -> Result<Vec<Value>, MercatoError> {
    let items = payload
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| MercatoError::provider(provider, format!("payload missing `{key}`")))?;
    if items.is_empty() {
        return Err(MercatoError::empty_data(not_found));
    }
    Ok(items.clone())
}

fn as_row(provider: &'static str, value: &Value) -> Result<Row, MercatoError> {
    value
        .as_object()
        .cloned()
        .ok_or_else(|| MercatoError::provider(provider, "payload row is not an object"))
}

/// Alpha serves OHLCV history from fixtures, keyed by short vendor names.
pub struct AlphaEquityFetcher {
    data: Schema,
}

impl AlphaEquityFetcher {
    pub(crate) fn new() -> Self {
        Self {
            data: schemas::alpha_equity_data(),
        }
    }
}

#[async_trait]
impl Fetcher for AlphaEquityFetcher {
    async fn extract_data(
        &self,
        query: &ParamMap,
        _credentials: &Credentials,
        _ctx: &CommandContext,
    ) -> Result<Value, MercatoError> {
        let symbol = symbol_of(query);
        scripted("alpha", symbol)?;
        maybe_slow(symbol).await;
        if symbol == "EMPTY" {
            return Ok(json!({ "candles": [] }));
        }
        let start = date_of(query, "start_date")?;
        let end = date_of(query, "end_date")?;
        let mut candles = Vec::new();
        for part in symbol.split(',') {
            candles.extend(fixtures::history::candles(
                part,
                start,
                end,
                ["date", "o", "h", "l", "closePrice", "v"],
            ));
        }
        Ok(json!({ "candles": candles }))
    }

    fn transform_data(&self, query: &ParamMap, raw: Value) -> Result<Vec<Row>, MercatoError> {
        let not_found = format!("no history for {}", symbol_of(query));
        rows_from("alpha", &raw, "candles", not_found)?
            .iter()
            .map(|v| Ok(apply_aliases_from_provider(&self.data, as_row("alpha", v)?)))
            .collect()
    }
}

/// Beta serves the same model with an `adjustment` extra and nested sampling
/// options.
pub struct BetaEquityFetcher;

#[async_trait]
impl Fetcher for BetaEquityFetcher {
    fn transform_query(&self, params: &ParamMap) -> Result<ParamMap, MercatoError> {
        // The schema cannot express the cross-field ordering constraint.
        let start = date_of(params, "start_date")?;
        let end = date_of(params, "end_date")?;
        if end < start {
            return Err(MercatoError::validation(
                "end_date",
                "end_date precedes start_date",
            ));
        }
        Ok(params.clone())
    }

    async fn extract_data(
        &self,
        query: &ParamMap,
        _credentials: &Credentials,
        _ctx: &CommandContext,
    ) -> Result<Value, MercatoError> {
        let symbol = symbol_of(query);
        scripted("beta", symbol)?;
        maybe_slow(symbol).await;
        if symbol == "EMPTY" {
            return Ok(json!({ "series": [] }));
        }
        let start = date_of(query, "start_date")?;
        let end = date_of(query, "end_date")?;
        let adjustment = query
            .get("adjustment")
            .and_then(Value::as_str)
            .unwrap_or("split");
        let mut series = Vec::new();
        for part in symbol.split(',') {
            for mut candle in fixtures::history::candles(
                part,
                start,
                end,
                ["date", "open", "high", "low", "close", "volume"],
            ) {
                let close = candle["close"].clone();
                if let Some(obj) = candle.as_object_mut() {
                    obj.insert("adjusted_close".to_string(), close);
                }
                series.push(candle);
            }
        }
        Ok(json!({ "series": series, "adjustment": adjustment }))
    }

    fn transform_data(&self, query: &ParamMap, raw: Value) -> Result<Vec<Row>, MercatoError> {
        let not_found = format!("no history for {}", symbol_of(query));
        rows_from("beta", &raw, "series", not_found)?
            .iter()
            .map(|v| as_row("beta", v))
            .collect()
    }
}

/// Gamma serves balance sheets and requires an API key.
pub struct GammaBalanceFetcher;

#[async_trait]
impl Fetcher for GammaBalanceFetcher {
    fn require_credentials(&self) -> bool {
        true
    }

    fn credential_keys(&self) -> &'static [&'static str] {
        &["gamma_api_key"]
    }

    async fn extract_data(
        &self,
        query: &ParamMap,
        credentials: &Credentials,
        _ctx: &CommandContext,
    ) -> Result<Value, MercatoError> {
        if credentials.get("gamma_api_key").is_none() {
            return Err(MercatoError::unauthorized(
                "gamma",
                "missing credentials [gamma_api_key]",
            ));
        }
        let symbol = symbol_of(query);
        scripted("gamma", symbol)?;
        maybe_slow(symbol).await;
        if symbol == "EMPTY" {
            return Ok(json!({ "statements": [] }));
        }
        let period = query
            .get("period")
            .and_then(Value::as_str)
            .unwrap_or("annual");
        let limit = query
            .get("limit")
            .and_then(Value::as_u64)
            .map_or(4, |l| u32::try_from(l).unwrap_or(u32::MAX));
        Ok(json!({
            "statements": fixtures::fundamentals::balance_sheets(symbol, period, limit)
        }))
    }

    fn transform_data(&self, query: &ParamMap, raw: Value) -> Result<Vec<Row>, MercatoError> {
        let not_found = format!("no statements for {}", symbol_of(query));
        rows_from("gamma", &raw, "statements", not_found)?
            .iter()
            .map(|v| as_row("gamma", v))
            .collect()
    }
}
