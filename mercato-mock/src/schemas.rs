//! Schema declarations for the mock providers.
//!
//! The standard pairs describe the provider-agnostic surface; each provider
//! re-declares the standard fields (same type, same default) plus its own
//! extras, exactly as a real provider plugin would.

use serde_json::json;

use mercato_core::{FieldDef, FieldHints, FieldType, Schema, Unit};

pub(crate) fn standard_equity_query() -> Schema {
    Schema::new(
        "EquityHistoricalQueryParams",
        "Historical OHLCV price data for an equity.",
    )
    .with_field(FieldDef::required("symbol", FieldType::Str, "Ticker symbol.").multiple())
    .with_field(FieldDef::required(
        "start_date",
        FieldType::Date,
        "First date of the range, inclusive.",
    ))
    .with_field(FieldDef::required(
        "end_date",
        FieldType::Date,
        "Last date of the range, inclusive.",
    ))
}

pub(crate) fn standard_equity_data() -> Schema {
    Schema::new("EquityHistoricalData", "One OHLCV bar per trading day.")
        .with_field(FieldDef::required("date", FieldType::Date, "Bar date."))
        .with_field(FieldDef::required("open", FieldType::Decimal, "Opening price."))
        .with_field(FieldDef::required("high", FieldType::Decimal, "Session high."))
        .with_field(FieldDef::required("low", FieldType::Decimal, "Session low."))
        .with_field(FieldDef::required("close", FieldType::Decimal, "Closing price."))
        .with_field(FieldDef::required("volume", FieldType::Int, "Traded volume."))
}

pub(crate) fn alpha_equity_query() -> Schema {
    let mut q = standard_equity_query();
    q.name = "AlphaEquityHistoricalQueryParams".to_string();
    q
}

/// Alpha's payload uses short vendor keys; aliases map them to the public
/// field names.
pub(crate) fn alpha_equity_data() -> Schema {
    Schema::new("AlphaEquityHistoricalData", "One OHLCV bar per trading day.")
        .with_field(FieldDef::required("date", FieldType::Date, "Bar date."))
        .with_field(FieldDef::required("open", FieldType::Decimal, "Opening price.").with_alias("o"))
        .with_field(FieldDef::required("high", FieldType::Decimal, "Session high.").with_alias("h"))
        .with_field(FieldDef::required("low", FieldType::Decimal, "Session low.").with_alias("l"))
        .with_field(
            FieldDef::required("close", FieldType::Decimal, "Closing price.")
                .with_alias("closePrice"),
        )
        .with_field(FieldDef::required("volume", FieldType::Int, "Traded volume.").with_alias("v"))
}

pub(crate) fn beta_equity_query() -> Schema {
    let options = Schema::new("BetaHistoryOptions", "Sampling options.").with_field(
        FieldDef::optional(
            "granularity",
            FieldType::Enum(vec!["daily".into(), "weekly".into()]),
            json!("daily"),
            "Bar cadence.",
        ),
    );
    let mut q = standard_equity_query();
    q.name = "BetaEquityHistoricalQueryParams".to_string();
    q.fields.push(FieldDef::optional(
        "adjustment",
        FieldType::Enum(vec!["raw".into(), "split".into(), "total".into()]),
        json!("split"),
        "Corporate-action adjustment applied to prices.",
    ));
    q.fields.push(FieldDef::required(
        "options",
        FieldType::Object(Box::new(options)),
        "Sampling options.",
    ));
    q.extra.insert("source".to_string(), json!("beta-feed/v2"));
    q
}

pub(crate) fn beta_equity_data() -> Schema {
    let mut d = standard_equity_data();
    d.name = "BetaEquityHistoricalData".to_string();
    d.fields.push(FieldDef::required(
        "adjusted_close",
        FieldType::Decimal,
        "Close after the requested adjustment.",
    ));
    d
}

pub(crate) fn standard_balance_query() -> Schema {
    Schema::new(
        "BalanceSheetQueryParams",
        "Balance sheet statements for a company.",
    )
    .with_field(FieldDef::required("symbol", FieldType::Str, "Ticker symbol."))
    .with_field(FieldDef::optional(
        "period",
        FieldType::Enum(vec!["annual".into(), "quarter".into()]),
        json!("annual"),
        "Reporting cadence.",
    ))
}

pub(crate) fn standard_balance_data() -> Schema {
    Schema::new("BalanceSheetData", "One statement per reporting period.")
        .with_field(FieldDef::required("symbol", FieldType::Str, "Ticker symbol."))
        .with_field(FieldDef::required("date", FieldType::Date, "Period end date."))
        .with_field(FieldDef::required(
            "fiscal_period",
            FieldType::Str,
            "Fiscal period label.",
        ))
        .with_field(
            FieldDef::required("total_assets", FieldType::Decimal, "Total assets.").with_hints(
                FieldHints {
                    unit_measurement: Some(Unit::Currency),
                    ..FieldHints::default()
                },
            ),
        )
        .with_field(
            FieldDef::required("total_liabilities", FieldType::Decimal, "Total liabilities.")
                .with_hints(FieldHints {
                    unit_measurement: Some(Unit::Currency),
                    ..FieldHints::default()
                }),
        )
}

pub(crate) fn gamma_balance_query() -> Schema {
    let mut q = standard_balance_query();
    q.name = "GammaBalanceSheetQueryParams".to_string();
    q.fields.push(FieldDef::optional(
        "limit",
        FieldType::Int,
        json!(4),
        "Number of most recent statements to return.",
    ));
    q
}

pub(crate) fn gamma_balance_data() -> Schema {
    let mut d = standard_balance_data();
    d.name = "GammaBalanceSheetData".to_string();
    d
}
