use mercato::{
    FetcherRegistry, FieldDef, FieldType, MercatoError, ProviderId, ProviderModule, Schema,
    SchemaRegistry,
};
use mercato_mock::EQUITY_HISTORICAL;

use crate::helpers;

const DELTA: ProviderId = ProviderId::new("delta");

fn standard_like_query(name: &str) -> Schema {
    Schema::new(name, "Historical OHLCV price data for an equity.")
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

/// Registers an EquityHistorical data schema that drops `close`.
struct DeltaProvider;

impl ProviderModule for DeltaProvider {
    fn id(&self) -> ProviderId {
        DELTA
    }

    fn register(
        &self,
        schemas: &mut SchemaRegistry,
        fetchers: &mut FetcherRegistry,
    ) -> Result<(), MercatoError> {
        let data = Schema::new("DeltaEquityHistoricalData", "Bars without a close column.")
            .with_field(FieldDef::required("date", FieldType::Date, ""))
            .with_field(FieldDef::required("open", FieldType::Decimal, ""))
            .with_field(FieldDef::required("high", FieldType::Decimal, ""))
            .with_field(FieldDef::required("low", FieldType::Decimal, ""))
            .with_field(FieldDef::required("volume", FieldType::Int, ""));
        schemas.register(
            DELTA,
            EQUITY_HISTORICAL,
            standard_like_query("DeltaEquityHistoricalQueryParams"),
            data,
        )?;
        fetchers.register(schemas, DELTA, EQUITY_HISTORICAL, helpers::stub_fetcher())
    }
}

#[test]
fn intersection_violation_aborts_the_build_naming_provider_and_field() {
    let err = helpers::builder()
        .with_provider(std::sync::Arc::new(DeltaProvider))
        .build()
        .unwrap_err();

    assert_eq!(err.kind(), "SchemaError");
    let msg = err.to_string();
    assert!(msg.contains("delta") && msg.contains("close"), "{msg}");
}

/// Registers a standard query field with a divergent semantic type.
struct SkewedProvider;

impl ProviderModule for SkewedProvider {
    fn id(&self) -> ProviderId {
        ProviderId::new("skewed")
    }

    fn register(
        &self,
        schemas: &mut SchemaRegistry,
        fetchers: &mut FetcherRegistry,
    ) -> Result<(), MercatoError> {
        let query = Schema::new("SkewedQueryParams", "")
            .with_field(FieldDef::required("symbol", FieldType::Str, "").multiple())
            // Standard declares Date here.
            .with_field(FieldDef::required("start_date", FieldType::Str, ""))
            .with_field(FieldDef::required("end_date", FieldType::Date, ""));
        let data = Schema::new("SkewedData", "")
            .with_field(FieldDef::required("date", FieldType::Date, ""))
            .with_field(FieldDef::required("open", FieldType::Decimal, ""))
            .with_field(FieldDef::required("high", FieldType::Decimal, ""))
            .with_field(FieldDef::required("low", FieldType::Decimal, ""))
            .with_field(FieldDef::required("close", FieldType::Decimal, ""))
            .with_field(FieldDef::required("volume", FieldType::Int, ""));
        schemas.register(ProviderId::new("skewed"), EQUITY_HISTORICAL, query, data)?;
        fetchers.register(
            schemas,
            ProviderId::new("skewed"),
            EQUITY_HISTORICAL,
            helpers::stub_fetcher(),
        )
    }
}

#[test]
fn standard_query_type_mismatch_aborts_the_build() {
    let err = helpers::builder()
        .with_provider(std::sync::Arc::new(SkewedProvider))
        .build()
        .unwrap_err();

    assert_eq!(err.kind(), "SchemaError");
    let msg = err.to_string();
    assert!(msg.contains("skewed") && msg.contains("start_date"), "{msg}");
}
