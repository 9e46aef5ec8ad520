//! Provider selection: explicit choice, extras, credentials, empty data.
//!
//! Run with: `cargo run -p mercato --example 02_provider_selection`

use serde_json::json;

use mercato::{CommandContext, Credentials, Mercato, ParamMap};
use mercato_mock::{BALANCE_SHEET, EQUITY_HISTORICAL};

fn hist_params(symbol: &str) -> ParamMap {
    let mut params = ParamMap::new();
    params.insert("symbol".into(), json!(symbol));
    params.insert("start_date".into(), json!("2024-01-02"));
    params.insert("end_date".into(), json!("2024-01-03"));
    params
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mercato = Mercato::builder()
        .with_provider(mercato_mock::standard())
        .with_provider(mercato_mock::alpha())
        .with_provider(mercato_mock::beta())
        .with_provider(mercato_mock::gamma())
        .route("/equity/price/historical", EQUITY_HISTORICAL)
        .route("/fundamentals/balance", BALANCE_SHEET)
        .prefer_for_model(EQUITY_HISTORICAL, &[mercato_mock::BETA])
        .build()?;

    // Beta wins by configured priority; its `adjustment` extra and nested
    // sampling options apply.
    let mut params = hist_params("AAPL");
    params.insert("adjustment".into(), json!("raw"));
    params.insert("options".into(), json!({"granularity": "weekly"}));
    let obb = mercato
        .invoke("/equity/price/historical", params, &CommandContext::new())
        .await?;
    println!(
        "selected={} resolved={}",
        obb.provider().map_or("-", |p| p.as_str()),
        serde_json::to_string(&obb.extra()["resolved_params"])?,
    );

    // Gamma needs credentials from the per-call context.
    let ctx = CommandContext::new().with_credentials(
        "gamma",
        Credentials::from_pairs([("gamma_api_key", "demo-key")]),
    );
    let mut params = ParamMap::new();
    params.insert("symbol".into(), json!("AAPL"));
    params.insert("limit".into(), json!(2));
    let obb = mercato.invoke("/fundamentals/balance", params, &ctx).await?;
    for row in obb.to_rows() {
        println!("{} assets={}", row["date"], row["total_assets"]);
    }

    // An empty dataset is a warning, not an error.
    let obb = mercato
        .invoke(
            "/equity/price/historical",
            hist_params("EMPTY"),
            &CommandContext::new(),
        )
        .await?;
    println!(
        "empty: rows={} warnings={:?}",
        obb.results().len(),
        obb.warnings().iter().map(|w| &w.category).collect::<Vec<_>>(),
    );
    Ok(())
}
