//! Build a platform from mock providers and invoke a route.
//!
//! Run with: `cargo run -p mercato --example 01_basic_invoke`

use chrono::NaiveDate;
use serde_json::json;

use mercato::{CommandContext, Mercato, ParamMap};
use mercato_mock::{BALANCE_SHEET, EQUITY_HISTORICAL};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mercato = Mercato::builder()
        .with_provider(mercato_mock::standard())
        .with_provider(mercato_mock::alpha())
        .with_provider(mercato_mock::beta())
        .with_provider(mercato_mock::gamma())
        .route("/equity/price/historical", EQUITY_HISTORICAL)
        .route("/fundamentals/balance", BALANCE_SHEET)
        .build()?;

    let start = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid date");

    let mut params = ParamMap::new();
    params.insert("symbol".into(), json!("AAPL"));
    params.insert("start_date".into(), json!(start.to_string()));
    params.insert("end_date".into(), json!(end.to_string()));

    let obb = mercato
        .invoke("/equity/price/historical", params, &CommandContext::new())
        .await?;

    println!(
        "provider={} rows={} elapsed={}ms",
        obb.provider().map_or("-", |p| p.as_str()),
        obb.results().len(),
        obb.elapsed_ms().unwrap_or_default(),
    );
    for row in obb.to_rows() {
        println!("{} close={}", row["date"], row["close"]);
    }
    Ok(())
}
