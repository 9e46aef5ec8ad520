use serde_json::json;

use mercato::{CommandContext, ProviderId};
use mercato_mock::{ALPHA, EQUITY_HISTORICAL};

use crate::helpers;

#[tokio::test]
async fn standard_call_uses_priority_provider() {
    let mercato = helpers::builder()
        .prefer_for_model(EQUITY_HISTORICAL, &[ALPHA])
        .build()
        .unwrap();

    let obb = mercato
        .invoke(
            "/equity/price/historical",
            helpers::hist_params("AAPL"),
            &CommandContext::new(),
        )
        .await
        .unwrap();

    assert_eq!(obb.provider(), Some(ALPHA));
    assert!(obb.warnings().is_empty());

    let rows = obb.to_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["date"], json!("2024-01-02"));
    assert_eq!(rows[1]["date"], json!("2024-01-03"));
    assert!(rows[0].contains_key("close"));
}

#[tokio::test]
async fn envelope_carries_provenance() {
    let mercato = helpers::platform();
    let obb = mercato
        .invoke(
            "/equity/price/historical",
            helpers::hist_params("AAPL"),
            &CommandContext::new(),
        )
        .await
        .unwrap();

    assert!(obb.elapsed_ms().is_some());
    let resolved = obb.extra()["resolved_params"].as_object().unwrap();
    assert_eq!(resolved["symbol"], json!("AAPL"));
    assert_eq!(resolved["start_date"], json!("2024-01-02"));
}

#[tokio::test]
async fn route_handle_is_sugar_over_invoke() {
    let mercato = helpers::platform();
    let route = mercato.at("/equity/price/historical").unwrap();
    let obb = route
        .call(helpers::hist_params("MSFT"), &CommandContext::new())
        .await
        .unwrap();
    assert_eq!(obb.provider(), Some(ProviderId::new("alpha")));
    assert_eq!(obb.results().len(), 2);
}

#[tokio::test]
async fn multiple_symbols_collapse_to_one_argument() {
    let mercato = helpers::platform();
    let obb = mercato
        .invoke(
            "/equity/price/historical",
            helpers::params(&[
                ("symbol", json!(["AAPL", "MSFT"])),
                ("start_date", json!("2024-01-02")),
                ("end_date", json!("2024-01-02")),
            ]),
            &CommandContext::new(),
        )
        .await
        .unwrap();

    // One bar per symbol for the single-day range.
    assert_eq!(obb.results().len(), 2);
    let resolved = obb.extra()["resolved_params"].as_object().unwrap();
    assert_eq!(resolved["symbol"], json!("AAPL,MSFT"));
}
