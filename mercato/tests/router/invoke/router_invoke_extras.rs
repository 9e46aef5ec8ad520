use serde_json::json;

use mercato::CommandContext;
use mercato_mock::{ALPHA, BETA};

use crate::helpers;

#[tokio::test]
async fn explicit_provider_receives_its_extra() {
    let mercato = helpers::platform();
    let mut params = helpers::hist_params("AAPL");
    params.insert("provider".to_string(), json!("beta"));
    params.insert("adjustment".to_string(), json!("raw"));

    let obb = mercato
        .invoke("/equity/price/historical", params, &CommandContext::new())
        .await
        .unwrap();

    assert_eq!(obb.provider(), Some(BETA));
    let resolved = obb.extra()["resolved_params"].as_object().unwrap();
    assert_eq!(resolved["adjustment"], json!("raw"));

    let rows = obb.to_rows();
    assert!(rows[0].contains_key("adjusted_close"));
}

#[tokio::test]
async fn other_providers_extras_are_dropped_silently() {
    let mercato = helpers::platform();
    let mut params = helpers::hist_params("AAPL");
    // `adjustment` belongs to beta; alpha wins selection and never sees it.
    params.insert("adjustment".to_string(), json!("raw"));

    let obb = mercato
        .invoke("/equity/price/historical", params, &CommandContext::new())
        .await
        .unwrap();

    assert_eq!(obb.provider(), Some(ALPHA));
    let resolved = obb.extra()["resolved_params"].as_object().unwrap();
    assert!(!resolved.contains_key("adjustment"));
}

#[tokio::test]
async fn extra_defaults_apply_for_the_chosen_provider() {
    let mercato = helpers::platform();
    let mut params = helpers::hist_params("AAPL");
    params.insert("provider".to_string(), json!("beta"));

    let obb = mercato
        .invoke("/equity/price/historical", params, &CommandContext::new())
        .await
        .unwrap();

    let resolved = obb.extra()["resolved_params"].as_object().unwrap();
    assert_eq!(resolved["adjustment"], json!("split"));
    assert_eq!(resolved["options__granularity"], json!("daily"));
}
