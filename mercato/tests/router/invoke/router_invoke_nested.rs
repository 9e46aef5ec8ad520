use serde_json::json;

use mercato::CommandContext;
use mercato_mock::BETA;

use crate::helpers;

#[tokio::test]
async fn nested_and_flattened_forms_are_equivalent() {
    let mercato = helpers::platform();

    let mut nested = helpers::hist_params("AAPL");
    nested.insert("provider".to_string(), json!("beta"));
    nested.insert("options".to_string(), json!({"granularity": "weekly"}));

    let mut flat = helpers::hist_params("AAPL");
    flat.insert("provider".to_string(), json!("beta"));
    flat.insert("options__granularity".to_string(), json!("weekly"));

    let a = mercato
        .invoke("/equity/price/historical", nested, &CommandContext::new())
        .await
        .unwrap();
    let b = mercato
        .invoke("/equity/price/historical", flat, &CommandContext::new())
        .await
        .unwrap();

    assert_eq!(a.provider(), Some(BETA));
    assert_eq!(
        a.extra()["resolved_params"]["options__granularity"],
        json!("weekly")
    );
    assert_eq!(a.extra()["resolved_params"], b.extra()["resolved_params"]);
    assert_eq!(a.to_rows(), b.to_rows());
}

#[tokio::test]
async fn nested_enum_values_are_validated() {
    let mercato = helpers::platform();
    let mut params = helpers::hist_params("AAPL");
    params.insert("provider".to_string(), json!("beta"));
    params.insert("options".to_string(), json!({"granularity": "hourly"}));

    let err = mercato
        .invoke("/equity/price/historical", params, &CommandContext::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "ValidationError");
    assert_eq!(err.path(), Some("options.granularity"));
    assert!(err.to_string().contains("daily, weekly"));
}
