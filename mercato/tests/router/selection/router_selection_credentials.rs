use serde_json::json;

use mercato::CommandContext;

use crate::helpers;

#[tokio::test]
async fn missing_credentials_fail_with_unauthorized_naming_the_key() {
    let mercato = helpers::platform();
    let err = mercato
        .invoke(
            "/fundamentals/balance",
            helpers::params(&[("symbol", json!("AAPL"))]),
            &CommandContext::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "UnauthorizedError");
    assert_eq!(err.provider_name(), Some("gamma"));
    assert!(err.to_string().contains("gamma_api_key"));
}

#[tokio::test]
async fn explicit_provider_without_credentials_is_unauthorized() {
    let mercato = helpers::platform();
    let err = mercato
        .invoke(
            "/fundamentals/balance",
            helpers::params(&[("symbol", json!("AAPL")), ("provider", json!("gamma"))]),
            &CommandContext::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "UnauthorizedError");
    assert!(err.to_string().contains("gamma_api_key"));
}

#[tokio::test]
async fn credentials_in_context_unlock_the_provider() {
    let mercato = helpers::platform();
    let obb = mercato
        .invoke(
            "/fundamentals/balance",
            helpers::params(&[
                ("symbol", json!("AAPL")),
                ("period", json!("quarter")),
                ("limit", json!(2)),
            ]),
            &helpers::gamma_ctx(),
        )
        .await
        .unwrap();

    assert_eq!(obb.results().len(), 2);
    let rows = obb.to_rows();
    assert_eq!(rows[0]["fiscal_period"], json!("Q4"));
}
