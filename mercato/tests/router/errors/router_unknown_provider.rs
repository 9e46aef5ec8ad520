use serde_json::json;

use mercato::CommandContext;

use crate::helpers;

#[tokio::test]
async fn unknown_provider_enumerates_the_valid_choices() {
    let mercato = helpers::platform();
    let mut params = helpers::hist_params("AAPL");
    params.insert("provider".to_string(), json!("delta"));

    let err = mercato
        .invoke("/equity/price/historical", params, &CommandContext::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "ValidationError");
    assert_eq!(err.path(), Some("provider"));
    let msg = err.to_string();
    assert!(msg.contains("alpha") && msg.contains("beta"), "{msg}");
}

#[tokio::test]
async fn provider_selector_must_be_a_string() {
    let mercato = helpers::platform();
    let mut params = helpers::hist_params("AAPL");
    params.insert("provider".to_string(), json!(7));

    let err = mercato
        .invoke("/equity/price/historical", params, &CommandContext::new())
        .await
        .unwrap_err();
    assert_eq!(err.path(), Some("provider"));
}
