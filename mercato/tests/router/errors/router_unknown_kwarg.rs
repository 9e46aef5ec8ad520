use serde_json::json;

use mercato::CommandContext;

use crate::helpers;

#[tokio::test]
async fn unknown_keyword_fails_validation_with_the_field_path() {
    let mercato = helpers::platform();
    let mut params = helpers::hist_params("AAPL");
    params.insert("provider".to_string(), json!("alpha"));
    params.insert("frobnicate".to_string(), json!(1));

    let err = mercato
        .invoke("/equity/price/historical", params, &CommandContext::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "ValidationError");
    assert_eq!(err.path(), Some("frobnicate"));
}

#[tokio::test]
async fn unknown_route_fails_validation() {
    let mercato = helpers::platform();
    let err = mercato
        .invoke(
            "/equity/price/quote",
            helpers::hist_params("AAPL"),
            &CommandContext::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "ValidationError");
    assert!(err.to_string().contains("unknown route"));
}
