use serde_json::json;

use mercato::CommandContext;

use crate::helpers;

#[tokio::test]
async fn missing_required_standard_field_names_the_path() {
    let mercato = helpers::platform();
    let err = mercato
        .invoke(
            "/equity/price/historical",
            helpers::params(&[("symbol", json!("AAPL")), ("end_date", json!("2024-01-03"))]),
            &CommandContext::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "ValidationError");
    assert_eq!(err.path(), Some("start_date"));
}

#[tokio::test]
async fn malformed_date_names_the_path() {
    let mercato = helpers::platform();
    let err = mercato
        .invoke(
            "/equity/price/historical",
            helpers::params(&[
                ("symbol", json!("AAPL")),
                ("start_date", json!("Jan 2 2024")),
                ("end_date", json!("2024-01-03")),
            ]),
            &CommandContext::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.path(), Some("start_date"));
    assert!(err.to_string().contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn provider_transform_query_constraints_surface_as_validation() {
    let mercato = helpers::platform();
    let mut params = helpers::params(&[
        ("symbol", json!("AAPL")),
        ("start_date", json!("2024-01-03")),
        ("end_date", json!("2024-01-02")),
    ]);
    params.insert("provider".to_string(), json!("beta"));

    let err = mercato
        .invoke("/equity/price/historical", params, &CommandContext::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "ValidationError");
    assert_eq!(err.path(), Some("end_date"));
}
