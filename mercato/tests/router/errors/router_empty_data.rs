use mercato::CommandContext;
use mercato_mock::ALPHA;

use crate::helpers;

#[tokio::test]
async fn empty_data_surfaces_as_warning_not_error() {
    let mercato = helpers::platform();
    let obb = mercato
        .invoke(
            "/equity/price/historical",
            helpers::hist_params("EMPTY"),
            &CommandContext::new(),
        )
        .await
        .unwrap();

    assert!(obb.results().is_empty());
    assert_eq!(obb.provider(), Some(ALPHA));
    assert_eq!(obb.warnings().len(), 1);
    assert_eq!(obb.warnings()[0].category, "empty_data");
    assert_eq!(obb.to_json()["results"], serde_json::json!([]));
}

#[tokio::test]
async fn strict_empty_data_raises_instead() {
    let mercato = helpers::builder().strict_empty_data(true).build().unwrap();
    let err = mercato
        .invoke(
            "/equity/price/historical",
            helpers::hist_params("EMPTY"),
            &CommandContext::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "EmptyDataError");
}
