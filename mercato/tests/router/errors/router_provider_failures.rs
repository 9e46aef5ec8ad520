use mercato::CommandContext;

use crate::helpers;

#[tokio::test]
async fn provider_errors_surface_verbatim() {
    let mercato = helpers::platform();
    let err = mercato
        .invoke(
            "/equity/price/historical",
            helpers::hist_params("FAIL"),
            &CommandContext::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "ProviderError");
    assert_eq!(err.provider_name(), Some("alpha"));
}

#[tokio::test]
async fn rate_limits_surface_verbatim() {
    let mercato = helpers::platform();
    let err = mercato
        .invoke(
            "/equity/price/historical",
            helpers::hist_params("RATELIMIT"),
            &CommandContext::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "RateLimitError");
}

#[tokio::test]
async fn rejected_credentials_surface_as_unauthorized() {
    let mercato = helpers::platform();
    let err = mercato
        .invoke(
            "/equity/price/historical",
            helpers::hist_params("NOAUTH"),
            &CommandContext::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "UnauthorizedError");
}
