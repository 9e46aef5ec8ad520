use std::time::Duration;

use mercato::{CancelToken, CommandContext};

use crate::helpers;

#[tokio::test]
async fn context_deadline_times_the_call_out() {
    let mercato = helpers::platform();
    let ctx = CommandContext::new().with_timeout(Duration::from_millis(50));

    let err = mercato
        .invoke("/equity/price/historical", helpers::hist_params("SLOW"), &ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "Timeout");
}

#[tokio::test]
async fn configured_default_timeout_applies_without_a_deadline() {
    let mercato = helpers::builder()
        .default_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = mercato
        .invoke(
            "/equity/price/historical",
            helpers::hist_params("SLOW"),
            &CommandContext::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "Timeout");
}

#[tokio::test]
async fn cancellation_stops_the_call_mid_extract() {
    let mercato = helpers::platform();
    let token = CancelToken::new();
    let ctx = CommandContext::new().with_cancel_token(token.clone());

    let call = mercato.invoke("/equity/price/historical", helpers::hist_params("SLOW"), &ctx);
    tokio::pin!(call);

    // Let the call reach extract_data, then cancel.
    tokio::select! {
        res = call.as_mut() => panic!("call finished before cancellation: {res:?}"),
        () = tokio::time::sleep(Duration::from_millis(20)) => token.cancel(),
    }

    let err = call.await.unwrap_err();
    assert_eq!(err.kind(), "Cancelled");
}

#[tokio::test]
async fn fast_calls_are_unaffected_by_the_deadline() {
    let mercato = helpers::platform();
    let ctx = CommandContext::new().with_timeout(Duration::from_secs(5));
    let obb = mercato
        .invoke("/equity/price/historical", helpers::hist_params("AAPL"), &ctx)
        .await
        .unwrap();
    assert_eq!(obb.results().len(), 2);
}
