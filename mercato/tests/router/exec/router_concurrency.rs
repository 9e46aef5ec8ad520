use serde_json::json;

use mercato::CommandContext;
use mercato_mock::{ALPHA, BETA, GAMMA};

use crate::helpers;

#[tokio::test]
async fn concurrent_calls_share_nothing_mutable() {
    let mercato = helpers::platform();

    let alpha_ctx = CommandContext::new();
    let alpha_call = mercato.invoke(
        "/equity/price/historical",
        helpers::hist_params("AAPL"),
        &alpha_ctx,
    );
    let mut beta_params = helpers::hist_params("MSFT");
    beta_params.insert("provider".to_string(), json!("beta"));
    let beta_ctx = CommandContext::new();
    let beta_call = mercato.invoke("/equity/price/historical", beta_params, &beta_ctx);
    let gamma_ctx = helpers::gamma_ctx();
    let gamma_call = mercato.invoke(
        "/fundamentals/balance",
        helpers::params(&[("symbol", json!("AAPL"))]),
        &gamma_ctx,
    );

    let (a, b, c) = futures::join!(alpha_call, beta_call, gamma_call);
    assert_eq!(a.unwrap().provider(), Some(ALPHA));
    assert_eq!(b.unwrap().provider(), Some(BETA));
    assert_eq!(c.unwrap().provider(), Some(GAMMA));
}

#[tokio::test]
async fn many_in_flight_calls_complete_independently() {
    let mercato = std::sync::Arc::new(helpers::platform());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let mercato = std::sync::Arc::clone(&mercato);
            tokio::spawn(async move {
                let symbol = if i % 2 == 0 { "AAPL" } else { "MSFT" };
                mercato
                    .invoke(
                        "/equity/price/historical",
                        crate::helpers::hist_params(symbol),
                        &CommandContext::new(),
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        let obb = handle.await.unwrap().unwrap();
        assert_eq!(obb.provider(), Some(ALPHA));
        assert_eq!(obb.results().len(), 2);
    }
}
