//! Dump the discoverable surface: routes, schemas, providers.
//!
//! Run with: `cargo run -p mercato --example 03_introspection`

use mercato::Mercato;
use mercato_mock::{BALANCE_SHEET, EQUITY_HISTORICAL};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mercato = Mercato::builder()
        .with_provider(mercato_mock::standard())
        .with_provider(mercato_mock::alpha())
        .with_provider(mercato_mock::beta())
        .with_provider(mercato_mock::gamma())
        .route("/equity/price/historical", EQUITY_HISTORICAL)
        .route("/fundamentals/balance", BALANCE_SHEET)
        .build()?;

    println!("routes:");
    for route in mercato.list_routes() {
        println!(
            "  {} -> {} via {:?}",
            route.path, route.model, route.providers
        );
    }

    let desc = mercato.describe("/equity/price/historical")?;
    println!("\ndescribe {}:", desc.path);
    println!("{}", serde_json::to_string_pretty(&desc)?);

    println!("\nproviders:");
    println!(
        "{}",
        serde_json::to_string_pretty(&mercato.list_providers())?
    );
    Ok(())
}
