use serde_json::json;

use mercato_mock::{ALPHA, BALANCE_SHEET, BETA, EQUITY_HISTORICAL, GAMMA};

use crate::helpers;

#[test]
fn list_routes_enumerates_paths_with_providers() {
    let mercato = helpers::platform();
    let routes = mercato.list_routes();

    let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["/equity/price/historical", "/fundamentals/balance"]
    );

    let hist = &routes[0];
    assert_eq!(hist.model, EQUITY_HISTORICAL);
    assert_eq!(hist.providers, vec![ALPHA, BETA]);
    assert!(!hist.description.is_empty());
}

#[test]
fn describe_reports_standard_extras_and_merged_schemas() {
    let mercato = helpers::platform();
    let desc = mercato.describe("/equity/price/historical").unwrap();

    let standard: Vec<&str> = desc.standard_query.field_names().collect();
    assert_eq!(standard, vec!["symbol", "start_date", "end_date"]);

    let beta_extras: Vec<&str> = desc.extra_query_per_provider[&BETA].field_names().collect();
    assert_eq!(beta_extras, vec!["adjustment", "options__granularity"]);
    assert!(desc.extra_query_per_provider[&ALPHA].fields.is_empty());

    let data: Vec<&str> = desc.data_schema.field_names().collect();
    assert_eq!(data, vec!["date", "open", "high", "low", "close", "volume"]);

    // Merged extras carry provider attribution in the description.
    let adjustment = desc.merged_query.field("adjustment").unwrap();
    assert!(
        adjustment
            .description
            .starts_with("Available for providers: beta:"),
        "{}",
        adjustment.description
    );
}

#[test]
fn describe_is_structurally_stable() {
    let mercato = helpers::platform();
    let a = serde_json::to_value(mercato.describe("/equity/price/historical").unwrap()).unwrap();
    let b = serde_json::to_value(mercato.describe("/equity/price/historical").unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn list_providers_reports_models_and_credential_needs() {
    let mercato = helpers::platform();
    let providers = mercato.list_providers();

    let names: Vec<_> = providers.iter().map(|p| p.name).collect();
    assert_eq!(names, vec![ALPHA, BETA, GAMMA]);

    let gamma = providers.iter().find(|p| p.name == GAMMA).unwrap();
    assert_eq!(gamma.models, vec![BALANCE_SHEET]);
    assert_eq!(gamma.requires_credentials_for, vec![BALANCE_SHEET]);

    let alpha = providers.iter().find(|p| p.name == ALPHA).unwrap();
    assert!(alpha.requires_credentials_for.is_empty());
}

#[test]
fn envelope_shape_matches_the_boundary_contract() {
    let mercato = helpers::platform();
    let routes = serde_json::to_value(mercato.list_routes()).unwrap();
    assert_eq!(routes[0]["model"], json!("EquityHistorical"));
    assert_eq!(routes[0]["providers"], json!(["alpha", "beta"]));
}
