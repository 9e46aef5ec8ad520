//! Deterministic balance sheet fixture rows.

use rust_decimal::Decimal;
use serde_json::{Value, json};

fn amount(units: i64) -> Value {
    Value::String(Decimal::new(units, 0).to_string())
}

/// `limit` most recent statement rows for a symbol, annual or quarterly.
pub fn balance_sheets(symbol: &str, period: &str, limit: u32) -> Vec<Value> {
    let base = i64::from(symbol.bytes().fold(0u8, u8::wrapping_add)) * 1_000_000;
    let quarterly = period == "quarter";
    (0..i64::from(limit))
        .map(|i| {
            let (year, suffix) = if quarterly {
                (2024, format!("Q{}", 4 - (i % 4)))
            } else {
                (2024 - i, "FY".to_string())
            };
            json!({
                "symbol": symbol,
                "date": format!("{year}-12-31"),
                "fiscal_period": suffix,
                "total_assets": amount(base + 5_000_000 - i * 100_000),
                "total_liabilities": amount(base / 2 + 1_000_000 - i * 50_000),
            })
        })
        .collect()
}
