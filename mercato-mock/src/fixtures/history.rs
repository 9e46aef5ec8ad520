//! Deterministic OHLCV fixture rows derived from the symbol and date range.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;

/// Seed a base price level from the symbol bytes so every symbol gets a
/// stable, distinct series.
fn seed(symbol: &str) -> i64 {
    i64::from(symbol.bytes().fold(0u8, u8::wrapping_add)) + 20
}

fn price(cents: i64) -> Value {
    Value::String(Decimal::new(cents, 2).normalize().to_string())
}

/// One candle per calendar day in `[start, end]`, keyed by the given payload
/// key names (date, open, high, low, close, volume in that order).
pub fn candles(symbol: &str, start: NaiveDate, end: NaiveDate, keys: [&str; 6]) -> Vec<Value> {
    let base = seed(symbol) * 100;
    let mut out = Vec::new();
    let mut day = start;
    let mut i: i64 = 0;
    while day <= end {
        let open = base + i * 10;
        let close = open + 5;
        let mut row = serde_json::Map::new();
        row.insert(
            keys[0].to_string(),
            Value::String(day.format("%Y-%m-%d").to_string()),
        );
        row.insert(keys[1].to_string(), price(open));
        row.insert(keys[2].to_string(), price(close + 15));
        row.insert(keys[3].to_string(), price(open - 10));
        row.insert(keys[4].to_string(), price(close));
        row.insert(keys[5].to_string(), Value::from(1_000 + i * 100));
        out.push(Value::Object(row));
        let Some(next) = day.checked_add_days(Days::new(1)) else {
            break;
        };
        day = next;
        i += 1;
    }
    out
}
