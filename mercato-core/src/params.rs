//! Dynamic parameter maps and schema-driven coercion.
//!
//! Callers supply loosely-typed parameter maps; the executor coerces them
//! against the chosen provider's flattened query schema before the fetcher
//! runs. Coercion applies defaults, enforces required fields, parses string
//! dates and decimals, validates enum choices, and collapses list arguments
//! for `multiple_items_allowed` fields.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::alias::SEPARATOR;
use crate::error::MercatoError;
use crate::schema::{FieldDef, FieldType, Schema};

/// Ordered map of public parameter names to loosely-typed values.
pub type ParamMap = BTreeMap<String, Value>;

/// Render a flattened field name as a user-facing path (`options.granularity`).
#[must_use]
pub fn field_path(name: &str) -> String {
    name.replace(SEPARATOR, ".")
}

/// Coerce a parameter map against a flattened query schema.
///
/// Every key must name a schema field; missing optional fields take their
/// defaults; missing required fields fail. The returned map contains exactly
/// the schema's fields that resolved to a value.
///
/// # Errors
/// `Validation` with the offending field path on unknown keys, missing
/// required fields, or uncoercible values.
pub fn coerce(schema: &Schema, params: &ParamMap) -> Result<ParamMap, MercatoError> {
    if let Some(unknown) = params.keys().find(|k| !schema.contains(k)) {
        return Err(MercatoError::validation(
            field_path(unknown),
            format!("unknown parameter for `{}`", schema.name),
        ));
    }

    let mut out = ParamMap::new();
    for field in &schema.fields {
        match params.get(&field.name) {
            Some(value) => {
                let coerced = coerce_value(field, &field.ty, value)?;
                out.insert(field.name.clone(), coerced);
            }
            None => match &field.default {
                Some(default) => {
                    out.insert(field.name.clone(), default.clone());
                }
                None => {
                    return Err(MercatoError::validation(
                        field_path(&field.name),
                        "missing required parameter",
                    ));
                }
            },
        }
    }
    Ok(out)
}

fn coerce_value(field: &FieldDef, ty: &FieldType, value: &Value) -> Result<Value, MercatoError> {
    // List arguments for multiple-items fields collapse to one comma-joined
    // scalar before type checking; fetchers always see a single value.
    if field.hints.multiple_items_allowed
        && !matches!(ty, FieldType::List(_))
        && let Value::Array(items) = value
    {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            parts.push(scalar_to_string(field, item)?);
        }
        return coerce_value(field, ty, &Value::String(parts.join(",")));
    }

    match ty {
        FieldType::Bool => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(s) => s
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|_| bad_value(field, "expected a boolean")),
            _ => Err(bad_value(field, "expected a boolean")),
        },
        FieldType::Int => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| bad_value(field, "expected an integer")),
            _ => Err(bad_value(field, "expected an integer")),
        },
        FieldType::Float => match value {
            Value::Number(n) => n
                .as_f64()
                .map(Value::from)
                .ok_or_else(|| bad_value(field, "expected a float")),
            Value::String(s) => s
                .parse::<f64>()
                .map(Value::from)
                .map_err(|_| bad_value(field, "expected a float")),
            _ => Err(bad_value(field, "expected a float")),
        },
        FieldType::Decimal => {
            let parsed = match value {
                Value::String(s) => Decimal::from_str(s).ok(),
                Value::Number(n) => n.as_f64().and_then(Decimal::from_f64_retain),
                _ => None,
            };
            parsed
                .map(|d| Value::String(d.normalize().to_string()))
                .ok_or_else(|| bad_value(field, "expected a decimal"))
        }
        FieldType::Str => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            _ => Err(bad_value(field, "expected a string")),
        },
        FieldType::Date => match value {
            Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
                .map_err(|_| bad_value(field, "expected a date (YYYY-MM-DD)")),
            _ => Err(bad_value(field, "expected a date (YYYY-MM-DD)")),
        },
        FieldType::DateTime => match value {
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .map(|_| value.clone())
                .map_err(|_| bad_value(field, "expected an RFC 3339 timestamp")),
            _ => Err(bad_value(field, "expected an RFC 3339 timestamp")),
        },
        FieldType::Enum(choices) => match value {
            Value::String(s) if choices.iter().any(|c| c == s) => Ok(value.clone()),
            _ => Err(bad_value(
                field,
                &format!("expected one of: {}", choices.join(", ")),
            )),
        },
        FieldType::List(inner) => match value {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(coerce_value(field, inner, item)?);
                }
                Ok(Value::Array(out))
            }
            // A bare scalar is accepted as a one-element list.
            other => Ok(Value::Array(vec![coerce_value(field, inner, other)?])),
        },
        FieldType::Nullable(inner) => match value {
            Value::Null => Ok(Value::Null),
            other => coerce_value(field, inner, other),
        },
        FieldType::Object(_) => match value {
            Value::Object(_) => Ok(value.clone()),
            _ => Err(bad_value(field, "expected an object")),
        },
        FieldType::Union(members) => {
            for member in members {
                if let Ok(v) = coerce_value(field, member, value) {
                    return Ok(v);
                }
            }
            Err(bad_value(field, &format!("expected {ty}")))
        }
    }
}

fn scalar_to_string(field: &FieldDef, value: &Value) -> Result<String, MercatoError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(bad_value(field, "expected a list of scalars")),
    }
}

fn bad_value(field: &FieldDef, message: &str) -> MercatoError {
    MercatoError::validation(field_path(&field.name), message)
}
