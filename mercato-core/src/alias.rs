//! Nested-alias encoding and provider payload marshalling.
//!
//! Providers may embed a structured schema inside their query parameters
//! (e.g. an `options` object with a `granularity` field). The interface
//! builder flattens such schemas into top-level fields joined with
//! [`SEPARATOR`] (`options__granularity`), and the router reverses the
//! encoding before a fetcher ever sees the parameters. The transformation is
//! lossless on valid inputs; the separator is forbidden in field names at
//! registration time, which is what makes the round trip a bijection.

use serde_json::Value;

use crate::params::ParamMap;
use crate::schema::{FieldDef, FieldType, Schema};

/// Separator used when flattening nested schemas. Forbidden in field names.
pub const SEPARATOR: &str = "__";

/// Check a public field name against the naming rules.
///
/// # Errors
/// Returns a human-readable reason: empty name, bad character, leading or
/// trailing underscore, or an embedded separator.
pub fn validate_field_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("empty field name".to_string());
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
    {
        return Err(format!("invalid character `{c}` (expected [a-z0-9_])"));
    }
    if name.starts_with('_') || name.ends_with('_') {
        return Err("leading or trailing underscore".to_string());
    }
    if name.contains(SEPARATOR) {
        return Err(format!("contains reserved separator `{SEPARATOR}`"));
    }
    Ok(())
}

/// Flatten nested object fields of a schema into separator-joined top-level
/// fields, recursively.
///
/// Scalar fields pass through untouched, preserving order; an object field
/// contributes its nested fields in place, each prefixed with the object
/// field's name and [`SEPARATOR`].
#[must_use]
pub fn flatten_schema(schema: &Schema) -> Schema {
    let mut out = Schema::new(schema.name.clone(), schema.description.clone());
    out.extra = schema.extra.clone();
    for field in &schema.fields {
        flatten_field(field, None, &mut out.fields);
    }
    out
}

fn flatten_field(field: &FieldDef, prefix: Option<&str>, out: &mut Vec<FieldDef>) {
    let name = match prefix {
        Some(p) => format!("{p}{SEPARATOR}{}", field.name),
        None => field.name.clone(),
    };
    if let FieldType::Object(nested) = &field.ty {
        for inner in &nested.fields {
            flatten_field(inner, Some(&name), out);
        }
    } else {
        let mut flat = field.clone();
        flat.name = name;
        out.push(flat);
    }
}

/// Flatten a nested parameter map into separator-joined top-level keys.
///
/// Only JSON objects are descended into; arrays and scalars are values.
#[must_use]
pub fn flatten_params(params: &ParamMap) -> ParamMap {
    let mut out = ParamMap::new();
    for (key, value) in params {
        flatten_value(key, value, &mut out);
    }
    out
}

fn flatten_value(key: &str, value: &Value, out: &mut ParamMap) {
    match value {
        Value::Object(map) => {
            for (sub, inner) in map {
                flatten_value(&format!("{key}{SEPARATOR}{sub}"), inner, out);
            }
        }
        other => {
            out.insert(key.to_string(), other.clone());
        }
    }
}

/// Rebuild the nested parameter map from separator-joined keys.
///
/// Inverse of [`flatten_params`] on valid inputs (keys whose segments were
/// legal field names, which excludes the separator).
#[must_use]
pub fn unflatten_params(params: &ParamMap) -> ParamMap {
    let mut out = ParamMap::new();
    for (key, value) in params {
        let mut segments = key.split(SEPARATOR);
        let head = segments.next().unwrap_or_default().to_string();
        let rest: Vec<&str> = segments.collect();
        if rest.is_empty() {
            out.insert(head, value.clone());
        } else {
            let slot = out
                .entry(head)
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
            insert_nested(slot, &rest, value.clone());
        }
    }
    out
}

fn insert_nested(slot: &mut Value, path: &[&str], value: Value) {
    if !slot.is_object() {
        *slot = Value::Object(serde_json::Map::new());
    }
    let map = slot.as_object_mut().expect("slot coerced to object");
    match path {
        [] => {}
        [leaf] => {
            map.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let next = map
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
            insert_nested(next, rest, value);
        }
    }
}

/// Rename provider payload keys to public field names using declared aliases.
///
/// Fields without an alias, and rows already keyed by the public name, pass
/// through untouched.
#[must_use]
pub fn apply_aliases_from_provider(
    schema: &Schema,
    mut row: serde_json::Map<String, Value>,
) -> serde_json::Map<String, Value> {
    for field in &schema.fields {
        if let Some(alias) = &field.alias
            && !row.contains_key(&field.name)
            && let Some(value) = row.remove(alias)
        {
            row.insert(field.name.clone(), value);
        }
    }
    row
}

/// Rename public parameter names to provider payload keys using declared
/// aliases. Inverse direction of [`apply_aliases_from_provider`].
#[must_use]
pub fn apply_aliases_to_provider(schema: &Schema, mut params: ParamMap) -> ParamMap {
    for field in &schema.fields {
        if let Some(alias) = &field.alias
            && let Some(value) = params.remove(&field.name)
        {
            params.insert(alias.clone(), value);
        }
    }
    params
}
