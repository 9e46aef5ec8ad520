//! Declarative field and schema records.
//!
//! A [`Schema`] is a named, ordered collection of [`FieldDef`]s with a
//! class-level description. Two schemas exist per `(provider, model)` pair:
//! the query parameters and the data shape. Schemas carry no behavior and
//! perform no I/O; everything downstream (validation, coercion, interface
//! derivation) is driven by these records.

use core::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::alias;
use crate::error::MercatoError;

/// Semantic type of a field.
///
/// `Object` embeds another structured schema; the interface builder flattens
/// it using the nested-alias separator. `Union` is never declared by a
/// provider; it is produced only when merging incompatible extra fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldType {
    /// Boolean flag.
    Bool,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Exact decimal (prices, ratios).
    Decimal,
    /// Free-form string.
    Str,
    /// Calendar date (ISO `YYYY-MM-DD` on the wire).
    Date,
    /// Timestamp with date and time (RFC 3339 on the wire).
    DateTime,
    /// Closed set of string choices.
    Enum(Vec<String>),
    /// Homogeneous list of the inner type.
    List(Box<FieldType>),
    /// Inner type or null.
    Nullable(Box<FieldType>),
    /// Nested structured schema, flattened by the interface builder.
    Object(Box<Schema>),
    /// Tagged union of incompatible provider declarations.
    Union(Vec<FieldType>),
}

impl FieldType {
    /// Merge two declarations of the same field name into one type.
    ///
    /// Equal types collapse to themselves; anything else becomes a flattened,
    /// deduplicated `Union`.
    #[must_use]
    pub fn union_with(self, other: Self) -> Self {
        if self == other {
            return self;
        }
        let mut members: Vec<Self> = Vec::new();
        let mut push = |t: Self| match t {
            Self::Union(ts) => {
                for t in ts {
                    if !members.contains(&t) {
                        members.push(t);
                    }
                }
            }
            t => {
                if !members.contains(&t) {
                    members.push(t);
                }
            }
        };
        push(self);
        push(other);
        Self::Union(members)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Decimal => f.write_str("decimal"),
            Self::Str => f.write_str("str"),
            Self::Date => f.write_str("date"),
            Self::DateTime => f.write_str("datetime"),
            Self::Enum(choices) => write!(f, "enum[{}]", choices.join(", ")),
            Self::List(inner) => write!(f, "list[{inner}]"),
            Self::Nullable(inner) => write!(f, "nullable[{inner}]"),
            Self::Object(schema) => write!(f, "object[{}]", schema.name),
            Self::Union(members) => {
                let parts: Vec<String> = members.iter().map(ToString::to_string).collect();
                write!(f, "union[{}]", parts.join(" | "))
            }
        }
    }
}

/// Unit-of-measure hint attached to numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Value is a percentage.
    Percent,
    /// Value is denominated in the listing currency.
    Currency,
    /// Dimensionless ratio.
    Ratio,
    /// Share count.
    Shares,
}

/// Provider-local hints attached to a field.
///
/// Hints never affect the semantic type; they steer coercion
/// (`multiple_items_allowed`) and presentation (`unit_measurement`,
/// `frontend_multiply`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldHints {
    /// The field accepts several values in one call; list arguments collapse
    /// to a comma-joined scalar before reaching the fetcher. Values for such
    /// fields must therefore not contain commas themselves.
    pub multiple_items_allowed: bool,
    /// Unit-of-measure hint for numeric fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_measurement: Option<Unit>,
    /// Multiplier a frontend should apply before display (e.g. `100.0` for
    /// fractional percentages).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_multiply: Option<f64>,
}

/// A named field: semantic type, default, description, optional payload
/// alias, and provider-local hints.
///
/// A field without a default is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    /// Public snake-case name. The nested-alias separator is forbidden.
    pub name: String,
    /// Semantic type.
    pub ty: FieldType,
    /// Default value; `None` means the field is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Human description, merged across providers for extra fields.
    pub description: String,
    /// Key used when marshalling to/from this provider's payload, when it
    /// differs from the public name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Provider-local hints.
    pub hints: FieldHints,
}

impl FieldDef {
    /// A required field (no default).
    pub fn required(name: impl Into<String>, ty: FieldType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            description: description.into(),
            alias: None,
            hints: FieldHints::default(),
        }
    }

    /// An optional field with a default value.
    pub fn optional(
        name: impl Into<String>,
        ty: FieldType,
        default: Value,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            default: Some(default),
            description: description.into(),
            alias: None,
            hints: FieldHints::default(),
        }
    }

    /// Attach a provider payload alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Replace the hints wholesale.
    #[must_use]
    pub fn with_hints(mut self, hints: FieldHints) -> Self {
        self.hints = hints;
        self
    }

    /// Mark the field as accepting multiple comma-collapsed items.
    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.hints.multiple_items_allowed = true;
        self
    }

    /// Whether the field must be supplied by the caller.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A named, ordered collection of field descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// Schema name (e.g. `AlphaEquityHistoricalQueryParams`).
    pub name: String,
    /// Class-level description.
    pub description: String,
    /// Ordered field descriptors.
    pub fields: Vec<FieldDef>,
    /// Free-form JSON-schema-extra hints.
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, Value>,
}

impl Schema {
    /// An empty schema with a name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Append a field, builder style.
    #[must_use]
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Attach a JSON-schema-extra hint.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Look up a field by public name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether a field with this public name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Ordered public field names.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Validate field naming rules, recursing into nested object schemas.
    ///
    /// Rules: non-empty, `[a-z0-9_]` only, no leading/trailing underscore,
    /// the nested-alias separator is forbidden, and names are unique within
    /// the schema.
    ///
    /// # Errors
    /// Returns `Schema` naming the first offending field.
    pub fn validate(&self) -> Result<(), MercatoError> {
        let mut seen: Vec<&str> = Vec::new();
        for field in &self.fields {
            alias::validate_field_name(&field.name)
                .map_err(|reason| bad_field(&self.name, &field.name, &reason))?;
            if seen.contains(&field.name.as_str()) {
                return Err(bad_field(&self.name, &field.name, "duplicate field name"));
            }
            seen.push(&field.name);
            if let Some(nested) = nested_schema(&field.ty) {
                nested.validate()?;
            }
        }
        Ok(())
    }
}

fn nested_schema(ty: &FieldType) -> Option<&Schema> {
    match ty {
        FieldType::Object(schema) => Some(schema),
        FieldType::List(inner) | FieldType::Nullable(inner) => nested_schema(inner),
        _ => None,
    }
}

fn bad_field(schema: &str, field: &str, reason: &str) -> MercatoError {
    MercatoError::schema(format!("schema `{schema}`, field `{field}`: {reason}"))
}
