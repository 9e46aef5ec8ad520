//! The uniform result envelope returned by every route.

use serde::Serialize;
use serde_json::Value;

use mercato_types::{ProviderId, Warning};

use crate::fetcher::Row;

/// The transformed payload carried by an envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Results {
    /// A sequence of data records.
    Many(Vec<Row>),
    /// A single data record.
    One(Row),
    /// No data matched the query.
    Empty,
}

impl Results {
    /// Number of records carried.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Many(rows) => rows.len(),
            Self::One(_) => 1,
            Self::Empty => 0,
        }
    }

    /// Whether no records are carried.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for Results {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Many(rows) => rows.serialize(serializer),
            Self::One(row) => row.serialize(serializer),
            // An empty row list on the wire, so consumers can iterate without
            // branching on the no-data case.
            Self::Empty => Vec::<Row>::new().serialize(serializer),
        }
    }
}

/// Immutable result envelope: payload, serving provider, accumulated
/// warnings, optional chart, and free-form provenance.
///
/// Constructed once per call by the executor; the sole object returned by
/// every route.
#[derive(Debug, Clone, Serialize)]
pub struct Obbject {
    results: Results,
    provider: Option<ProviderId>,
    warnings: Vec<Warning>,
    chart: Option<Value>,
    extra: serde_json::Map<String, Value>,
}

impl Obbject {
    /// Package a finished call.
    #[must_use]
    pub fn new(
        results: Results,
        provider: Option<ProviderId>,
        warnings: Vec<Warning>,
        extra: serde_json::Map<String, Value>,
    ) -> Self {
        Self {
            results,
            provider,
            warnings,
            chart: None,
            extra,
        }
    }

    /// The transformed payload.
    #[must_use]
    pub fn results(&self) -> &Results {
        &self.results
    }

    /// The provider that served the call, or `None` when the call failed
    /// before selection.
    #[must_use]
    pub fn provider(&self) -> Option<ProviderId> {
        self.provider
    }

    /// Warnings accumulated during the call, in occurrence order.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Opaque chart payload, when a charting layer attached one.
    #[must_use]
    pub fn chart(&self) -> Option<&Value> {
        self.chart.as_ref()
    }

    /// Free-form provenance map; always carries `elapsed_ms` and
    /// `resolved_params`.
    #[must_use]
    pub fn extra(&self) -> &serde_json::Map<String, Value> {
        &self.extra
    }

    /// Wall-clock time the call took, from `extra`.
    #[must_use]
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.extra.get("elapsed_ms").and_then(Value::as_u64)
    }

    /// The payload as a flat row list, cloning single records.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Row> {
        match &self.results {
            Results::Many(rows) => rows.clone(),
            Results::One(row) => vec![row.clone()],
            Results::Empty => Vec::new(),
        }
    }

    /// Serialize the envelope to the stable boundary JSON shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
