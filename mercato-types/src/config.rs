//! Configuration types shared between the orchestrator and the executor.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::ids::{ModelId, ProviderId};

/// Global configuration for the `Mercato` orchestrator.
#[derive(Debug, Clone, Serialize)]
pub struct MercatoConfig {
    /// Preferred provider order per model.
    ///
    /// Listed providers are tried first, in list order; providers serving the
    /// model but absent from the list keep their registration order after the
    /// listed ones. Unknown or duplicate keys are dropped during the build
    /// step.
    pub per_model_priority: HashMap<ModelId, Vec<ProviderId>>,
    /// Timeout applied to a single call when the `CommandContext` carries no
    /// deadline of its own.
    pub default_timeout: Duration,
    /// Promote build-time merge/intersection warnings to fatal errors.
    pub strict_build: bool,
    /// Raise `EmptyData` as an error instead of surfacing an empty envelope
    /// with a warning.
    pub strict_empty_data: bool,
}

impl Default for MercatoConfig {
    fn default() -> Self {
        Self {
            per_model_priority: HashMap::new(),
            default_timeout: Duration::from_secs(30),
            strict_build: false,
            strict_empty_data: false,
        }
    }
}
