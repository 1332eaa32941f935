//! Catalog entry types

use serde::Serialize;

/// Upstream vendor lineage a model id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Gpt,
    Claude,
    Gemini,
}

/// Input/output modality a model accepts or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
}

/// Per-token cost rates in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCost {
    pub input: f64,
    pub output: f64,
    pub cache_read: f64,
    pub cache_write: f64,
}

impl ModelCost {
    /// Costs are billed against the upstream Trellis account, so the
    /// per-model rates exposed to the host are zero.
    pub const ZERO: ModelCost = ModelCost {
        input: 0.0,
        output: 0.0,
        cache_read: 0.0,
        cache_write: 0.0,
    };
}

/// Context and output token limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelLimits {
    pub context: u64,
    pub output: u64,
}

/// Accepted and produced modalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelModalities {
    pub input: &'static [Modality],
    pub output: &'static [Modality],
}

/// One catalog entry: a specific model snapshot plus its registry metadata.
///
/// The registry is immutable static data. Entries are added or deprecated
/// only by shipping a new build of the plugin, never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelDefinition {
    /// Stable identifier, unique within the registry. May carry a date or
    /// version suffix.
    pub id: &'static str,
    /// Short human name shown by the host.
    pub name: &'static str,
    pub display_name: &'static str,
    pub version: &'static str,
    pub family: ModelFamily,
    /// Whether the model supports extended reasoning.
    pub reasoning: bool,
    /// Accepted input modalities.
    pub input: &'static [Modality],
    pub cost: ModelCost,
    pub context_window: u64,
    pub max_tokens: u64,
    pub limit: ModelLimits,
    pub modalities: ModelModalities,
    /// Deprecated entries are hidden from providers and rewritten out of
    /// user configs.
    pub deprecated: bool,
    /// Current successor id. Present iff `deprecated`; chains must be
    /// acyclic and end at a non-deprecated entry.
    pub replaced_by: Option<&'static str>,
    /// Exactly one entry registry-wide carries this flag.
    pub is_default: bool,
}
