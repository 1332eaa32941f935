//! The static model catalog and its read-only accessors.

use crate::error::RegistryError;
use crate::model::{ModelCost, ModelDefinition, ModelFamily, ModelLimits, ModelModalities, Modality};

const TEXT_AND_IMAGE: &[Modality] = &[Modality::Text, Modality::Image];
const TEXT_ONLY: &[Modality] = &[Modality::Text];

const fn model(
    id: &'static str,
    name: &'static str,
    version: &'static str,
    family: ModelFamily,
    context_window: u64,
    max_tokens: u64,
) -> ModelDefinition {
    ModelDefinition {
        id,
        name,
        display_name: name,
        version,
        family,
        reasoning: false,
        input: TEXT_AND_IMAGE,
        cost: ModelCost::ZERO,
        context_window,
        max_tokens,
        limit: ModelLimits {
            context: context_window,
            output: max_tokens,
        },
        modalities: ModelModalities {
            input: TEXT_AND_IMAGE,
            output: TEXT_ONLY,
        },
        deprecated: false,
        replaced_by: None,
        is_default: false,
    }
}

/// Every model the upstream Trellis account has ever exposed, active and
/// deprecated alike. Deprecated entries stay in the table so their
/// replacement lineage can be resolved when migrating old configs.
pub static MODELS: &[ModelDefinition] = &[
    model("gpt-5.3-codex", "GPT-5.3 Codex", "5.3", ModelFamily::Gpt, 400_000, 128_000),
    model("gpt-5.2", "GPT-5.2", "5.2", ModelFamily::Gpt, 400_000, 128_000),
    ModelDefinition {
        deprecated: true,
        replaced_by: Some("gpt-5.3-codex"),
        ..model("gpt-5.2-codex", "GPT-5.2 Codex (deprecated)", "5.2", ModelFamily::Gpt, 400_000, 128_000)
    },
    ModelDefinition {
        deprecated: true,
        replaced_by: Some("gpt-5.3-codex"),
        ..model("gpt-5.1-codex", "GPT-5.1 Codex (deprecated)", "5.1", ModelFamily::Gpt, 400_000, 128_000)
    },
    ModelDefinition {
        deprecated: true,
        replaced_by: Some("gpt-5.3-codex"),
        ..model("gpt-5.1-codex-max", "GPT-5.1 Codex Max (deprecated)", "5.1", ModelFamily::Gpt, 400_000, 128_000)
    },
    ModelDefinition {
        deprecated: true,
        replaced_by: Some("gpt-5.3-codex"),
        ..model("gpt-5.1-codex-mini", "GPT-5.1 Codex Mini (deprecated)", "5.1", ModelFamily::Gpt, 200_000, 64_000)
    },
    ModelDefinition {
        deprecated: true,
        replaced_by: Some("gpt-5.2"),
        ..model("gpt-5.1", "GPT-5.1 (deprecated)", "5.1", ModelFamily::Gpt, 400_000, 128_000)
    },
    ModelDefinition {
        is_default: true,
        ..model("claude-opus-4-6-20260205", "Claude Opus 4.6", "4.6", ModelFamily::Claude, 200_000, 64_000)
    },
    model("claude-sonnet-4-5-20250929", "Claude Sonnet 4.5", "4.5", ModelFamily::Claude, 200_000, 64_000),
    model("claude-haiku-4-5-20251001", "Claude Haiku 4.5", "4.5", ModelFamily::Claude, 200_000, 8_192),
    ModelDefinition {
        deprecated: true,
        replaced_by: Some("claude-opus-4-6-20260205"),
        ..model("claude-opus-4-5-20251101", "Claude Opus 4.5 (deprecated)", "4.5", ModelFamily::Claude, 180_000, 64_000)
    },
    ModelDefinition {
        deprecated: true,
        replaced_by: Some("claude-opus-4-6-20260205"),
        ..model(
            "claude-opus-4-6-20260205-third-party",
            "Claude Opus 4.6 third-party (deprecated)",
            "4.6",
            ModelFamily::Claude,
            200_000,
            64_000,
        )
    },
    ModelDefinition {
        deprecated: true,
        replaced_by: Some("claude-opus-4-6-20260205"),
        ..model(
            "claude-opus-4-5-20251101-third-party",
            "Claude Opus 4.5 third-party (deprecated)",
            "4.5",
            ModelFamily::Claude,
            180_000,
            64_000,
        )
    },
    ModelDefinition {
        deprecated: true,
        replaced_by: Some("claude-sonnet-4-5-20250929"),
        ..model(
            "claude-sonnet-4-5-20250929-third-party",
            "Claude Sonnet 4.5 third-party (deprecated)",
            "4.5",
            ModelFamily::Claude,
            200_000,
            64_000,
        )
    },
    ModelDefinition {
        deprecated: true,
        replaced_by: Some("claude-haiku-4-5-20251001"),
        ..model(
            "claude-haiku-4-5-20251001-third-party",
            "Claude Haiku 4.5 third-party (deprecated)",
            "4.5",
            ModelFamily::Claude,
            200_000,
            8_192,
        )
    },
    model("gemini-3-pro", "Gemini 3 Pro", "3", ModelFamily::Gemini, 1_048_576, 65_536),
];

/// Every catalog entry, deprecated included.
pub fn all() -> &'static [ModelDefinition] {
    MODELS
}

/// Entries still offered to the host.
pub fn active() -> Vec<&'static ModelDefinition> {
    MODELS.iter().filter(|m| !m.deprecated).collect()
}

/// Exact-id lookup across the whole catalog.
pub fn by_id(id: &str) -> Option<&'static ModelDefinition> {
    MODELS.iter().find(|m| m.id == id)
}

/// Active entries of one family.
pub fn by_family(family: ModelFamily) -> Vec<&'static ModelDefinition> {
    MODELS
        .iter()
        .filter(|m| m.family == family && !m.deprecated)
        .collect()
}

/// Entries scheduled for rewrite.
pub fn deprecated_models() -> Vec<&'static ModelDefinition> {
    MODELS.iter().filter(|m| m.deprecated).collect()
}

/// The unique entry flagged as the account-wide default.
///
/// Errors when the catalog declares zero or multiple defaults; both are
/// defects in the shipped table.
pub fn default_model() -> Result<&'static ModelDefinition, RegistryError> {
    find_default(MODELS)
}

pub(crate) fn find_default(models: &[ModelDefinition]) -> Result<&ModelDefinition, RegistryError> {
    let mut found = None;
    for candidate in models.iter().filter(|m| m.is_default) {
        match found {
            None => found = Some(candidate),
            Some(first) => {
                return Err(RegistryError::MultipleDefaults {
                    first: first.id,
                    second: candidate.id,
                })
            }
        }
    }
    found.ok_or(RegistryError::MissingDefault)
}
