//! Host-facing provider projections.
//!
//! Both provider registration and config migration consume the same
//! projection, so the two paths cannot drift apart.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::{
    claude_base_url, gemini_base_url, gpt_api, gpt_base_url, CLAUDE_API, GEMINI_API,
    PROVIDER_ID_CLAUDE, PROVIDER_ID_GEMINI, PROVIDER_ID_GPT,
};
use crate::model::{Modality, ModelCost, ModelDefinition, ModelFamily};
use crate::registry;

/// One of the three fixed plugin-facing provider identifiers, one per
/// model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Gpt,
    Claude,
    Gemini,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Gpt, Provider::Claude, Provider::Gemini];

    pub fn id(self) -> &'static str {
        match self {
            Provider::Gpt => PROVIDER_ID_GPT,
            Provider::Claude => PROVIDER_ID_CLAUDE,
            Provider::Gemini => PROVIDER_ID_GEMINI,
        }
    }

    pub fn family(self) -> ModelFamily {
        match self {
            Provider::Gpt => ModelFamily::Gpt,
            Provider::Claude => ModelFamily::Claude,
            Provider::Gemini => ModelFamily::Gemini,
        }
    }

    pub fn for_family(family: ModelFamily) -> Provider {
        match family {
            ModelFamily::Gpt => Provider::Gpt,
            ModelFamily::Claude => Provider::Claude,
            ModelFamily::Gemini => Provider::Gemini,
        }
    }

    pub fn base_url(self) -> String {
        match self {
            Provider::Gpt => gpt_base_url(),
            Provider::Claude => claude_base_url(),
            Provider::Gemini => gemini_base_url(),
        }
    }

    /// Upstream API dialect tag, opaque to everything but the host's
    /// transport layer.
    pub fn api(self) -> String {
        match self {
            Provider::Gpt => gpt_api(),
            Provider::Claude => CLAUDE_API.to_string(),
            Provider::Gemini => GEMINI_API.to_string(),
        }
    }
}

/// A catalog entry reduced to the shape the host understands. Registry
/// metadata (family, lineage, default flag, limits object) is stripped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderModel {
    pub id: &'static str,
    pub name: &'static str,
    pub reasoning: bool,
    pub input: &'static [Modality],
    pub cost: ModelCost,
    pub context_window: u64,
    pub max_tokens: u64,
}

impl From<&ModelDefinition> for ProviderModel {
    fn from(model: &ModelDefinition) -> Self {
        ProviderModel {
            id: model.id,
            name: model.name,
            reasoning: model.reasoning,
            input: model.input,
            cost: model.cost,
            context_window: model.context_window,
            max_tokens: model.max_tokens,
        }
    }
}

/// The current third-party-facing shape of one provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderModels {
    pub base_url: String,
    pub api: String,
    pub models: Vec<ProviderModel>,
}

/// Project one provider from the catalog's active entries of its family.
pub fn provider_models(provider: Provider) -> ProviderModels {
    let models = registry::by_family(provider.family())
        .into_iter()
        .map(ProviderModel::from)
        .collect();

    ProviderModels {
        base_url: provider.base_url(),
        api: provider.api(),
        models,
    }
}

/// All three projections keyed by provider identifier.
pub fn build_provider_configs() -> BTreeMap<&'static str, ProviderModels> {
    Provider::ALL
        .into_iter()
        .map(|provider| (provider.id(), provider_models(provider)))
        .collect()
}
