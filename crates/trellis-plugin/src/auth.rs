//! API-key authentication flow.
//!
//! The host drives the interactive part through the [`Prompter`] trait;
//! this module validates the entered key and assembles the credential
//! profile plus the config patch that seeds the three provider blocks.

use std::fmt;

use anyhow::{bail, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Map, Value};

use trellis_models::{provider_models, registry, Provider, RegistryError};

pub const AUTH_PROFILE_ID: &str = "trellis:default";

/// A single text prompt shown by the host.
#[derive(Debug, Clone, Copy)]
pub struct TextPrompt {
    pub message: &'static str,
    pub placeholder: Option<&'static str>,
}

/// Host-provided interactive input.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn text(&self, prompt: TextPrompt) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    ApiKey,
}

/// Describes one auth method to the host's credential picker.
#[derive(Debug, Clone)]
pub struct AuthMethodDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: AuthKind,
}

pub fn api_key_auth_method() -> AuthMethodDescriptor {
    AuthMethodDescriptor {
        id: "api_key",
        label: "Trellis API Key",
        hint: "Enter your Trellis API key to access GPT, Claude, and Gemini models",
        kind: AuthKind::ApiKey,
    }
}

/// Reject obviously unusable keys before they reach the config document.
pub fn validate_api_key(value: &str) -> Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("API key is required");
    }
    if trimmed.len() < 10 {
        return Err("API key seems too short");
    }
    Ok(())
}

/// One stored credential entry.
pub struct CredentialProfile {
    pub profile_id: &'static str,
    pub provider: &'static str,
    pub key: SecretString,
}

impl fmt::Debug for CredentialProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialProfile")
            .field("profile_id", &self.profile_id)
            .field("provider", &self.provider)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// The result handed back to the host after a successful prompt.
#[derive(Debug)]
pub struct AuthOutcome {
    pub profiles: Vec<CredentialProfile>,
    /// Merged into the user's config document by the host.
    pub config_patch: Value,
    pub default_model: String,
    pub notes: Vec<&'static str>,
}

/// Prompt for an API key, validate it, and build the full auth outcome.
pub async fn run_api_key_auth(prompter: &dyn Prompter) -> Result<AuthOutcome> {
    let entered = prompter
        .text(TextPrompt {
            message: "Trellis API Key",
            placeholder: Some("sk-..."),
        })
        .await?;

    let trimmed = entered.trim();
    if let Err(reason) = validate_api_key(trimmed) {
        bail!("{reason}");
    }

    Ok(build_auth_outcome(SecretString::from(trimmed.to_string()))?)
}

fn build_auth_outcome(key: SecretString) -> Result<AuthOutcome, RegistryError> {
    let default = registry::default_model()?;
    let default_ref = format!(
        "{}/{}",
        Provider::for_family(default.family).id(),
        default.id
    );

    let mut providers = Map::new();
    let mut alias_seed = Map::new();
    for provider in Provider::ALL {
        let projection = provider_models(provider);
        for model in &projection.models {
            alias_seed.insert(format!("{}/{}", provider.id(), model.id), json!({}));
        }
        providers.insert(
            provider.id().to_string(),
            json!({
                "baseUrl": projection.base_url,
                "api": projection.api,
                "models": projection.models,
                "apiKey": key.expose_secret(),
            }),
        );
    }

    let config_patch = json!({
        "models": {"providers": providers},
        "agents": {"defaults": {"model": default_ref.clone(), "models": alias_seed}},
    });

    Ok(AuthOutcome {
        profiles: vec![CredentialProfile {
            profile_id: AUTH_PROFILE_ID,
            provider: "trellis",
            key,
        }],
        config_patch,
        default_model: default_ref,
        notes: vec![
            "Trellis provides access to GPT, Claude, and Gemini models.",
            "Models are available under trellis-gpt/, trellis-claude/, and trellis-gemini/ prefixes.",
        ],
    })
}
