//! Trellis plugin for Loom
//!
//! Registers the three Trellis providers (GPT, Claude, Gemini) with the
//! host and, before doing so, brings the user's persisted configuration
//! up to date: stale model aliases are dropped and references to
//! deprecated model ids are rewritten to their current replacements.

mod auth;
mod host;

pub use auth::{
    api_key_auth_method, run_api_key_auth, validate_api_key, AuthKind, AuthMethodDescriptor,
    AuthOutcome, CredentialProfile, Prompter, TextPrompt, AUTH_PROFILE_ID,
};
pub use host::{PluginHost, ProviderRegistration};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use trellis_config::ConfigStore;
use trellis_models::{provider_models, Provider, RegistryError};

pub const PLUGIN_ID: &str = "loom-trellis-auth";
pub const PLUGIN_NAME: &str = "Trellis";
pub const PLUGIN_DESCRIPTION: &str =
    "Access GPT, Claude, and Gemini models through a Trellis account";

pub const TRELLIS_API_KEY_ENV: &str = "TRELLIS_API_KEY";

pub struct TrellisPlugin {
    store: Option<ConfigStore>,
}

impl TrellisPlugin {
    pub fn new() -> Self {
        Self {
            store: ConfigStore::from_home(),
        }
    }

    /// Use an explicit config location instead of `~/.loom/loom.json`.
    pub fn with_store(store: ConfigStore) -> Self {
        Self { store: Some(store) }
    }

    /// Plugin entry point, called once by the host at load time.
    ///
    /// Config maintenance is best-effort: I/O problems are logged and
    /// registration proceeds with whatever is on disk. A catalog
    /// invariant violation, in contrast, is a build defect and propagates.
    pub fn register(&self, host: &mut dyn PluginHost) -> Result<()> {
        self.migrate_persisted_config()
            .context("config migration failed")?;

        for provider in Provider::ALL {
            host.register_provider(ProviderRegistration {
                id: provider.id(),
                label: provider_label(provider),
                env_vars: vec![TRELLIS_API_KEY_ENV],
                models: provider_models(provider),
                auth: vec![api_key_auth_method()],
            });
        }

        Ok(())
    }

    fn migrate_persisted_config(&self) -> Result<(), RegistryError> {
        let Some(store) = &self.store else {
            debug!("no home directory, skipping config migration");
            return Ok(());
        };

        let mut config = match store.load() {
            Ok(Some(config)) => config,
            Ok(None) => return Ok(()),
            Err(error) => {
                warn!("skipping config migration: {:#}", error);
                return Ok(());
            }
        };

        let mut changed = trellis_config::cleanup_stale_models(&mut config)?;
        changed |= trellis_config::migrate_config(&mut config)?;
        if !changed {
            return Ok(());
        }

        match store.write(&config) {
            Ok(()) => info!(
                "migrated deprecated model references in {}",
                store.path().display()
            ),
            // The document on disk stays un-migrated; registration must
            // still go ahead.
            Err(error) => warn!("failed to persist migrated config: {:#}", error),
        }

        Ok(())
    }
}

impl Default for TrellisPlugin {
    fn default() -> Self {
        Self::new()
    }
}

fn provider_label(provider: Provider) -> &'static str {
    match provider {
        Provider::Gpt => "Trellis GPT",
        Provider::Claude => "Trellis Claude",
        Provider::Gemini => "Trellis Gemini",
    }
}
