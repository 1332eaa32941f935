//! The registration boundary between this plugin and the Loom host.

use trellis_models::ProviderModels;

use crate::auth::AuthMethodDescriptor;

/// Everything the host needs to surface one Trellis provider.
#[derive(Debug, Clone)]
pub struct ProviderRegistration {
    pub id: &'static str,
    pub label: &'static str,
    /// Environment variables the host may read a key from instead of
    /// prompting.
    pub env_vars: Vec<&'static str>,
    pub models: ProviderModels,
    pub auth: Vec<AuthMethodDescriptor>,
}

/// Implemented by the host application. The plugin only pushes provider
/// registrations through it; config persistence goes through
/// `trellis_config::ConfigStore` directly.
pub trait PluginHost {
    fn register_provider(&mut self, registration: ProviderRegistration);
}
