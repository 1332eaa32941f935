//! Removes alias entries for models that no longer exist at all.
//!
//! Migration handles renamed ids; this pass handles ids that vanished
//! from the catalog without a successor. Only keys qualified under one of
//! the three Trellis providers are candidates — foreign namespaces are
//! never touched.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::info;

use trellis_models::{
    build_model_migrations, build_provider_configs, ModelMigrations, Provider, RegistryError,
};

/// Delete Trellis-qualified alias keys that neither name an active model
/// nor appear as a migration source.
///
/// Sparing migration sources keeps this pass order-insensitive with
/// respect to `migrate_config`: a key migration would rename is never
/// condemned here, so cleanup-then-migrate and migrate-then-cleanup
/// produce the same document.
pub fn cleanup_stale_models(config: &mut Value) -> Result<bool, RegistryError> {
    let migrations = build_model_migrations()?;
    let active = active_alias_keys();
    let mut changed = false;

    if let Some(defaults) = config.pointer_mut("/agents/defaults") {
        changed |= prune_stale_aliases(defaults, &active, &migrations);
    }

    if let Some(Value::Array(agents)) = config.pointer_mut("/agents/list") {
        for agent in agents.iter_mut() {
            changed |= prune_stale_aliases(agent, &active, &migrations);
        }
    }

    Ok(changed)
}

/// Every qualified id the current projections expose.
fn active_alias_keys() -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    for (provider_id, projection) in build_provider_configs() {
        for model in &projection.models {
            keys.insert(format!("{}/{}", provider_id, model.id));
        }
    }
    keys
}

fn prune_stale_aliases(
    entry: &mut Value,
    active: &BTreeSet<String>,
    migrations: &ModelMigrations,
) -> bool {
    let Some(Value::Object(aliases)) = entry.get_mut("models") else {
        return false;
    };

    let stale: Vec<String> = aliases
        .keys()
        .filter(|key| is_stale(key, active, migrations))
        .cloned()
        .collect();

    for key in &stale {
        info!("removing stale model alias: {}", key);
        aliases.remove(key);
    }

    !stale.is_empty()
}

fn is_stale(key: &str, active: &BTreeSet<String>, migrations: &ModelMigrations) -> bool {
    Provider::ALL
        .iter()
        .any(|provider| is_qualified_under(key, *provider))
        && !active.contains(key)
        && !migrations.contains_key(key)
}

fn is_qualified_under(key: &str, provider: Provider) -> bool {
    key.strip_prefix(provider.id())
        .map_or(false, |rest| rest.starts_with('/'))
}
