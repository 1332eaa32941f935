//! Derives the identifier-rewrite map from the catalog's deprecation chains.

use std::collections::{BTreeMap, HashSet};

use crate::error::RegistryError;
use crate::model::ModelDefinition;
use crate::projection::Provider;
use crate::registry;

/// Old identifier to new identifier, in both bare and provider-qualified
/// forms. Values are always fully resolved: following one never lands on
/// another key.
pub type ModelMigrations = BTreeMap<String, String>;

/// Build the rewrite map for every deprecated catalog entry.
///
/// Each deprecated id maps to the final non-deprecated end of its
/// replacement chain, once bare and once qualified with the owning
/// provider. Config documents store references in both forms, so the
/// rewrite has to match either without guessing.
///
/// The map is a pure function of the static catalog and is recomputed on
/// every call; nothing caches it.
pub fn build_model_migrations() -> Result<ModelMigrations, RegistryError> {
    build_migrations_from(registry::all())
}

fn build_migrations_from(models: &[ModelDefinition]) -> Result<ModelMigrations, RegistryError> {
    let mut migrations = ModelMigrations::new();

    for model in models.iter().filter(|m| m.deprecated) {
        let target = resolve_replacement(models, model)?;

        migrations.insert(model.id.to_string(), target.id.to_string());

        let old_provider = Provider::for_family(model.family);
        let new_provider = Provider::for_family(target.family);
        migrations.insert(
            format!("{}/{}", old_provider.id(), model.id),
            format!("{}/{}", new_provider.id(), target.id),
        );
    }

    Ok(migrations)
}

/// Follow `replaced_by` until a non-deprecated entry is reached.
///
/// A replacement can itself be deprecated later, so a single hop is not
/// enough. The visited set turns a cyclic chain into an error instead of
/// an infinite walk.
fn resolve_replacement<'a>(
    models: &'a [ModelDefinition],
    start: &'a ModelDefinition,
) -> Result<&'a ModelDefinition, RegistryError> {
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(start.id);

    let mut current = start;
    while current.deprecated {
        let next_id = current
            .replaced_by
            .ok_or(RegistryError::MissingReplacement { id: current.id })?;
        let next = models.iter().find(|m| m.id == next_id).ok_or(
            RegistryError::UnknownReplacement {
                id: current.id,
                replaced_by: next_id,
            },
        )?;
        if !visited.insert(next.id) {
            return Err(RegistryError::ReplacementCycle { id: next.id });
        }
        current = next;
    }

    Ok(current)
}
