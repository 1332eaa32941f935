//! Rewrites deprecated model references inside the user's config document.
//!
//! The document is an arbitrarily-shaped JSON tree owned by the host, so
//! every step here mutates `serde_json::Value` in place: deserializing
//! through a schema would silently drop the user's unknown fields. A
//! missing or wrong-typed section at any point simply means there is
//! nothing to migrate there.

use serde_json::{json, Map, Value};
use tracing::info;

use trellis_models::{
    build_model_migrations, provider_models, ModelMigrations, Provider, RegistryError,
};

/// Rewrite every reference to a deprecated model id to its current
/// replacement and refresh the plugin's provider blocks.
///
/// Returns whether the document changed. Idempotent: a second run over
/// its own output always reports `false`, because every id the map knows
/// has already been replaced by one it does not.
///
/// Malformed documents never error; the only failure source is a
/// catalog-invariant defect while deriving the rewrite map.
pub fn migrate_config(config: &mut Value) -> Result<bool, RegistryError> {
    let migrations = build_model_migrations()?;
    let mut changed = false;

    if let Some(Value::String(reference)) = config.get_mut("default_model") {
        changed |= rewrite_reference(reference, &migrations);
    }

    if let Some(defaults) = config.pointer_mut("/agents/defaults") {
        changed |= migrate_agent_entry(defaults, &migrations);
    }

    if let Some(Value::Array(agents)) = config.pointer_mut("/agents/list") {
        for agent in agents.iter_mut() {
            changed |= migrate_agent_entry(agent, &migrations);
        }
    }

    changed |= refresh_provider_blocks(config);

    Ok(changed)
}

/// Model, image-model, and alias-map rewrites shared by `agents.defaults`
/// and each `agents.list` entry.
fn migrate_agent_entry(entry: &mut Value, migrations: &ModelMigrations) -> bool {
    let Some(entry) = entry.as_object_mut() else {
        return false;
    };
    let mut changed = false;

    if let Some(model) = entry.get_mut("model") {
        changed |= rewrite_model_field(model, migrations);
    }
    if let Some(image_model) = entry.get_mut("imageModel") {
        changed |= rewrite_model_field(image_model, migrations);
    }
    if let Some(Value::Object(aliases)) = entry.get_mut("models") {
        changed |= rename_alias_keys(aliases, migrations);
    }

    changed
}

/// Rewrite one model reference field.
///
/// The field is either a bare id string or an object with `primary` and
/// optional `fallbacks`. Anything else is left alone. Fallback order is
/// preserved; only entries present in the map are substituted.
pub fn rewrite_model_field(field: &mut Value, migrations: &ModelMigrations) -> bool {
    match field {
        Value::String(reference) => rewrite_reference(reference, migrations),
        Value::Object(model) => {
            let mut changed = false;
            if let Some(Value::String(primary)) = model.get_mut("primary") {
                changed |= rewrite_reference(primary, migrations);
            }
            if let Some(Value::Array(fallbacks)) = model.get_mut("fallbacks") {
                for fallback in fallbacks.iter_mut() {
                    if let Value::String(reference) = fallback {
                        changed |= rewrite_reference(reference, migrations);
                    }
                }
            }
            changed
        }
        _ => false,
    }
}

fn rewrite_reference(reference: &mut String, migrations: &ModelMigrations) -> bool {
    let Some(replacement) = migrations.get(reference.as_str()) else {
        return false;
    };
    info!("migrating model reference: {} -> {}", reference, replacement);
    *reference = replacement.clone();
    true
}

/// Move each migratable alias key to its new name, carrying the user's
/// metadata value along unchanged.
fn rename_alias_keys(aliases: &mut Map<String, Value>, migrations: &ModelMigrations) -> bool {
    let renames: Vec<(String, String)> = aliases
        .keys()
        .filter_map(|key| migrations.get(key).map(|new| (key.clone(), new.clone())))
        .collect();

    for (old_key, new_key) in &renames {
        if let Some(value) = aliases.remove(old_key) {
            info!("migrating model alias key: {} -> {}", old_key, new_key);
            aliases.insert(new_key.clone(), value);
        }
    }

    !renames.is_empty()
}

/// Rebuild each existing Trellis provider block from the current
/// projection. Provider blocks are wholly owned by this plugin, so this
/// is a structural refresh rather than an id substitution: endpoints,
/// dialect tags, and model lists all go stale in ways renaming cannot
/// express. A user's `apiKey` is the one field carried over; it is never
/// introduced when absent.
fn refresh_provider_blocks(config: &mut Value) -> bool {
    let Some(Value::Object(providers)) = config.pointer_mut("/models/providers") else {
        return false;
    };
    let mut changed = false;

    for provider in Provider::ALL {
        let Some(existing) = providers.get(provider.id()) else {
            continue;
        };
        let block = rebuild_provider_block(provider, existing);
        if *existing != block {
            info!("updating provider config: {}", provider.id());
            providers.insert(provider.id().to_string(), block);
            changed = true;
        }
    }

    changed
}

fn rebuild_provider_block(provider: Provider, existing: &Value) -> Value {
    let projection = provider_models(provider);
    let mut block = json!({
        "baseUrl": projection.base_url,
        "api": projection.api,
        "models": projection.models,
    });
    if let Some(api_key) = existing.get("apiKey") {
        block["apiKey"] = api_key.clone();
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn migrations() -> ModelMigrations {
        build_model_migrations().unwrap()
    }

    #[test]
    fn test_rewrite_bare_string_field() {
        let mut field = json!("gpt-5.2-codex");
        assert!(rewrite_model_field(&mut field, &migrations()));
        assert_eq!(field, json!("gpt-5.3-codex"));
    }

    #[test]
    fn test_rewrite_structured_field() {
        let mut field = json!({
            "primary": "trellis-claude/claude-opus-4-5-20251101",
            "fallbacks": ["gpt-5.1", "gemini-3-pro", "gpt-5.1-codex-mini"],
            "temperature": 0.2,
        });
        assert!(rewrite_model_field(&mut field, &migrations()));
        assert_eq!(
            field,
            json!({
                "primary": "trellis-claude/claude-opus-4-6-20260205",
                "fallbacks": ["gpt-5.2", "gemini-3-pro", "gpt-5.3-codex"],
                "temperature": 0.2,
            })
        );
    }

    #[test]
    fn test_rewrite_leaves_unknown_references_alone() {
        let mut field = json!({
            "primary": "other-vendor/fancy-model",
            "fallbacks": ["claude-opus-4-5-20251101"],
        });
        assert!(rewrite_model_field(&mut field, &migrations()));
        assert_eq!(field["primary"], "other-vendor/fancy-model");
        assert_eq!(field["fallbacks"][0], "claude-opus-4-6-20260205");
    }

    #[test]
    fn test_rewrite_tolerates_odd_shapes() {
        let m = migrations();
        assert!(!rewrite_model_field(&mut json!(42), &m));
        assert!(!rewrite_model_field(&mut json!(null), &m));
        assert!(!rewrite_model_field(&mut json!(["gpt-5.1"]), &m));
        assert!(!rewrite_model_field(&mut json!({"primary": 7, "fallbacks": "x"}), &m));
    }

    #[test]
    fn test_migrates_top_level_default_model() {
        let mut config = json!({"default_model": "gpt-5.2-codex"});
        assert!(migrate_config(&mut config).unwrap());
        assert_eq!(config, json!({"default_model": "gpt-5.3-codex"}));
    }

    #[test]
    fn test_migrates_agents_defaults_model() {
        let mut config = json!({
            "agents": {"defaults": {"model": "gpt-5.2-codex"}}
        });
        assert!(migrate_config(&mut config).unwrap());
        assert_eq!(config, json!({"agents": {"defaults": {"model": "gpt-5.3-codex"}}}));
    }

    #[test]
    fn test_migrates_image_model_independently() {
        let mut config = json!({
            "agents": {"defaults": {
                "model": "gpt-5.3-codex",
                "imageModel": "claude-opus-4-5-20251101",
            }}
        });
        assert!(migrate_config(&mut config).unwrap());
        assert_eq!(
            config["agents"]["defaults"]["imageModel"],
            "claude-opus-4-6-20260205"
        );
        assert_eq!(config["agents"]["defaults"]["model"], "gpt-5.3-codex");
    }

    #[test]
    fn test_alias_key_rename_keeps_user_metadata() {
        let mut config = json!({
            "agents": {"defaults": {"models": {
                "trellis-claude/claude-opus-4-5-20251101": {"alias": "opus", "pinned": true},
                "other/foo": {"alias": "keep"},
            }}}
        });
        assert!(migrate_config(&mut config).unwrap());

        let aliases = &config["agents"]["defaults"]["models"];
        assert!(aliases.get("trellis-claude/claude-opus-4-5-20251101").is_none());
        assert_eq!(
            aliases["trellis-claude/claude-opus-4-6-20260205"],
            json!({"alias": "opus", "pinned": true})
        );
        assert_eq!(aliases["other/foo"], json!({"alias": "keep"}));
    }

    #[test]
    fn test_migrates_each_agent_in_list() {
        let mut config = json!({
            "agents": {"list": [
                {"model": "gpt-5.1"},
                {"model": {"primary": "claude-sonnet-4-5-20250929-third-party"}},
                "not-an-agent",
                {"models": {"trellis-gpt/gpt-5.1": {"note": "old"}}},
            ]}
        });
        assert!(migrate_config(&mut config).unwrap());

        let list = &config["agents"]["list"];
        assert_eq!(list[0]["model"], "gpt-5.2");
        assert_eq!(list[1]["model"]["primary"], "claude-sonnet-4-5-20250929");
        assert_eq!(list[2], "not-an-agent");
        assert_eq!(list[3]["models"]["trellis-gpt/gpt-5.2"], json!({"note": "old"}));
    }

    #[test]
    fn test_provider_refresh_preserves_api_key() {
        let mut config = json!({
            "models": {"providers": {
                "trellis-claude": {
                    "baseUrl": "https://old.example/v1",
                    "api": "anthropic-messages",
                    "models": [],
                    "apiKey": "secret123456",
                },
            }}
        });
        assert!(migrate_config(&mut config).unwrap());

        let block = &config["models"]["providers"]["trellis-claude"];
        assert_eq!(block["apiKey"], "secret123456");
        assert_eq!(block["baseUrl"], "https://api.trellis.ai/v1");
        assert_eq!(block["api"], "anthropic-messages");
        assert_eq!(block["models"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_provider_refresh_does_not_invent_api_key() {
        let mut config = json!({
            "models": {"providers": {
                "trellis-gemini": {"baseUrl": "https://old.example", "api": "x", "models": []},
            }}
        });
        assert!(migrate_config(&mut config).unwrap());

        let block = &config["models"]["providers"]["trellis-gemini"];
        assert!(block.get("apiKey").is_none());
        assert_eq!(block["models"][0]["id"], "gemini-3-pro");
    }

    #[test]
    fn test_provider_refresh_skips_foreign_and_absent_providers() {
        let mut config = json!({
            "models": {"providers": {
                "openrouter": {"baseUrl": "https://openrouter.example", "models": []},
            }}
        });
        assert!(!migrate_config(&mut config).unwrap());
        assert_eq!(
            config["models"]["providers"]["openrouter"],
            json!({"baseUrl": "https://openrouter.example", "models": []})
        );
    }

    #[test]
    fn test_empty_document_is_untouched() {
        let mut config = json!({});
        assert!(!migrate_config(&mut config).unwrap());
        assert_eq!(config, json!({}));
    }

    #[test]
    fn test_malformed_sections_are_skipped() {
        let mut config = json!({
            "default_model": 17,
            "agents": "oops",
            "models": {"providers": ["not", "a", "map"]},
        });
        assert!(!migrate_config(&mut config).unwrap());
        assert_eq!(
            config,
            json!({
                "default_model": 17,
                "agents": "oops",
                "models": {"providers": ["not", "a", "map"]},
            })
        );
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let mut config = json!({
            "default_model": "gpt-5.2-codex",
            "agents": {
                "defaults": {
                    "model": {"primary": "gpt-5.1", "fallbacks": ["claude-opus-4-5-20251101"]},
                    "models": {"trellis-gpt/gpt-5.1-codex": {}},
                },
                "list": [{"model": "claude-haiku-4-5-20251001-third-party"}],
            },
            "models": {"providers": {
                "trellis-gpt": {"baseUrl": "https://old.example", "api": "openai-completions",
                                 "models": [], "apiKey": "secret123456"},
            }},
        });

        assert!(migrate_config(&mut config).unwrap());

        let after_first = config.clone();
        assert!(!migrate_config(&mut config).unwrap());
        assert_eq!(config, after_first);
    }
}
