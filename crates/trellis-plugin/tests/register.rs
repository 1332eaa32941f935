//! Registration-path scenarios against a real on-disk config document.

use serde_json::json;
use tempfile::TempDir;

use trellis_config::ConfigStore;
use trellis_plugin::{PluginHost, ProviderRegistration, TrellisPlugin, TRELLIS_API_KEY_ENV};

#[derive(Default)]
struct RecordingHost {
    registrations: Vec<ProviderRegistration>,
}

impl PluginHost for RecordingHost {
    fn register_provider(&mut self, registration: ProviderRegistration) {
        self.registrations.push(registration);
    }
}

#[test]
fn registers_all_three_providers() {
    let dir = TempDir::new().unwrap();
    let plugin = TrellisPlugin::with_store(ConfigStore::at_path(dir.path().join("loom.json")));

    let mut host = RecordingHost::default();
    plugin.register(&mut host).unwrap();

    let ids: Vec<_> = host.registrations.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["trellis-gpt", "trellis-claude", "trellis-gemini"]);

    for registration in &host.registrations {
        assert_eq!(registration.env_vars, vec![TRELLIS_API_KEY_ENV]);
        assert!(!registration.models.models.is_empty());
        assert_eq!(registration.auth.len(), 1);
        assert_eq!(registration.auth[0].id, "api_key");
    }
    assert_eq!(host.registrations[0].label, "Trellis GPT");
}

#[test]
fn register_migrates_the_persisted_document() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::at_path(dir.path().join("loom.json"));
    store
        .write(&json!({
            "default_model": "gpt-5.2-codex",
            "agents": {"defaults": {"models": {
                "trellis-gpt/gpt-5.1": {"alias": "old"},
                "trellis-claude/long-retired": {},
            }}},
            "models": {"providers": {
                "trellis-claude": {"baseUrl": "https://old.example", "api": "anthropic-messages",
                                    "models": [], "apiKey": "secret123456"},
            }},
        }))
        .unwrap();

    let plugin = TrellisPlugin::with_store(store.clone());
    plugin.register(&mut RecordingHost::default()).unwrap();

    let config = store.load().unwrap().unwrap();
    assert_eq!(config["default_model"], "gpt-5.3-codex");

    let aliases = config["agents"]["defaults"]["models"].as_object().unwrap();
    assert_eq!(aliases["trellis-gpt/gpt-5.2"], json!({"alias": "old"}));
    assert!(!aliases.contains_key("trellis-gpt/gpt-5.1"));
    assert!(!aliases.contains_key("trellis-claude/long-retired"));

    let claude = &config["models"]["providers"]["trellis-claude"];
    assert_eq!(claude["apiKey"], "secret123456");
    assert_eq!(claude["baseUrl"], "https://api.trellis.ai/v1");
}

#[test]
fn register_is_idempotent_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::at_path(dir.path().join("loom.json"));
    store
        .write(&json!({"agents": {"defaults": {"model": "gpt-5.1"}}}))
        .unwrap();

    let plugin = TrellisPlugin::with_store(store.clone());
    plugin.register(&mut RecordingHost::default()).unwrap();
    let first = store.load().unwrap().unwrap();

    plugin.register(&mut RecordingHost::default()).unwrap();
    let second = store.load().unwrap().unwrap();

    assert_eq!(first["agents"]["defaults"]["model"], "gpt-5.2");
    assert_eq!(first, second);
}

#[test]
fn register_survives_a_missing_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loom.json");
    let plugin = TrellisPlugin::with_store(ConfigStore::at_path(&path));

    let mut host = RecordingHost::default();
    plugin.register(&mut host).unwrap();

    assert_eq!(host.registrations.len(), 3);
    // Registration never invents a config document.
    assert!(!path.exists());
}

#[test]
fn register_survives_an_unreadable_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loom.json");
    std::fs::write(&path, "{definitely not json").unwrap();

    let plugin = TrellisPlugin::with_store(ConfigStore::at_path(&path));
    let mut host = RecordingHost::default();
    plugin.register(&mut host).unwrap();

    assert_eq!(host.registrations.len(), 3);
    // The broken file is left for the host to deal with.
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{definitely not json"
    );
}

#[test]
fn register_leaves_settled_documents_untouched() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::at_path(dir.path().join("loom.json"));
    store.write(&json!({"theme": "dark"})).unwrap();

    let plugin = TrellisPlugin::with_store(store.clone());
    plugin.register(&mut RecordingHost::default()).unwrap();

    assert_eq!(store.load().unwrap().unwrap(), json!({"theme": "dark"}));
}
