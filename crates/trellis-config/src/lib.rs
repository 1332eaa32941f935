//! Trellis configuration maintenance
//!
//! Reads the host's persisted configuration document, rewrites references
//! to deprecated model ids (`migrate_config`), drops alias entries for
//! models that no longer exist (`cleanup_stale_models`), and writes the
//! result back crash-safely (`ConfigStore`).

mod cleanup;
mod migrate;
mod store;

pub use cleanup::cleanup_stale_models;
pub use migrate::{migrate_config, rewrite_model_field};
pub use store::{ConfigStore, CONFIG_FILE, LOOM_DIR};
