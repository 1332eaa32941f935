//! Provider identifiers, upstream endpoints, and dialect tags.
//!
//! Base URLs and the GPT dialect can be overridden via environment
//! variables for local testing against a staging gateway.

use std::env;

pub const PROVIDER_ID_GPT: &str = "trellis-gpt";
pub const PROVIDER_ID_CLAUDE: &str = "trellis-claude";
pub const PROVIDER_ID_GEMINI: &str = "trellis-gemini";

const DEFAULT_GPT_BASE_URL: &str = "https://api.trellis.ai/chatgpt/v1";
const DEFAULT_CLAUDE_BASE_URL: &str = "https://api.trellis.ai/v1";
const DEFAULT_GEMINI_BASE_URL: &str = "https://api.trellis.ai/gemini/v1";

/// Dialect tag for GPT - "openai-responses" (default) or "openai-completions"
const DEFAULT_GPT_API: &str = "openai-responses";

pub const CLAUDE_API: &str = "anthropic-messages";
pub const GEMINI_API: &str = "google-generative-ai";

pub fn gpt_base_url() -> String {
    env_or("TRELLIS_GPT_BASE_URL", DEFAULT_GPT_BASE_URL)
}

pub fn claude_base_url() -> String {
    env_or("TRELLIS_CLAUDE_BASE_URL", DEFAULT_CLAUDE_BASE_URL)
}

pub fn gemini_base_url() -> String {
    env_or("TRELLIS_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL)
}

pub fn gpt_api() -> String {
    env_or("TRELLIS_GPT_API", DEFAULT_GPT_API)
}

fn env_or(var: &str, default: &str) -> String {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}
