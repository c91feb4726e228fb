//! Environment source: HOMEPLAN_<SECTION>__<KEY>, e.g. HOMEPLAN_BREAKER__FAILURE_THRESHOLD=5

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "HOMEPLAN";

/// Credential variable consulted when no api_key is configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Add environment overrides to builder. Highest precedence, so add last.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}

/// API key from the process environment, if set and non-empty.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}
