//! Merge rules: defaults first, then global file, explicit file, environment.

use crate::breaker::{DEFAULT_FAILURE_THRESHOLD, DEFAULT_OPEN_WINDOW};
use crate::provider::DEFAULT_GEMINI_URL;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("provider.url", DEFAULT_GEMINI_URL)?
        .set_default("provider.timeout_secs", 300)?
        .set_default("provider.connect_timeout_secs", 10)?
        .set_default("breaker.failure_threshold", DEFAULT_FAILURE_THRESHOLD as i64)?
        .set_default("breaker.open_window_secs", DEFAULT_OPEN_WINDOW.as_secs() as i64)
}
