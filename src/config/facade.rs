use crate::config::merge::merge_policy::builder_with_defaults;
use crate::config::sources::{environment, global_file};
use crate::config::PlannerConfig;
use crate::error::PlanError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from every layer.
    ///
    /// `explicit` is a file named on the command line; unlike the global file
    /// it must exist.
    pub fn load(explicit: Option<&Path>) -> Result<PlannerConfig, PlanError> {
        let mut builder = builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(PlanError::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = environment::add_to_builder(builder);
        let config: PlannerConfig = builder.build()?.try_deserialize()?;
        Self::finish(config)
    }

    /// Load configuration from a single file over the defaults. No global
    /// file or environment overrides are applied.
    pub fn load_from_file(path: &Path) -> Result<PlannerConfig, PlanError> {
        let config: PlannerConfig = builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()?
            .try_deserialize()?;
        Self::finish(config)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn finish(mut config: PlannerConfig) -> Result<PlannerConfig, PlanError> {
        if config.provider.api_key.is_none() {
            config.provider.api_key = environment::api_key_from_env();
        }

        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            PlanError::Config(format!("Invalid configuration: {}", messages.join("; ")))
        })?;

        debug!(
            provider_url = %config.provider.url,
            failure_threshold = config.breaker.failure_threshold,
            open_window_secs = config.breaker.open_window_secs,
            records_path = %config.storage.records_path.display(),
            "Configuration loaded"
        );
        Ok(config)
    }
}
