mod types;

pub use types::*;

use anyhow::{Context, Result};
use mpdforge_playlist::render::NAME_PLACEHOLDER;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./mpdforge.toml", "~/.config/mpdforge/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    tracing::debug!("No config file found; using defaults");
    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.render.version < 3 {
        anyhow::bail!(
            "render.version must be at least 3, got {}",
            config.render.version
        );
    }

    if !config.render.uri_template.contains(NAME_PLACEHOLDER) {
        anyhow::bail!(
            "render.uri_template must contain {}: {:?}",
            NAME_PLACEHOLDER,
            config.render.uri_template
        );
    }

    Ok(())
}
