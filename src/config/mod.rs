mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `database.path`.
pub const DATABASE_ENV: &str = "ENTRYCHECK_DATABASE";

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

    let default_paths = [
        "./entrycheck.toml",
        "~/.config/entrycheck/config.toml",
        "/etc/entrycheck/config.toml",
    ];

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

/// Apply database path overrides. The CLI flag wins over the environment,
/// which wins over the file. A blank environment value is ignored; a blank
/// flag is an error.
pub fn apply_database_override(
    config: &mut Config,
    env_value: Option<String>,
    flag: Option<&Path>,
) -> Result<()> {
    if let Some(path) = flag {
        config.database.path = path.to_path_buf();
    } else if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        config.database.path = PathBuf::from(value);
    }

    validate_config(config)
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.database.path.to_string_lossy().trim().is_empty() {
        anyhow::bail!("database.path cannot be empty");
    }

    if config.database.pool_size == 0 {
        anyhow::bail!("database.pool_size must be at least 1");
    }

    if config.database.connect_timeout_ms == 0 {
        anyhow::bail!("database.connect_timeout_ms must be at least 1");
    }

    Ok(())
}

/// Non-fatal configuration issues, for logging once tracing is up.
pub fn config_warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.database.connect_timeout_ms < 100 {
        warnings.push(format!(
            "database.connect_timeout_ms is {}; a busy store may be reported unreachable",
            config.database.connect_timeout_ms
        ));
    }

    if config.database.path == Path::new(":memory:") {
        warnings.push("database.path is :memory:; entries will not outlive the process".into());
    }

    warnings
}
