use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::search::Algorithm;

/// Environment variable overriding the configured default algorithm.
pub const ALGORITHM_ENV: &str = "WAYFINDER_ALGORITHM";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    pub default_algorithm: Algorithm,
    /// Cost of a connector edge exported without an explicit cost.
    #[serde(default = "default_connector_cost")]
    pub connector_cost: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::default(),
            connector_cost: default_connector_cost(),
        }
    }
}

/// `<config_dir>/wayfinder/config.toml`, when the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wayfinder/config.toml"))
}

/// Load a router config file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or holds an
/// invalid connector cost.
pub fn load_config(path: &Path) -> Result<RouterConfig> {
    if !path.exists() {
        return Ok(RouterConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<RouterConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    validate(&config).with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

/// Load the explicit config if given (it must exist), else the default path.
///
/// # Errors
///
/// Returns an error if an explicit path does not exist, or loading fails.
pub fn resolve_config(explicit: Option<&Path>) -> Result<RouterConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("Config file {} does not exist", path.display());
            }
            load_config(path)
        }
        None => default_config_path().map_or_else(|| Ok(RouterConfig::default()), |p| load_config(&p)),
    }
}

/// Pick the algorithm for a query.
///
/// Precedence: explicit flag, then `WAYFINDER_ALGORITHM`, then the config.
///
/// # Errors
///
/// Returns an error if `WAYFINDER_ALGORITHM` is set to an unknown name.
pub fn resolve_algorithm(flag: Option<Algorithm>, config: &RouterConfig) -> Result<Algorithm> {
    let env_value = env::var(ALGORITHM_ENV).ok();
    resolve_algorithm_inner(flag, env_value.as_deref(), config)
}

fn resolve_algorithm_inner(
    flag: Option<Algorithm>,
    env_value: Option<&str>,
    config: &RouterConfig,
) -> Result<Algorithm> {
    if let Some(algorithm) = flag {
        return Ok(algorithm);
    }

    if let Some(raw) = env_value.filter(|v| !v.trim().is_empty()) {
        return raw
            .parse::<Algorithm>()
            .with_context(|| format!("{ALGORITHM_ENV} is invalid"));
    }

    Ok(config.routing.default_algorithm)
}

fn validate(config: &RouterConfig) -> Result<()> {
    let cost = config.routing.connector_cost;
    if !cost.is_finite() || cost < 0.0 {
        bail!("routing.connector_cost must be a non-negative number, got {cost}");
    }
    Ok(())
}

const fn default_connector_cost() -> f64 {
    50.0
}
