use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Resolves the configuration directory by priority:
/// 1. Explicit path,
/// 2. `CALLOGD_PATH` environment variable,
/// 3. XDG config directory,
/// 4. `~/.callogd` fallback.
pub fn resolve_config_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(PathBuf::from(path));
    }

    if let Ok(env_path) = std::env::var("CALLOGD_PATH") {
        return Ok(PathBuf::from(env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("callogd"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".callogd"));
    }

    Err(Error::Config(
        "could not determine config directory: no HOME or XDG config directory found".to_string(),
    ))
}

/// Process-wide, startup-fixed configuration (§5, §10.4).
///
/// `service_tenant_uuid` is the fallback `ensure_tenant_uuid` (§4.5) falls
/// back to when no participant carries a tenant and no directory context
/// matches `requested_context`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub service_tenant_uuid: Uuid,
}

impl Config {
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_config_dir(None)?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let config = Config {
            service_tenant_uuid: Uuid::new_v4(),
        };
        config.save_to(&config_path).unwrap();
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_missing_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");
        assert!(Config::load_from(&config_path).is_err());
    }

    #[test]
    fn resolve_config_dir_prefers_explicit_path() {
        let resolved = resolve_config_dir(Some("/tmp/explicit-callogd")).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/explicit-callogd"));
    }
}
