// vigia-core/src/infrastructure/config.rs
//
// Seed run configuration: optional YAML file + environment layering.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::infrastructure::error::InfrastructureError;

/// What to do when one source of a multi-source run fails.
///
/// Explicit knob; when unset, `SeedConfig::default_policy` picks a default
/// per dataset mode (local files keep going, remote years abort).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and continue with the remaining sources.
    Continue,
    /// Propagate the failure and abort the remaining sources.
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// DuckDB database file (":memory:" accepted for tests).
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Directory scanned for local `.csv` extracts.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// true = remote OpenDataSUS yearly extracts, false = local partial files.
    #[serde(default)]
    pub use_full_data: bool,

    /// Explicit per-source failure policy. None = historical default per mode.
    #[serde(default)]
    pub on_error: Option<FailurePolicy>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            data_dir: default_data_dir(),
            use_full_data: false,
            on_error: None,
        }
    }
}

impl SeedConfig {
    /// Effective failure policy: configured value, or the historical default
    /// (local runs are pre-validated fixtures → Continue; remote runs need
    /// all-or-nothing completeness → Abort).
    pub fn default_policy(&self) -> FailurePolicy {
        match self.on_error {
            Some(policy) => policy,
            None if self.use_full_data => FailurePolicy::Abort,
            None => FailurePolicy::Continue,
        }
    }
}

fn default_db_path() -> String {
    "vigia_db.duckdb".to_string()
}

fn default_data_dir() -> String {
    "data/partial".to_string()
}

// --- LOADER ---

#[instrument(skip(project_dir))] // Log automatique de l'entrée/sortie de la fonction
pub fn load_seed_config(project_dir: &Path) -> Result<SeedConfig, InfrastructureError> {
    // 1. Fichier YAML optionnel
    let mut config = match find_main_config(project_dir) {
        Some(config_path) => {
            info!(path = ?config_path, "Loading seed configuration");
            let content = fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&content)?
        }
        None => SeedConfig::default(),
    };

    // 2. Override via Variables d'Environnement (Pattern 'Layering')
    // Permet de faire: USE_FULL_DATA=true vigia seed
    apply_env_overrides(&mut config);

    Ok(config)
}

fn find_main_config(root: &Path) -> Option<std::path::PathBuf> {
    let candidates = ["vigia.yaml", "vigia_conf.yaml"];
    candidates
        .iter()
        .map(|filename| root.join(filename))
        .find(|p| p.exists())
}

fn apply_env_overrides(config: &mut SeedConfig) {
    if let Ok(val) = std::env::var("VIGIA_DB_PATH") {
        info!(old = ?config.db_path, new = ?val, "Overriding db path via ENV");
        config.db_path = val;
    }
    if let Ok(val) = std::env::var("VIGIA_DATA_DIR") {
        info!(old = ?config.data_dir, new = ?val, "Overriding data dir via ENV");
        config.data_dir = val;
    }
    // Toggle sans préfixe, utilisé par les scripts de déploiement
    if let Ok(val) = std::env::var("USE_FULL_DATA") {
        let full = val == "true";
        info!(old = config.use_full_data, new = full, "Overriding dataset mode via ENV");
        config.use_full_data = full;
    }
    if let Ok(val) = std::env::var("VIGIA_ON_ERROR") {
        match val.as_str() {
            "continue" => config.on_error = Some(FailurePolicy::Continue),
            "abort" => config.on_error = Some(FailurePolicy::Abort),
            other => info!(value = other, "Ignoring unknown VIGIA_ON_ERROR value"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config_file() -> Result<()> {
        let dir = tempdir()?;
        let config = load_seed_config(dir.path())?;

        assert_eq!(config.db_path, "vigia_db.duckdb");
        assert_eq!(config.data_dir, "data/partial");
        assert!(!config.use_full_data);
        assert_eq!(config.default_policy(), FailurePolicy::Continue);
        Ok(())
    }

    #[test]
    fn test_yaml_config_file() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(
            dir.path().join("vigia.yaml"),
            "db_path: custom.duckdb\ndata_dir: fixtures\non_error: abort\n",
        )?;

        let config = load_seed_config(dir.path())?;

        assert_eq!(config.db_path, "custom.duckdb");
        assert_eq!(config.data_dir, "fixtures");
        assert_eq!(config.default_policy(), FailurePolicy::Abort);
        Ok(())
    }

    #[test]
    fn test_remote_mode_defaults_to_abort() {
        let config = SeedConfig {
            use_full_data: true,
            ..SeedConfig::default()
        };
        assert_eq!(config.default_policy(), FailurePolicy::Abort);
    }

    #[test]
    fn test_explicit_policy_wins_over_mode() {
        let config = SeedConfig {
            use_full_data: true,
            on_error: Some(FailurePolicy::Continue),
            ..SeedConfig::default()
        };
        assert_eq!(config.default_policy(), FailurePolicy::Continue);
    }
}
