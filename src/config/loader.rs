//! Configuration loader with tier-based merging.
//!
//! Loads configuration from multiple tiers and merges them field-by-field.

use super::merge::deep_merge_all;
use super::types::{Config, parse_list_ids};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the configuration file inside each tier directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project-level config ($CWD/list-insights/)
    Project = 1,
    /// User-level config (~/.list-insights/)
    User = 2,
    /// Environment variables (highest priority)
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Directories for each configuration tier.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub project_dir: Option<PathBuf>,
    pub user_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover tier directories from the environment and defaults.
    pub fn discover() -> Self {
        // User dir: LIST_INSIGHTS_USER_DIR or ~/.list-insights
        let user_dir = std::env::var("LIST_INSIGHTS_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".list-insights")));

        // Project dir: LIST_INSIGHTS_PROJECT_DIR or $CWD/list-insights
        let project_dir = std::env::var("LIST_INSIGHTS_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("list-insights")));

        Self {
            project_dir,
            user_dir,
        }
    }

    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
        }
    }
}

/// Environment overrides, captured once so loading stays deterministic.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// `LIST_INSIGHTS_CONFIG_PATH`: one explicit file replacing the file tiers.
    pub config_path: Option<PathBuf>,
    /// `LIST_INSIGHTS_SNAPSHOT_DIR`
    pub snapshot_dir: Option<PathBuf>,
    /// `LIST_INSIGHTS_LIST_IDS`, newline or comma separated.
    pub list_ids: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            config_path: std::env::var("LIST_INSIGHTS_CONFIG_PATH")
                .ok()
                .map(PathBuf::from),
            snapshot_dir: std::env::var("LIST_INSIGHTS_SNAPSHOT_DIR")
                .ok()
                .map(PathBuf::from),
            list_ids: std::env::var("LIST_INSIGHTS_LIST_IDS").ok(),
        }
    }

    fn apply(&self, config: &mut Config) {
        if let Some(ref dir) = self.snapshot_dir {
            config.source.snapshot_dir = dir.clone();
        }
        if let Some(ref raw) = self.list_ids {
            let ids = parse_list_ids(raw);
            if !ids.is_empty() {
                config.source.list_ids = ids;
            }
        }
    }
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    pub paths: ConfigPaths,
    config: Config,
    /// Highest-priority file that contributed (if any)
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration from all tiers with proper merging.
    pub fn load() -> Result<Self> {
        Self::load_with(ConfigPaths::discover(), &EnvOverrides::from_env())
    }

    /// Load configuration with explicit tier paths and environment.
    pub fn load_with(paths: ConfigPaths, env: &EnvOverrides) -> Result<Self> {
        if let Some(ref explicit) = env.config_path {
            let mut config = Config::load(explicit)
                .with_context(|| format!("Failed to load config file {}", explicit.display()))?;
            env.apply(&mut config);
            config.validate()?;
            return Ok(Self {
                paths,
                config,
                config_path: Some(explicit.clone()),
            });
        }

        let mut configs: Vec<Value> = Vec::new();
        let mut config_path = None;

        // Tier 1: Defaults
        configs.push(serde_json::to_value(Config::default())?);

        // Tiers 2-3: Project, then user
        for (tier, dir) in [
            (ConfigTier::Project, paths.project_dir.as_deref()),
            (ConfigTier::User, paths.user_dir.as_deref()),
        ] {
            let Some(dir) = dir else { continue };
            if let Some(value) = read_tier_file(tier, &dir.join(CONFIG_FILE_NAME)) {
                configs.push(value);
                config_path = Some(dir.join(CONFIG_FILE_NAME));
            }
        }

        let merged = deep_merge_all(configs);
        let mut config: Config = serde_json::from_value(merged)?;

        // Tier 4: Environment
        env.apply(&mut config);
        config.validate()?;

        Ok(Self {
            paths,
            config,
            config_path,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

/// Read one tier's YAML file. Missing files are skipped silently; unreadable
/// or malformed ones are skipped with a warning.
fn read_tier_file(tier: ConfigTier, path: &Path) -> Option<Value> {
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(tier = %tier, path = %path.display(), "Skipping unreadable config: {}", e);
            return None;
        }
    };
    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Null) => None,
        Ok(value) => {
            debug!(tier = %tier, path = %path.display(), "Loaded config tier");
            Some(value)
        }
        Err(e) => {
            warn!(tier = %tier, path = %path.display(), "Skipping malformed config: {}", e);
            None
        }
    }
}
