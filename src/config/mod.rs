//! Tiered configuration.
//!
//! Configuration is merged field-by-field from:
//! 1. **Defaults** - built in
//! 2. **Project** - `$CWD/list-insights/config.yaml`
//! 3. **User** - `~/.list-insights/config.yaml`
//! 4. **Environment** - variables below
//!
//! ## Environment Variables
//! - `LIST_INSIGHTS_CONFIG_PATH` - Explicit config file (replaces tiers 2-3)
//! - `LIST_INSIGHTS_SNAPSHOT_DIR` - Snapshot directory
//! - `LIST_INSIGHTS_LIST_IDS` - Tracked list ids, newline or comma separated
//! - `LIST_INSIGHTS_USER_DIR` - User config dir (default: `~/.list-insights`)
//! - `LIST_INSIGHTS_PROJECT_DIR` - Project config dir (default: `./list-insights`)

mod loader;
mod merge;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader, ConfigPaths, ConfigTier, EnvOverrides};
pub use merge::{deep_merge, deep_merge_all};
pub use types::*;
